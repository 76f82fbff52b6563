//! Wire DTOs for the MedQ REST surface.
//!
//! Everything here is a plain serde struct with string-typed enums: the wire
//! carries the source system's SCREAMING_SNAKE_CASE names (`WALK_IN`, `RED`,
//! `IN_CONSULT`, ...) and handlers translate to and from the typed core model
//! at the boundary. Scores travel as decimal point values with two
//! significant decimals.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Request body for checking a patient in.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckInReq {
    /// Patient UUID.
    pub patient_id: String,
    /// Doctor UUID the visit is assigned to.
    pub doctor_id: String,
    /// Visit classification (`WALK_IN`, `APPOINTMENT`, `EMERGENCY`, `FOLLOW_UP`).
    pub visit_type: String,
    /// Triage category (`RED`, `YELLOW`, `GREEN`), if triage was performed.
    #[serde(default)]
    pub triage_category: Option<String>,
    /// Manual escalation flag.
    #[serde(default)]
    pub override_flag: bool,
    /// Score bonus applied while the override flag is set.
    #[serde(default)]
    pub override_weight: Option<f64>,
}

/// Request body for a visit status transition.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TransitionReq {
    /// Target status (`WAITING`, `IN_CONSULT`, `COMPLETED`, ...).
    pub status: String,
}

/// One visit on the wire.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct VisitRes {
    pub id: String,
    pub hospital_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub visit_type: String,
    pub triage_category: Option<String>,
    pub status: String,
    /// RFC 3339 timestamp of check-in.
    pub check_in_time: String,
    pub consult_start_time: Option<String>,
    pub consult_end_time: Option<String>,
    /// Priority score at the time the response was produced.
    pub priority_score: f64,
    pub override_flag: bool,
    pub override_weight: Option<f64>,
}

/// A doctor's active queue, scored at `generated_at`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorQueueRes {
    pub doctor_id: String,
    /// RFC 3339 instant the scores were computed at.
    pub generated_at: String,
    /// Visits in serving order, highest priority first.
    pub entries: Vec<VisitRes>,
}

/// Request body for registering a doctor.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterDoctorReq {
    pub name: String,
    pub specialization: String,
    /// Doctor availability (`AVAILABLE`, `IN_CONSULT`, `ON_BREAK`, `OFF_DUTY`).
    pub status: String,
    pub average_consult_minutes: u32,
}

/// One doctor on the wire.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorRes {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub status: String,
    pub average_consult_minutes: u32,
}

/// List of registered doctors.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ListDoctorsRes {
    pub doctors: Vec<DoctorRes>,
}
