//! Doctor data model.
//!
//! Doctors are external collaborators: the queue is partitioned by doctor, but
//! the engine only ever reads these records. Nothing in this crate mutates a
//! doctor after registration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Availability of a doctor, as reported by the surrounding application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoctorStatus {
    Available,
    InConsult,
    OnBreak,
    OffDuty,
}

impl DoctorStatus {
    /// Parse from the wire format string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "AVAILABLE" => Some(DoctorStatus::Available),
            "IN_CONSULT" => Some(DoctorStatus::InConsult),
            "ON_BREAK" => Some(DoctorStatus::OnBreak),
            "OFF_DUTY" => Some(DoctorStatus::OffDuty),
            _ => None,
        }
    }

    /// Convert to the wire format string.
    pub fn as_wire(self) -> &'static str {
        match self {
            DoctorStatus::Available => "AVAILABLE",
            DoctorStatus::InConsult => "IN_CONSULT",
            DoctorStatus::OnBreak => "ON_BREAK",
            DoctorStatus::OffDuty => "OFF_DUTY",
        }
    }
}

impl std::fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// A doctor with their own logical sub-queue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub status: DoctorStatus,
    /// Average consult duration in minutes, used by wait-estimate displays.
    pub average_consult_minutes: u32,
}

/// Fields supplied when registering a doctor; the id is generated.
#[derive(Clone, Debug)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub status: DoctorStatus,
    pub average_consult_minutes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names_round_trip() {
        for status in [
            DoctorStatus::Available,
            DoctorStatus::InConsult,
            DoctorStatus::OnBreak,
            DoctorStatus::OffDuty,
        ] {
            assert_eq!(DoctorStatus::from_wire(status.as_wire()), Some(status));
        }
        assert_eq!(DoctorStatus::from_wire("RETIRED"), None);
    }
}
