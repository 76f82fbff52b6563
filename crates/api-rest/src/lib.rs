//! REST surface for the MedQ queue engine.
//!
//! This crate exposes the router and handlers so both the standalone
//! `api-rest` binary and the workspace's main `medq-run` binary can serve the
//! same API. Handlers translate between the string-typed wire DTOs in
//! `api-shared` and the typed core model, and every queue read re-scores at
//! request time — the cached `priority_score` on disk is never trusted.

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use api_shared::{
    CheckInReq, DoctorQueueRes, DoctorRes, HealthRes, HealthService, ListDoctorsRes,
    RegisterDoctorReq, TransitionReq, VisitRes,
};
use medq_core::{
    CoreConfig, Doctor, DoctorService, DoctorStatus, NewDoctor, NewVisit, QueueError,
    TriageCategory, Visit, VisitService, VisitStatus, VisitType,
};
use medq_types::Score;

/// Application state shared across REST API handlers.
///
/// Contains the services needed by the REST API endpoints.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub visit_service: VisitService,
    pub doctor_service: DoctorService,
}

impl AppState {
    /// Build the application state from a resolved configuration.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            visit_service: VisitService::new(cfg.clone()),
            doctor_service: DoctorService::new(cfg.clone()),
            cfg,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        check_in,
        get_visit,
        transition_visit,
        doctor_queue,
        register_doctor,
        list_doctors,
    ),
    components(schemas(
        HealthRes,
        CheckInReq,
        TransitionReq,
        VisitRes,
        DoctorQueueRes,
        RegisterDoctorReq,
        DoctorRes,
        ListDoctorsRes,
    ))
)]
struct ApiDoc;

/// Build the MedQ REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/visits", post(check_in))
        .route("/visits/:id", get(get_visit))
        .route("/visits/:id/status", put(transition_visit))
        .route("/doctors", get(list_doctors))
        .route("/doctors", post(register_doctor))
        .route("/doctors/:id/queue", get(doctor_queue))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/visits",
    request_body = CheckInReq,
    responses(
        (status = 200, description = "Visit checked in", body = VisitRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Check a patient in.
///
/// The visit is scored at the moment of check-in and inserted into the
/// assigned doctor's sub-queue. Unrecognised visit types and triage
/// categories are accepted and score as zero-contribution terms.
///
/// # Errors
/// Returns `400 Bad Request` for malformed UUIDs and `500 Internal Server
/// Error` if the visit cannot be persisted.
#[axum::debug_handler]
async fn check_in(
    State(state): State<AppState>,
    Json(req): Json<CheckInReq>,
) -> Result<Json<VisitRes>, (StatusCode, &'static str)> {
    let patient_id = parse_uuid(&req.patient_id, "patient")?;
    let doctor_id = parse_uuid(&req.doctor_id, "doctor")?;

    let new_visit = NewVisit {
        patient_id,
        doctor_id,
        visit_type: VisitType::from_wire(&req.visit_type),
        triage_category: req
            .triage_category
            .as_deref()
            .map(TriageCategory::from_wire),
        override_flag: req.override_flag,
        override_weight: req.override_weight.map(Score::from_points),
    };

    match state.visit_service.check_in(new_visit, Utc::now()) {
        Ok(visit) => Ok(Json(visit_to_res(&visit))),
        Err(e) => Err(internal_error("Check in", &e)),
    }
}

#[utoipa::path(
    get,
    path = "/visits/{id}",
    responses(
        (status = 200, description = "Visit retrieved", body = VisitRes),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Visit not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Fetch one visit by id, history included.
#[axum::debug_handler]
async fn get_visit(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<VisitRes>, (StatusCode, &'static str)> {
    let visit_id = parse_uuid(&id, "visit")?;

    match state.visit_service.get(visit_id) {
        Ok(visit) => Ok(Json(visit_to_res(&visit))),
        Err(QueueError::VisitNotFound(_)) => Err((StatusCode::NOT_FOUND, "Visit not found")),
        Err(e) => Err(internal_error("Get visit", &e)),
    }
}

#[utoipa::path(
    put,
    path = "/visits/{id}/status",
    request_body = TransitionReq,
    responses(
        (status = 200, description = "Visit status updated", body = VisitRes),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Visit not found"),
        (status = 409, description = "Visit already terminal"),
        (status = 500, description = "Internal server error")
    )
)]
/// Transition a visit's lifecycle status.
///
/// Consult timestamps are stamped idempotently on the first transition into
/// `IN_CONSULT` / `COMPLETED`. Transitions out of a terminal status are
/// rejected with `409 Conflict`.
#[axum::debug_handler]
async fn transition_visit(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<TransitionReq>,
) -> Result<Json<VisitRes>, (StatusCode, &'static str)> {
    let visit_id = parse_uuid(&id, "visit")?;

    let Some(next) = VisitStatus::from_wire(&req.status) else {
        return Err((StatusCode::BAD_REQUEST, "Unknown visit status"));
    };

    match state.visit_service.transition(visit_id, next, Utc::now()) {
        Ok(visit) => Ok(Json(visit_to_res(&visit))),
        Err(QueueError::VisitNotFound(_)) => Err((StatusCode::NOT_FOUND, "Visit not found")),
        Err(QueueError::VisitAlreadyTerminal { .. }) => {
            Err((StatusCode::CONFLICT, "Visit is already terminal"))
        }
        Err(e) => Err(internal_error("Transition visit", &e)),
    }
}

#[utoipa::path(
    get,
    path = "/doctors/{id}/queue",
    responses(
        (status = 200, description = "Doctor's active queue in serving order", body = DoctorQueueRes),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Doctor not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// The active queue for one doctor, re-scored at request time.
///
/// Only `ARRIVED` and `WAITING` visits appear, highest priority first.
#[axum::debug_handler]
async fn doctor_queue(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<DoctorQueueRes>, (StatusCode, &'static str)> {
    let doctor_id = parse_uuid(&id, "doctor")?;

    match state.doctor_service.get(doctor_id) {
        Ok(_) => {}
        Err(QueueError::DoctorNotFound(_)) => {
            return Err((StatusCode::NOT_FOUND, "Doctor not found"))
        }
        Err(e) => return Err(internal_error("Doctor queue", &e)),
    }

    let now = Utc::now();
    let entries = state
        .visit_service
        .doctor_queue(doctor_id, now)
        .iter()
        .map(visit_to_res)
        .collect();

    Ok(Json(DoctorQueueRes {
        doctor_id: doctor_id.simple().to_string(),
        generated_at: now.to_rfc3339(),
        entries,
    }))
}

#[utoipa::path(
    post,
    path = "/doctors",
    request_body = RegisterDoctorReq,
    responses(
        (status = 200, description = "Doctor registered", body = DoctorRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Register a doctor so visits can be assigned to their sub-queue.
#[axum::debug_handler]
async fn register_doctor(
    State(state): State<AppState>,
    Json(req): Json<RegisterDoctorReq>,
) -> Result<Json<DoctorRes>, (StatusCode, &'static str)> {
    let Some(status) = DoctorStatus::from_wire(&req.status) else {
        return Err((StatusCode::BAD_REQUEST, "Unknown doctor status"));
    };

    let new_doctor = NewDoctor {
        name: req.name,
        specialization: req.specialization,
        status,
        average_consult_minutes: req.average_consult_minutes,
    };

    match state.doctor_service.register(new_doctor) {
        Ok(doctor) => Ok(Json(doctor_to_res(&doctor))),
        Err(QueueError::InvalidInput(_)) => Err((StatusCode::BAD_REQUEST, "Invalid input")),
        Err(e) => Err(internal_error("Register doctor", &e)),
    }
}

#[utoipa::path(
    get,
    path = "/doctors",
    responses(
        (status = 200, description = "List of registered doctors", body = ListDoctorsRes),
        (status = 500, description = "Internal server error")
    )
)]
/// List all registered doctors.
#[axum::debug_handler]
async fn list_doctors(State(state): State<AppState>) -> Json<ListDoctorsRes> {
    let doctors = state
        .doctor_service
        .list()
        .iter()
        .map(doctor_to_res)
        .collect();
    Json(ListDoctorsRes { doctors })
}

fn parse_uuid(raw: &str, what: &'static str) -> Result<Uuid, (StatusCode, &'static str)> {
    Uuid::parse_str(raw).map_err(|e| {
        tracing::error!("Invalid {what} UUID: {e}");
        (StatusCode::BAD_REQUEST, "Invalid UUID")
    })
}

fn internal_error(context: &'static str, e: &QueueError) -> (StatusCode, &'static str) {
    tracing::error!("{context} error: {e:?}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}

/// Translate a core visit into its wire representation.
pub fn visit_to_res(visit: &Visit) -> VisitRes {
    VisitRes {
        id: visit.id.simple().to_string(),
        hospital_id: visit.hospital_id.simple().to_string(),
        patient_id: visit.patient_id.simple().to_string(),
        doctor_id: visit.doctor_id.simple().to_string(),
        visit_type: visit.visit_type.as_wire().to_string(),
        triage_category: visit.triage_category.map(|t| t.as_wire().to_string()),
        status: visit.status.as_wire().to_string(),
        check_in_time: visit.check_in_time.to_rfc3339(),
        consult_start_time: visit.consult_start_time.map(|t| t.to_rfc3339()),
        consult_end_time: visit.consult_end_time.map(|t| t.to_rfc3339()),
        priority_score: visit.priority_score.as_points(),
        override_flag: visit.override_flag,
        override_weight: visit.override_weight.map(|w| w.as_points()),
    }
}

/// Translate a core doctor into its wire representation.
pub fn doctor_to_res(doctor: &Doctor) -> DoctorRes {
    DoctorRes {
        id: doctor.id.simple().to_string(),
        name: doctor.name.clone(),
        specialization: doctor.specialization.clone(),
        status: doctor.status.as_wire().to_string(),
        average_consult_minutes: doctor.average_consult_minutes,
    }
}
