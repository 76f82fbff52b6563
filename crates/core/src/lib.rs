//! # MedQ Core
//!
//! Core business logic for the MedQ patient queue system.
//!
//! This crate contains pure queue operations and the surrounding state layer:
//! - Priority scoring of waiting visits (type, triage, wait-time aging, overrides)
//! - Deterministic queue ordering with tolerance-band tie-breaking
//! - Visit lifecycle transitions with idempotent consult timestamps
//! - Visit and doctor storage as per-record JSON under `MEDQ_DATA_DIR`
//!
//! **No API concerns**: Authentication, HTTP servers, or service interfaces
//! belong in `api-rest` or `api-shared`.

pub mod config;
pub mod constants;
pub mod doctor;
pub mod error;
pub mod queue;
pub mod repositories;
pub mod scoring;
pub mod visit;

pub use config::CoreConfig;
pub use constants::DEFAULT_QUEUE_DATA_DIR;
pub use doctor::{Doctor, DoctorStatus, NewDoctor};
pub use error::{QueueError, QueueResult};
pub use medq_types::Score;
pub use queue::{sort_queue, SCORE_TOLERANCE};
pub use repositories::doctors::DoctorService;
pub use repositories::visits::VisitService;
pub use scoring::{priority_score, EMERGENCY_SCORE};
pub use visit::{NewVisit, TriageCategory, Visit, VisitStatus, VisitType};
