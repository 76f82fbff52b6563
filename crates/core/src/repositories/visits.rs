//! Visit ingestion, status transitions, and per-doctor queue views.
//!
//! This module is the state layer around the pure scoring/sorting core. It
//! handles:
//!
//! - Check-in: building a scored [`Visit`] and inserting it into storage
//! - Status transitions with idempotent consult timestamps
//! - Per-doctor active-queue views, re-scored and re-sorted on every read
//!
//! ## Storage Layout
//!
//! Visits are stored as one JSON document per record:
//!
//! ```text
//! <MEDQ_DATA_DIR>/
//!   visits/
//!     <uuid>.json
//! ```
//!
//! Terminal visits stay on disk for history and audit; nothing here deletes
//! them, they are simply filtered out of active-queue views.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations—no API concerns such as
//! authentication or HTTP servers. API-level logic belongs in `api-rest` or
//! `api-shared`.

use crate::config::CoreConfig;
use crate::constants::RECORD_FILE_EXTENSION;
use crate::error::{QueueError, QueueResult};
use crate::queue::sort_queue;
use crate::scoring::priority_score;
use crate::visit::{NewVisit, Visit, VisitStatus};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Service for visit operations against the configured data directory.
///
/// The service holds no in-process collection: storage is the collection, and
/// every queue view reloads, re-scores, and re-sorts it. That keeps the
/// service safe to clone into as many read paths as the caller likes.
#[derive(Clone, Debug)]
pub struct VisitService {
    cfg: Arc<CoreConfig>,
}

impl VisitService {
    /// Creates a new visit service.
    ///
    /// # Arguments
    ///
    /// * `cfg` - Core configuration containing the queue data directory.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Check a patient in: build the visit, score it at `now`, and persist it.
    ///
    /// New visits start in `ARRIVED` with `check_in_time = now`; identity and
    /// the tenant id come from this service, not the caller.
    ///
    /// # Errors
    ///
    /// Returns a `QueueError` if the storage directory cannot be created or
    /// the visit cannot be serialised or written.
    pub fn check_in(&self, new_visit: NewVisit, now: DateTime<Utc>) -> QueueResult<Visit> {
        let mut visit = Visit {
            id: Uuid::new_v4(),
            hospital_id: self.cfg.hospital_id(),
            patient_id: new_visit.patient_id,
            doctor_id: new_visit.doctor_id,
            visit_type: new_visit.visit_type,
            triage_category: new_visit.triage_category,
            status: VisitStatus::Arrived,
            check_in_time: now,
            consult_start_time: None,
            consult_end_time: None,
            priority_score: medq_types::Score::ZERO,
            override_flag: new_visit.override_flag,
            override_weight: new_visit.override_weight,
        };
        visit.priority_score = priority_score(&visit, now);

        self.write_visit(&visit)?;
        tracing::info!(
            visit_id = %visit.id,
            doctor_id = %visit.doctor_id,
            visit_type = %visit.visit_type,
            "checked in visit"
        );
        Ok(visit)
    }

    /// Transition a visit to `next` at `now`, re-score it, and persist it.
    ///
    /// Consult timestamps are stamped idempotently by [`Visit::transition`].
    ///
    /// # Errors
    ///
    /// Returns `QueueError::VisitNotFound` for an unknown id,
    /// `QueueError::VisitAlreadyTerminal` when the visit has already reached a
    /// terminal status, or a storage error if persisting fails.
    pub fn transition(
        &self,
        visit_id: Uuid,
        next: VisitStatus,
        now: DateTime<Utc>,
    ) -> QueueResult<Visit> {
        let mut visit = self.get(visit_id)?;

        if visit.status.is_terminal() {
            return Err(QueueError::VisitAlreadyTerminal {
                id: visit.id,
                status: visit.status,
            });
        }

        visit.transition(next, now);
        visit.priority_score = priority_score(&visit, now);
        self.write_visit(&visit)?;
        tracing::info!(visit_id = %visit.id, status = %visit.status, "visit status changed");
        Ok(visit)
    }

    /// Read a single visit by id.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::VisitNotFound` if no record exists for `visit_id`,
    /// or a storage error if the record cannot be read or parsed.
    pub fn get(&self, visit_id: Uuid) -> QueueResult<Visit> {
        let path = self.visit_path(visit_id);
        if !path.is_file() {
            return Err(QueueError::VisitNotFound(visit_id));
        }
        let contents = fs::read_to_string(&path).map_err(QueueError::FileRead)?;
        serde_json::from_str(&contents).map_err(QueueError::Deserialization)
    }

    /// List every stored visit, history included.
    ///
    /// Unreadable or unparseable records are logged as warnings and skipped;
    /// a single corrupt file must not take the whole queue view down.
    pub fn list(&self) -> Vec<Visit> {
        let mut visits = Vec::new();

        let entries = match fs::read_dir(self.cfg.visits_dir()) {
            Ok(it) => it,
            Err(_) => return visits,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_FILE_EXTENSION) {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str::<Visit>(&contents) {
                    Ok(visit) => visits.push(visit),
                    Err(e) => {
                        tracing::warn!("failed to parse visit {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("failed to read visit {}: {e}", path.display());
                }
            }
        }

        visits
    }

    /// The active queue for one doctor, scored at `now` and sorted.
    ///
    /// Only `ARRIVED` and `WAITING` visits assigned to `doctor_id` appear;
    /// terminal and in-consult visits are filtered out before sorting.
    pub fn doctor_queue(&self, doctor_id: Uuid, now: DateTime<Utc>) -> Vec<Visit> {
        let active: Vec<Visit> = self
            .list()
            .into_iter()
            .filter(|v| v.doctor_id == doctor_id && v.status.is_queueable())
            .collect();

        sort_queue(&active, now)
    }

    fn visit_path(&self, visit_id: Uuid) -> PathBuf {
        self.cfg
            .visits_dir()
            .join(format!("{}.{RECORD_FILE_EXTENSION}", visit_id.simple()))
    }

    fn write_visit(&self, visit: &Visit) -> QueueResult<()> {
        fs::create_dir_all(self.cfg.visits_dir()).map_err(QueueError::StorageDirCreation)?;
        let contents =
            serde_json::to_string_pretty(visit).map_err(QueueError::Serialization)?;
        fs::write(self.visit_path(visit.id), contents).map_err(QueueError::FileWrite)
    }
}
