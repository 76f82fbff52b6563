//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use crate::constants::{DOCTORS_DIR_NAME, VISITS_DIR_NAME};
use crate::{QueueError, QueueResult};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    queue_data_dir: PathBuf,
    hospital_id: Uuid,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(queue_data_dir: PathBuf, hospital_id: Uuid) -> QueueResult<Self> {
        if queue_data_dir.as_os_str().is_empty() {
            return Err(QueueError::InvalidInput(
                "queue_data_dir cannot be empty".into(),
            ));
        }

        Ok(Self {
            queue_data_dir,
            hospital_id,
        })
    }

    pub fn queue_data_dir(&self) -> &Path {
        &self.queue_data_dir
    }

    pub fn visits_dir(&self) -> PathBuf {
        self.queue_data_dir.join(VISITS_DIR_NAME)
    }

    pub fn doctors_dir(&self) -> PathBuf {
        self.queue_data_dir.join(DOCTORS_DIR_NAME)
    }

    /// Tenant identifier stamped on every visit created through this process.
    pub fn hospital_id(&self) -> Uuid {
        self.hospital_id
    }
}

/// Parse the hospital/tenant id from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the nil UUID, which is the
/// single-tenant default for a standalone front desk.
pub fn hospital_id_from_env_value(value: Option<String>) -> QueueResult<Uuid> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(raw) => Uuid::parse_str(&raw)
            .map_err(|e| QueueError::InvalidInput(format!("MEDQ_HOSPITAL_ID is not a UUID: {e}"))),
        None => Ok(Uuid::nil()),
    }
}
