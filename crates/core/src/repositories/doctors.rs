//! Doctor directory.
//!
//! Doctors are registered once and then consumed read-only by queue views.
//! Storage mirrors the visit layout: one JSON document per doctor under
//! `<MEDQ_DATA_DIR>/doctors/`.

use crate::config::CoreConfig;
use crate::constants::RECORD_FILE_EXTENSION;
use crate::doctor::{Doctor, NewDoctor};
use crate::error::{QueueError, QueueResult};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Service for doctor registration and lookup.
#[derive(Clone, Debug)]
pub struct DoctorService {
    cfg: Arc<CoreConfig>,
}

impl DoctorService {
    /// Creates a new doctor service.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Register a doctor and persist the record.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::InvalidInput` when the name is blank, or a storage
    /// error if the record cannot be written.
    pub fn register(&self, new_doctor: NewDoctor) -> QueueResult<Doctor> {
        if new_doctor.name.trim().is_empty() {
            return Err(QueueError::InvalidInput("doctor name cannot be empty".into()));
        }

        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: new_doctor.name,
            specialization: new_doctor.specialization,
            status: new_doctor.status,
            average_consult_minutes: new_doctor.average_consult_minutes,
        };

        fs::create_dir_all(self.cfg.doctors_dir()).map_err(QueueError::StorageDirCreation)?;
        let contents =
            serde_json::to_string_pretty(&doctor).map_err(QueueError::Serialization)?;
        fs::write(self.doctor_path(doctor.id), contents).map_err(QueueError::FileWrite)?;

        tracing::info!(doctor_id = %doctor.id, name = %doctor.name, "registered doctor");
        Ok(doctor)
    }

    /// Read a single doctor by id.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::DoctorNotFound` if no record exists for `doctor_id`,
    /// or a storage error if the record cannot be read or parsed.
    pub fn get(&self, doctor_id: Uuid) -> QueueResult<Doctor> {
        let path = self.doctor_path(doctor_id);
        if !path.is_file() {
            return Err(QueueError::DoctorNotFound(doctor_id));
        }
        let contents = fs::read_to_string(&path).map_err(QueueError::FileRead)?;
        serde_json::from_str(&contents).map_err(QueueError::Deserialization)
    }

    /// List all registered doctors.
    ///
    /// Unparseable records are logged and skipped, matching the visit listing
    /// behaviour.
    pub fn list(&self) -> Vec<Doctor> {
        let mut doctors = Vec::new();

        let entries = match fs::read_dir(self.cfg.doctors_dir()) {
            Ok(it) => it,
            Err(_) => return doctors,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_FILE_EXTENSION) {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str::<Doctor>(&contents) {
                    Ok(doctor) => doctors.push(doctor),
                    Err(e) => {
                        tracing::warn!("failed to parse doctor {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("failed to read doctor {}: {e}", path.display());
                }
            }
        }

        doctors
    }

    fn doctor_path(&self, doctor_id: Uuid) -> PathBuf {
        self.cfg
            .doctors_dir()
            .join(format!("{}.{RECORD_FILE_EXTENSION}", doctor_id.simple()))
    }
}
