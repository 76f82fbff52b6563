//! Constants used throughout the MedQ core crate.
//!
//! This module contains all path and filename constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default directory for queue data storage when no explicit directory is configured.
pub const DEFAULT_QUEUE_DATA_DIR: &str = "queue_data";

/// Directory name for visit records storage.
pub const VISITS_DIR_NAME: &str = "visits";

/// Directory name for doctor records storage.
pub const DOCTORS_DIR_NAME: &str = "doctors";

/// File extension for stored records.
pub const RECORD_FILE_EXTENSION: &str = "json";
