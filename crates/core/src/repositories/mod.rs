//! Repository management modules.
//!
//! This module contains the injectable state-layer services the queue engine
//! is driven through: visit ingestion/transitions and the read-only doctor
//! directory.

pub mod doctors;
pub mod visits;
