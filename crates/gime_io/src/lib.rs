//! gime_io — dataset provider boundary.
//!
//! The engine core deliberately does not validate its inputs (degenerate
//! data produces degenerate, well-defined outputs); this crate is where
//! malformed datasets are caught. It reads scenario JSON files — district
//! name, seat count, party→votes mapping — validates them, and hands typed
//! `gime_core` districts to the pipeline. No network I/O.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for gime_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors.
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON deserialization errors.
    #[error("json error: {0}")]
    Json(String),

    /// Scenario-level validation failures (duplicates, zero seats, …).
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json(e.to_string())
    }
}

pub mod loader;

pub use loader::{load_scenario, parse_scenario, Scenario};
