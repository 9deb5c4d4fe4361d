//! mc-results: completed-run records, retention policy and restart storage.

pub mod params;
pub mod record;
pub mod retention;
pub mod store;

pub use params::OutputParams;
pub use record::{RunRecord, SupercellMatrix, supercell_volume};
pub use retention::apply_retention;
pub use store::{COMPLETED_RUNS_FILE, RunRecordStore};

use std::path::PathBuf;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read completed runs from {path}: {message}")]
    RestartRead { path: PathBuf, message: String },

    #[error("Invalid run record: {what}")]
    InvalidRecord { what: &'static str },
}
