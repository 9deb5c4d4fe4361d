//! Error types for run series operations.

use std::path::PathBuf;

use mc_core::CoreError;
use mc_results::ResultsError;
use thiserror::Error;

/// Errors raised by the series itself.
///
/// Failures of caller-supplied collaborators (configuration provider,
/// modifiers, engine) are not represented here; they reach the caller as
/// the caller's own error type.
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Results(#[from] ResultsError),

    #[error(
        "Dependent runs need the final state of run {run_index}, but it was not retained \
         (set save_last_final_state or save_all_final_states)"
    )]
    MissingFinalState { run_index: usize },

    #[error("Series is complete: all {n_states} states have been run")]
    SequenceComplete { n_states: usize },

    #[error("Restart file holds {found} completed runs, but the series has only {n_states} states")]
    RestartOverflow { found: usize, n_states: usize },

    #[error("Failed to read series file {path}: {source}")]
    ParamsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SeriesResult<T> = Result<T, SeriesError>;
