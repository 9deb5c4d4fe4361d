//! Restart storage for the completed runs of a series.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::params::OutputParams;
use crate::record::RunRecord;
use crate::{ResultsError, ResultsResult};

/// File name of the completed-runs list inside the output directory.
pub const COMPLETED_RUNS_FILE: &str = "completed_runs.json";

/// Reads and writes `<output_dir>/completed_runs.json`.
///
/// With no output directory every operation is a no-op and the series lives
/// in memory only.
#[derive(Debug, Clone, Default)]
pub struct RunRecordStore {
    output_dir: Option<PathBuf>,
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ResultsError {
    let path = path.to_path_buf();
    move |source| ResultsError::Io { path, source }
}

impl RunRecordStore {
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self { output_dir }
    }

    pub fn from_params(params: &OutputParams) -> Self {
        Self::new(params.output_dir.clone())
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.output_dir.as_ref().map(|dir| dir.join(COMPLETED_RUNS_FILE))
    }

    /// Read the persisted runs.
    ///
    /// Returns `Ok(None)` if no output directory is set or the file does not
    /// exist yet (a fresh series). Any failure to read or parse an existing
    /// file is a [`ResultsError::RestartRead`] naming the file.
    pub fn read<C: DeserializeOwned>(&self) -> ResultsResult<Option<Vec<RunRecord<C>>>> {
        let Some(path) = self.path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no completed runs file, starting fresh");
            return Ok(None);
        }

        let restart_err = |message: String| ResultsError::RestartRead {
            path: path.clone(),
            message,
        };
        let content = fs::read_to_string(&path).map_err(|e| restart_err(e.to_string()))?;
        let records: Vec<RunRecord<C>> =
            serde_json::from_str(&content).map_err(|e| restart_err(e.to_string()))?;
        if let Some(index) = records.iter().position(|r| r.n_unitcells() == 0) {
            return Err(restart_err(format!("run {index}: n_unitcells must be positive")));
        }

        tracing::info!(path = %path.display(), n_runs = records.len(), "read completed runs");
        Ok(Some(records))
    }

    /// Write all `records`, replacing the previous file.
    ///
    /// States are written only if the matching `write_*_states` flag is set
    /// and the record still holds them. The file is written to a temporary
    /// sibling and renamed into place, so an interrupted write leaves the
    /// previous checkpoint intact.
    pub fn write<C: Serialize>(
        &self,
        records: &[RunRecord<C>],
        params: &OutputParams,
    ) -> ResultsResult<()> {
        let (Some(dir), Some(path)) = (self.output_dir.as_ref(), self.path()) else {
            return Ok(());
        };
        fs::create_dir_all(dir).map_err(io_err(dir))?;

        let views: Vec<_> = records
            .iter()
            .map(|r| r.projected(params.write_initial_states, params.write_final_states))
            .collect();
        let bytes = serde_json::to_vec_pretty(&views)?;

        let tmp = path.with_file_name(format!(".{COMPLETED_RUNS_FILE}.tmp"));
        let mut file = fs::File::create(&tmp).map_err(io_err(&tmp))?;
        file.write_all(&bytes).map_err(io_err(&tmp))?;
        file.sync_all().map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;

        tracing::info!(path = %path.display(), n_runs = records.len(), "wrote completed runs");
        Ok(())
    }
}
