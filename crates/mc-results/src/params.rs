//! Parameters controlling which run states are kept and written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::store::COMPLETED_RUNS_FILE;

/// Retention and output policy for completed runs.
///
/// The data kept here decides whether a series can be restarted: at least the
/// last final state must be kept for dependent runs to continue.
///
/// Absent keys take their default when parsed; unknown keys are an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputParams {
    /// Keep the initial state of every completed run.
    pub save_all_initial_states: bool,
    /// Keep the final state of every completed run.
    pub save_all_final_states: bool,
    /// Keep the final state of the most recent run (enables restarts).
    pub save_last_final_state: bool,
    /// Write kept initial states to `completed_runs.json`.
    pub write_initial_states: bool,
    /// Write kept final states to `completed_runs.json`.
    pub write_final_states: bool,
    /// Directory for `completed_runs.json`; nothing is persisted if unset.
    pub output_dir: Option<PathBuf>,
}

impl Default for OutputParams {
    fn default() -> Self {
        Self {
            save_all_initial_states: false,
            save_all_final_states: false,
            save_last_final_state: true,
            write_initial_states: false,
            write_final_states: false,
            output_dir: None,
        }
    }
}

impl OutputParams {
    /// In-memory only policy with the default retention flags.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// True if the most recent run keeps its final state after `append`.
    pub fn retains_last_final_state(&self) -> bool {
        self.save_last_final_state || self.save_all_final_states
    }

    pub fn completed_runs_path(&self) -> Option<PathBuf> {
        self.output_dir
            .as_ref()
            .map(|dir| dir.join(COMPLETED_RUNS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_for_absent_keys() {
        let params: OutputParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, OutputParams::default());
        assert!(params.save_last_final_state);
        assert!(!params.write_final_states);
        assert!(params.output_dir.is_none());
        assert!(params.completed_runs_path().is_none());
    }

    #[test]
    fn partial_keys_override_defaults() {
        let params: OutputParams = serde_json::from_str(
            r#"{"save_last_final_state": false, "write_final_states": true, "output_dir": "out"}"#,
        )
        .unwrap();
        assert!(!params.save_last_final_state);
        assert!(params.write_final_states);
        assert_eq!(
            params.completed_runs_path(),
            Some(PathBuf::from("out").join("completed_runs.json"))
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = serde_json::from_str::<OutputParams>(r#"{"save_last_final_states": true}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn serialized_keys() {
        let json = serde_json::to_value(OutputParams::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "save_all_initial_states": false,
                "save_all_final_states": false,
                "save_last_final_state": true,
                "write_initial_states": false,
                "write_final_states": false,
                "output_dir": null
            })
        );
    }

    #[test]
    fn last_final_state_retention() {
        let mut params = OutputParams::in_memory();
        assert!(params.retains_last_final_state());
        params.save_last_final_state = false;
        assert!(!params.retains_last_final_state());
        params.save_all_final_states = true;
        assert!(params.retains_last_final_state());
    }
}
