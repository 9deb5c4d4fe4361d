//! Incremental-conditions state generator.

use std::fmt;

use mc_core::{Conditions, ConditionsPath, SimulationState};
use mc_results::{OutputParams, RunRecord, RunRecordStore, apply_retention};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::capability::{ConfigProvider, StateModifier};
use crate::error::{SeriesError, SeriesResult};

/// Progress of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesPhase {
    /// No run completed yet.
    Empty,
    /// At least one run completed, more to go.
    Accumulating,
    /// All `n_states` runs completed.
    Complete,
}

/// Generates the initial state for each run of a series along a linear path
/// in conditions space, and keeps the record of completed runs.
///
/// Run `k` is sampled at `initial + k * increment`, where `k` is the number
/// of completed runs. With dependent runs, every run after the first starts
/// from the final configuration of the previous run; otherwise, and always
/// for the first run, the configuration comes from the provider.
///
/// `E` is the caller's error type. Provider and modifier errors are passed
/// through untouched; series errors are converted with `From<SeriesError>`.
pub struct StateGenerator<C, E = SeriesError> {
    output_params: OutputParams,
    path: ConditionsPath,
    n_states: usize,
    dependent_runs: bool,
    config_provider: Box<dyn ConfigProvider<C, E>>,
    modifiers: Vec<Box<dyn StateModifier<C, E>>>,
    completed_runs: Vec<RunRecord<C>>,
}

impl<C, E> StateGenerator<C, E>
where
    C: Clone,
    E: From<SeriesError>,
{
    /// Create a generator. Fails if the initial conditions and the increment
    /// do not have the same schema.
    pub fn new<P>(
        output_params: OutputParams,
        initial_conditions: Conditions,
        conditions_increment: Conditions,
        n_states: usize,
        config_provider: P,
        dependent_runs: bool,
    ) -> SeriesResult<Self>
    where
        P: ConfigProvider<C, E> + 'static,
    {
        let path = ConditionsPath::new(initial_conditions, conditions_increment)?;
        if dependent_runs && !output_params.retains_last_final_state() && n_states > 1 {
            tracing::warn!(
                "dependent runs requested but the final state is not retained; \
                 the second state cannot be generated"
            );
        }
        Ok(Self {
            output_params,
            path,
            n_states,
            dependent_runs,
            config_provider: Box::new(config_provider),
            modifiers: Vec::new(),
            completed_runs: Vec::new(),
        })
    }

    /// Register a modifier; modifiers run in registration order.
    pub fn with_modifier<M>(mut self, modifier: M) -> Self
    where
        M: StateModifier<C, E> + 'static,
    {
        self.modifiers.push(Box::new(modifier));
        self
    }

    /// True once all requested runs are completed.
    pub fn is_complete(&self) -> bool {
        self.completed_runs.len() == self.n_states
    }

    pub fn phase(&self) -> SeriesPhase {
        if self.is_complete() {
            SeriesPhase::Complete
        } else if self.completed_runs.is_empty() {
            SeriesPhase::Empty
        } else {
            SeriesPhase::Accumulating
        }
    }

    /// Construct the state for the next run.
    ///
    /// Does not change the list of completed runs; calling it twice without
    /// an `append` in between builds two independent states.
    pub fn next_state(&mut self) -> Result<SimulationState<C>, E> {
        if self.is_complete() {
            return Err(SeriesError::SequenceComplete {
                n_states: self.n_states,
            }
            .into());
        }

        let step = self.completed_runs.len();
        let conditions = self.path.at(step).map_err(SeriesError::from)?;

        let configuration = match self.completed_runs.last() {
            Some(last) if self.dependent_runs => match last.final_state() {
                Some(final_state) => final_state.configuration.clone(),
                None => {
                    return Err(SeriesError::MissingFinalState {
                        run_index: step - 1,
                    }
                    .into());
                }
            },
            _ => self
                .config_provider
                .make_config(&conditions, &self.completed_runs)?,
        };

        let mut state = SimulationState::new(configuration, conditions);
        for modifier in &mut self.modifiers {
            tracing::debug!(modifier = modifier.name(), step, "applying state modifier");
            modifier.modify(&mut state)?;
        }

        tracing::debug!(step, conditions = %state.conditions, "generated state");
        Ok(state)
    }

    /// Record a completed run, applying the retention policy to it and to
    /// the run it supersedes.
    pub fn append(&mut self, run: RunRecord<C>) -> SeriesResult<()> {
        if self.is_complete() {
            return Err(SeriesError::SequenceComplete {
                n_states: self.n_states,
            });
        }
        let previous = self.completed_runs.pop();
        let (previous, run) = apply_retention(&self.output_params, previous, run);
        self.completed_runs.extend(previous);
        self.completed_runs.push(run);
        tracing::debug!(
            n_completed = self.completed_runs.len(),
            n_states = self.n_states,
            "appended completed run"
        );
        Ok(())
    }
}

impl<C, E> StateGenerator<C, E> {
    pub fn completed_runs(&self) -> &[RunRecord<C>] {
        &self.completed_runs
    }

    pub fn n_completed_runs(&self) -> usize {
        self.completed_runs.len()
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn dependent_runs(&self) -> bool {
        self.dependent_runs
    }

    pub fn output_params(&self) -> &OutputParams {
        &self.output_params
    }

    pub fn conditions_path(&self) -> &ConditionsPath {
        &self.path
    }

    fn store(&self) -> RunRecordStore {
        RunRecordStore::from_params(&self.output_params)
    }

    /// Replace the completed runs with those persisted in
    /// `output_dir/completed_runs.json`.
    ///
    /// A no-op if `output_dir` is unset or the file does not exist. On any
    /// error the in-memory list is left as it was.
    pub fn read_completed_runs(&mut self) -> SeriesResult<()>
    where
        C: DeserializeOwned,
    {
        let Some(records) = self.store().read::<C>()? else {
            return Ok(());
        };
        if records.len() > self.n_states {
            return Err(SeriesError::RestartOverflow {
                found: records.len(),
                n_states: self.n_states,
            });
        }
        tracing::info!(
            n_completed = records.len(),
            n_states = self.n_states,
            "restarting series"
        );
        self.completed_runs = records;
        Ok(())
    }

    /// Write all completed runs to `output_dir/completed_runs.json`.
    ///
    /// A no-op if `output_dir` is unset. The caller is expected to call this
    /// after every `append` to keep the restart file current.
    pub fn write_completed_runs(&self) -> SeriesResult<()>
    where
        C: Serialize,
    {
        self.store().write(&self.completed_runs, &self.output_params)?;
        Ok(())
    }
}

impl<C, E> fmt::Debug for StateGenerator<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateGenerator")
            .field("n_states", &self.n_states)
            .field("n_completed_runs", &self.completed_runs.len())
            .field("dependent_runs", &self.dependent_runs)
            .field("n_modifiers", &self.modifiers.len())
            .finish()
    }
}
