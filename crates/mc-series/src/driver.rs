//! Sequential driver for a run series.

use mc_core::SimulationState;
use mc_results::RunRecord;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SeriesError;
use crate::generator::StateGenerator;

/// The sampling engine: runs one state to completion and reports the run.
///
/// The returned record should carry the final state when runs are dependent
/// or restarts are wanted.
pub trait SeriesEngine<C, E> {
    fn run(&mut self, state: SimulationState<C>) -> Result<RunRecord<C>, E>;
}

/// Run a series to completion, resuming from `completed_runs.json` if one
/// exists.
///
/// Each completed run is appended and immediately written, so an
/// interruption loses at most the run in flight. Returns the number of runs
/// executed by this call.
pub fn run_series<C, E, G>(generator: &mut StateGenerator<C, E>, engine: &mut G) -> Result<usize, E>
where
    C: Clone + Serialize + DeserializeOwned,
    E: From<SeriesError>,
    G: SeriesEngine<C, E>,
{
    generator.read_completed_runs()?;
    let resumed_at = generator.n_completed_runs();
    if resumed_at > 0 {
        tracing::info!(resumed_at, n_states = generator.n_states(), "resuming series");
    }

    let mut n_run = 0;
    while !generator.is_complete() {
        let state = generator.next_state()?;
        let record = engine.run(state)?;
        generator.append(record)?;
        generator.write_completed_runs()?;
        n_run += 1;
        tracing::info!(
            run = generator.n_completed_runs(),
            n_states = generator.n_states(),
            "run complete"
        );
    }
    Ok(n_run)
}
