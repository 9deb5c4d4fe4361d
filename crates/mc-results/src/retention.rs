//! Retention step applied when a completed run joins a series.

use crate::params::OutputParams;
use crate::record::RunRecord;

/// Apply the retention policy to the previous (most recent) record and the
/// record being appended, in this order:
///
/// 1. the previous record loses its final state unless all final states are kept;
/// 2. the new record loses its initial state unless all initial states are kept;
/// 3. the new record loses its final state unless the last (or all) final
///    states are kept.
///
/// Under the default policy this leaves at most one final state in a series,
/// the one a dependent run or a restart needs.
pub fn apply_retention<C>(
    params: &OutputParams,
    previous: Option<RunRecord<C>>,
    mut new: RunRecord<C>,
) -> (Option<RunRecord<C>>, RunRecord<C>) {
    let previous = previous.map(|mut prev| {
        if !params.save_all_final_states {
            prev.clear_final_state();
        }
        prev
    });
    if !params.save_all_initial_states {
        new.clear_initial_state();
    }
    if !params.retains_last_final_state() {
        new.clear_final_state();
    }
    (previous, new)
}
