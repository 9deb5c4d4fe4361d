//! Record of one completed Monte Carlo run.

use mc_core::{Conditions, SimulationState};
use serde::{Deserialize, Serialize};

use crate::{ResultsError, ResultsResult};

/// Integer transformation matrix `T` relating supercell lattice vectors `S`
/// to primitive lattice vectors `L` by `S = L T` (vectors as columns).
pub type SupercellMatrix = [[i64; 3]; 3];

/// Supercell volume as a multiple of the primitive cell, `|det T|`.
///
/// `None` if the determinant does not fit in an `i64`.
pub fn supercell_volume(t: &SupercellMatrix) -> Option<u64> {
    let minor = |a: usize, b: usize| {
        t[1][a]
            .checked_mul(t[2][b])?
            .checked_sub(t[1][b].checked_mul(t[2][a])?)
    };
    let det = t[0][0]
        .checked_mul(minor(1, 2)?)?
        .checked_sub(t[0][1].checked_mul(minor(0, 2)?)?)?
        .checked_add(t[0][2].checked_mul(minor(0, 1)?)?)?;
    Some(det.unsigned_abs())
}

/// Summary of one run in a series: where it ran, at what conditions, and
/// optionally the states it started from and finished in.
///
/// Which optional states survive is decided by the retention policy once the
/// record is appended to a series; after that the states can only be cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct RunRecord<C> {
    conditions: Conditions,
    transformation_matrix_to_supercell: SupercellMatrix,
    n_unitcells: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    initial_state: Option<SimulationState<C>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    final_state: Option<SimulationState<C>>,
}

impl<C> RunRecord<C> {
    pub fn new(
        transformation_matrix_to_supercell: SupercellMatrix,
        n_unitcells: u64,
        conditions: Conditions,
    ) -> ResultsResult<Self> {
        if n_unitcells == 0 {
            return Err(ResultsError::InvalidRecord {
                what: "n_unitcells must be positive",
            });
        }
        Ok(Self {
            conditions,
            transformation_matrix_to_supercell,
            n_unitcells,
            initial_state: None,
            final_state: None,
        })
    }

    /// Construct with `n_unitcells` computed from the transformation matrix.
    pub fn from_transform(
        transformation_matrix_to_supercell: SupercellMatrix,
        conditions: Conditions,
    ) -> ResultsResult<Self> {
        let n = supercell_volume(&transformation_matrix_to_supercell).ok_or(
            ResultsError::InvalidRecord {
                what: "supercell volume overflows",
            },
        )?;
        if n == 0 {
            return Err(ResultsError::InvalidRecord {
                what: "transformation matrix is singular",
            });
        }
        Self::new(transformation_matrix_to_supercell, n, conditions)
    }

    pub fn with_initial_state(mut self, state: SimulationState<C>) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn with_final_state(mut self, state: SimulationState<C>) -> Self {
        self.final_state = Some(state);
        self
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn transformation_matrix_to_supercell(&self) -> &SupercellMatrix {
        &self.transformation_matrix_to_supercell
    }

    pub fn n_unitcells(&self) -> u64 {
        self.n_unitcells
    }

    pub fn initial_state(&self) -> Option<&SimulationState<C>> {
        self.initial_state.as_ref()
    }

    pub fn final_state(&self) -> Option<&SimulationState<C>> {
        self.final_state.as_ref()
    }

    pub(crate) fn clear_initial_state(&mut self) {
        self.initial_state = None;
    }

    pub(crate) fn clear_final_state(&mut self) {
        self.final_state = None;
    }

    /// Borrowed view for writing, with states included only where requested.
    pub(crate) fn projected(&self, write_initial: bool, write_final: bool) -> RunRecordView<'_, C> {
        RunRecordView {
            conditions: &self.conditions,
            transformation_matrix_to_supercell: &self.transformation_matrix_to_supercell,
            n_unitcells: self.n_unitcells,
            initial_state: self.initial_state.as_ref().filter(|_| write_initial),
            final_state: self.final_state.as_ref().filter(|_| write_final),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct RunRecordView<'a, C> {
    conditions: &'a Conditions,
    transformation_matrix_to_supercell: &'a SupercellMatrix,
    n_unitcells: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_state: Option<&'a SimulationState<C>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_state: Option<&'a SimulationState<C>>,
}
