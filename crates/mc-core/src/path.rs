//! Linear path through conditions space.

use crate::conditions::Conditions;
use crate::error::CoreResult;

/// A series of conditions `initial + k * increment` for `k = 0, 1, 2, ...`.
///
/// Compatibility of the two maps is checked once, at construction, so
/// [`ConditionsPath::at`] cannot fail on schema grounds afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsPath {
    initial: Conditions,
    increment: Conditions,
}

impl ConditionsPath {
    pub fn new(initial: Conditions, increment: Conditions) -> CoreResult<Self> {
        initial.check_compatible(&increment)?;
        initial.check_finite()?;
        increment.check_finite()?;
        Ok(Self { initial, increment })
    }

    pub fn initial(&self) -> &Conditions {
        &self.initial
    }

    pub fn increment(&self) -> &Conditions {
        &self.increment
    }

    /// Conditions for step `step_index`; step 0 is the unmodified initial
    /// conditions.
    pub fn at(&self, step_index: usize) -> CoreResult<Conditions> {
        if step_index == 0 {
            return Ok(self.initial.clone());
        }
        self.initial.incremented(&self.increment, step_index)
    }

    /// The first `n` points of the path.
    pub fn take(&self, n: usize) -> CoreResult<Vec<Conditions>> {
        (0..n).map(|k| self.at(k)).collect()
    }
}
