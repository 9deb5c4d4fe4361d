//! Capabilities supplied by the caller: configuration provider and state
//! modifiers.

use mc_core::{Conditions, SimulationState};
use mc_results::RunRecord;

/// Produces the configuration for a run that does not inherit one.
///
/// Called for the first run of every series, and for every run when runs
/// are independent. Errors are returned to the caller unchanged.
pub trait ConfigProvider<C, E> {
    fn make_config(
        &mut self,
        conditions: &Conditions,
        completed_runs: &[RunRecord<C>],
    ) -> Result<C, E>;
}

/// Adjusts a generated state before it is handed out, e.g. to set
/// conditions that depend on the configuration.
///
/// Modifiers run in registration order; the first error aborts state
/// generation.
pub trait StateModifier<C, E> {
    /// Name used in logs.
    fn name(&self) -> &str {
        "anonymous"
    }

    fn modify(&mut self, state: &mut SimulationState<C>) -> Result<(), E>;
}

/// Returns a clone of the same configuration for every run.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedConfigProvider<C> {
    configuration: C,
}

impl<C> FixedConfigProvider<C> {
    pub fn new(configuration: C) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &C {
        &self.configuration
    }
}

impl<C: Clone, E> ConfigProvider<C, E> for FixedConfigProvider<C> {
    fn make_config(
        &mut self,
        _conditions: &Conditions,
        _completed: &[RunRecord<C>],
    ) -> Result<C, E> {
        Ok(self.configuration.clone())
    }
}

/// Closure adapter for [`ConfigProvider`]; see [`provider_fn`].
pub struct ProviderFn<F>(F);

/// Wrap a closure as a [`ConfigProvider`].
pub fn provider_fn<C, E, F>(f: F) -> ProviderFn<F>
where
    F: FnMut(&Conditions, &[RunRecord<C>]) -> Result<C, E>,
{
    ProviderFn(f)
}

impl<C, E, F> ConfigProvider<C, E> for ProviderFn<F>
where
    F: FnMut(&Conditions, &[RunRecord<C>]) -> Result<C, E>,
{
    fn make_config(&mut self, conditions: &Conditions, completed: &[RunRecord<C>]) -> Result<C, E> {
        (self.0)(conditions, completed)
    }
}

/// Closure adapter for [`StateModifier`]; see [`modifier_fn`].
pub struct ModifierFn<F> {
    name: String,
    f: F,
}

/// Wrap a named closure as a [`StateModifier`].
pub fn modifier_fn<C, E, F>(name: impl Into<String>, f: F) -> ModifierFn<F>
where
    F: FnMut(&mut SimulationState<C>) -> Result<(), E>,
{
    ModifierFn {
        name: name.into(),
        f,
    }
}

impl<C, E, F> StateModifier<C, E> for ModifierFn<F>
where
    F: FnMut(&mut SimulationState<C>) -> Result<(), E>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn modify(&mut self, state: &mut SimulationState<C>) -> Result<(), E> {
        (self.f)(state)
    }
}
