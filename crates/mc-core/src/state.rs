//! Monte Carlo state handed to the sampling engine.

use serde::{Deserialize, Serialize};

use crate::conditions::Conditions;

/// A configuration paired with the conditions it should be sampled at.
///
/// The configuration type is opaque here; it is only moved, cloned and
/// (de)serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState<C> {
    pub configuration: C,
    pub conditions: Conditions,
}

impl<C> SimulationState<C> {
    pub fn new(configuration: C, conditions: Conditions) -> Self {
        Self {
            configuration,
            conditions,
        }
    }

    pub fn into_configuration(self) -> C {
        self.configuration
    }
}
