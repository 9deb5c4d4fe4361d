//! mc-core: foundation types for Monte Carlo run series.
//!
//! Contains:
//! - conditions (named scalar/vector thermodynamic conditions)
//! - path (linear path through conditions space)
//! - state (configuration + conditions pair handed to the engine)
//! - numeric (tolerances + float helpers)
//! - error (shared error types)

pub mod conditions;
pub mod error;
pub mod numeric;
pub mod path;
pub mod state;

pub use conditions::{ConditionValue, Conditions};
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use path::ConditionsPath;
pub use state::SimulationState;
