//! Run series state generation for Monte Carlo calculations.
//!
//! Provides:
//! - `StateGenerator`: initial states along a linear path in conditions space,
//!   with dependent runs and restart support
//! - Capability traits for the configuration provider, state modifiers and
//!   the sampling engine
//! - `SeriesParams`: series input file (YAML or JSON)
//! - `run_series`: sequential driver with checkpoint-after-append

pub mod capability;
pub mod config;
pub mod driver;
pub mod error;
pub mod generator;

pub use capability::{
    ConfigProvider, FixedConfigProvider, ModifierFn, ProviderFn, StateModifier, modifier_fn,
    provider_fn,
};
pub use config::{SeriesParams, load_json, load_series, load_yaml};
pub use driver::{SeriesEngine, run_series};
pub use error::{SeriesError, SeriesResult};
pub use generator::{SeriesPhase, StateGenerator};

// Re-exports so downstream code needs only this crate.
pub use mc_core::{ConditionValue, Conditions, ConditionsPath, SimulationState, Tolerances};
pub use mc_results::{OutputParams, RunRecord, RunRecordStore, SupercellMatrix};
