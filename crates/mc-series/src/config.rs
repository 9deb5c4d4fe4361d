//! Series input file.

use std::path::Path;

use mc_core::{Conditions, ConditionsPath};
use mc_results::OutputParams;
use serde::{Deserialize, Serialize};

use crate::capability::ConfigProvider;
use crate::error::{SeriesError, SeriesResult};
use crate::generator::StateGenerator;

/// Parameters of one run series, as read from a YAML or JSON file.
///
/// ```yaml
/// output:
///   save_last_final_state: true
///   write_final_states: true
///   output_dir: output
/// initial_conditions:
///   temperature: 300.0
///   param_chem_pot: [-1.0]
/// conditions_increment:
///   temperature: 0.0
///   param_chem_pot: [0.5]
/// n_states: 9
/// dependent_runs: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesParams {
    #[serde(default)]
    pub output: OutputParams,
    pub initial_conditions: Conditions,
    pub conditions_increment: Conditions,
    pub n_states: usize,
    #[serde(default = "default_dependent_runs")]
    pub dependent_runs: bool,
}

fn default_dependent_runs() -> bool {
    true
}

impl SeriesParams {
    /// Build and check the conditions path.
    pub fn conditions_path(&self) -> SeriesResult<ConditionsPath> {
        Ok(ConditionsPath::new(
            self.initial_conditions.clone(),
            self.conditions_increment.clone(),
        )?)
    }

    pub fn validate(&self) -> SeriesResult<()> {
        self.conditions_path().map(|_| ())
    }

    /// Construct the generator described by these parameters.
    pub fn into_generator<C, E, P>(self, config_provider: P) -> SeriesResult<StateGenerator<C, E>>
    where
        C: Clone,
        E: From<SeriesError>,
        P: ConfigProvider<C, E> + 'static,
    {
        StateGenerator::new(
            self.output,
            self.initial_conditions,
            self.conditions_increment,
            self.n_states,
            config_provider,
            self.dependent_runs,
        )
    }

    /// Resolve a relative `output_dir` against `base`.
    fn resolve_output_dir(&mut self, base: &Path) {
        if let Some(dir) = self.output.output_dir.as_mut()
            && dir.is_relative()
        {
            *dir = base.join(&*dir);
        }
    }
}

fn read_file(path: &Path) -> SeriesResult<String> {
    std::fs::read_to_string(path).map_err(|source| SeriesError::ParamsRead {
        path: path.to_path_buf(),
        source,
    })
}

fn finish(mut params: SeriesParams, path: &Path) -> SeriesResult<SeriesParams> {
    params.validate()?;
    if let Some(base) = path.parent() {
        params.resolve_output_dir(base);
    }
    Ok(params)
}

pub fn load_yaml(path: &Path) -> SeriesResult<SeriesParams> {
    let content = read_file(path)?;
    let params: SeriesParams = serde_yaml::from_str(&content)?;
    finish(params, path)
}

pub fn load_json(path: &Path) -> SeriesResult<SeriesParams> {
    let content = read_file(path)?;
    let params: SeriesParams = serde_json::from_str(&content)?;
    finish(params, path)
}

/// Load by extension: `.json` is JSON, anything else is YAML.
pub fn load_series(path: &Path) -> SeriesResult<SeriesParams> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
