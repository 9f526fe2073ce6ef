//! Top-level configuration file for the game binary.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::evolution::population::EvolutionParams;
use crate::simulation::error::{ConfigError, LoadError};
use crate::simulation::params::Params;

/// Everything a training session needs, loadable from one JSON file.
///
/// ```json
/// { "generations": 20, "simulation": { "rng_seed": 7 }, "evolution": { "population_size": 30 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum number of generations to evolve.
    pub generations: u32,
    /// Game parameters.
    pub simulation: Params,
    /// Evolutionary driver parameters.
    pub evolution: EvolutionParams,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generations: 50,
            simulation: Params::default(),
            evolution: EvolutionParams::default(),
        }
    }
}

impl AppConfig {
    /// Loads a configuration from JSON. Missing fields keep their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Validates both halves of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        self.evolution.validate()
    }
}
