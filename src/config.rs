//! Model configuration, loadable from JSON.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, sampler::Distribution};

/// Everything needed to build and run a [`crate::model::ProductionModel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Number of agents to create.
    pub num_agents: usize,
    /// Production rate given to every agent.
    pub default_production: f64,
    /// Distribution scaling each step's production. `None` = unscaled.
    pub sampler: Option<Distribution>,
    /// Seed for the sampling generator. `None` = entropy.
    pub seed: Option<u64>,
    /// Steps to run.
    pub steps: u64,
}

impl Default for ModelConfig {
    fn default()->Self {
        Self {
            num_agents: 1,
            default_production: 10.0,
            sampler: None,
            seed: None,
            steps: 5,
        }
    }
}

impl ModelConfig {
    pub fn from_json_str(s: &str)->Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>)->Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw)
    }
}
