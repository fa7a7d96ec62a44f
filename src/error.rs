use std::{io, path::PathBuf};

use thiserror::Error;

use crate::agent::AgentId;

/// Errors raised while drawing from a sampler
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SamplerError {
    /// The bound parameters do not describe a valid distribution
    #[error("invalid {kind} parameters: {reason}")]
    InvalidParameters { kind: &'static str, reason: String },
}

impl SamplerError {
    pub fn invalid(kind: &'static str, reason: impl Into<String>)->Self {
        SamplerError::InvalidParameters { kind, reason: reason.into() }
    }
}

/// Errors raised while advancing a model
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("agent {agent} failed during step {step}: {source}")]
    Sampler {
        agent: AgentId,
        step: u64,
        #[source]
        source: SamplerError,
    },
}

/// Errors raised while loading a model configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}
