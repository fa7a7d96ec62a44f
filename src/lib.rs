pub mod rng;
pub mod error;
pub mod sampler;
pub mod agent;
pub mod config;
pub mod model;

pub use agent::{AgentId, ProductionAgent};
pub use config::ModelConfig;
pub use error::{ConfigError, ModelError, SamplerError};
pub use model::{ProductionModel, StepReport};
pub use rng::{current_seed, reseed_from_entropy, set_sampler_seed};
pub use sampler::{BoundSampler, Distribution, FnSampler, Sampler};
