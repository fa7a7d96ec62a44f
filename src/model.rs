use std::{fmt, sync::Arc};

use tracing::{info, warn};

use crate::{
    agent::ProductionAgent,
    config::ModelConfig,
    error::ModelError,
    rng::set_sampler_seed,
    sampler::{BoundSampler, Sampler},
};

/// Totals reported after one model step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub step: u64,
    pub total_production: f64,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "Step {}, Production to date: {:.0}", self.step, self.total_production)
    }
}

/// Owns a set of production agents and advances them in lockstep.
///
/// The sampler is chosen here, once, and handed to every agent. Changing the
/// distribution means passing a different sampler in; agents are unaffected.
#[derive(Debug, Clone)]
pub struct ProductionModel {
    agents: Vec<ProductionAgent>,
    num_steps: u64,
}

impl ProductionModel {
    pub fn new(num_agents: usize, default_production: f64, sampler: Option<Arc<dyn Sampler>>)->Self {
        let agents = (0..num_agents)
            .map(|id| ProductionAgent::new(id, default_production, sampler.clone()))
            .collect();
        ProductionModel { agents, num_steps: 0 }
    }

    /// Build from config, seeding the sampling generator first if asked to
    pub fn from_config(config: &ModelConfig)->Self {
        if let Some(seed) = config.seed {
            set_sampler_seed(seed);
        }
        let sampler = config.sampler.map(|d| BoundSampler::from(d).shared());
        Self::new(config.num_agents, config.default_production, sampler)
    }

    pub fn agents(&self)->&[ProductionAgent] {
        &self.agents
    }
    pub fn num_steps(&self)->u64 {
        self.num_steps
    }
    pub fn total_production(&self)->f64 {
        self.agents.iter().map(|a| a.work_to_date()).sum()
    }

    /// Advance every agent once and report the new total.
    ///
    /// A failed draw stops the step there; agents already stepped keep their work.
    pub fn step(&mut self)->Result<StepReport, ModelError> {
        self.num_steps += 1;
        let step = self.num_steps;
        for agent in self.agents.iter_mut() {
            if let Err(source) = agent.step() {
                warn!(agent = agent.id(), step, error = %source, "agent step failed");
                return Err(ModelError::Sampler { agent: agent.id(), step, source });
            }
        }
        let report = StepReport { step, total_production: self.total_production() };
        info!("{report}");
        Ok(report)
    }

    pub fn run(&mut self, steps: u64)->Result<Vec<StepReport>, ModelError> {
        (0..steps).map(|_| self.step()).collect()
    }
}
