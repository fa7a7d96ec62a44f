use std::sync::Arc;

use tracing::{debug, trace};

use crate::{error::SamplerError, sampler::Sampler};

pub type AgentId = usize;

/// An agent that does work: each step it adds `production` (scaled by one
/// draw from its sampler, when it has one) to the work done so far.
#[derive(Debug, Clone)]
pub struct ProductionAgent {
    id: AgentId,
    production: f64,
    work_to_date: f64,
    sampler: Option<Arc<dyn Sampler>>,
}

impl ProductionAgent {
    pub fn new(id: AgentId, production: f64, sampler: Option<Arc<dyn Sampler>>)->Self {
        debug!(id, production, sampler = ?sampler, "production agent initialized");
        ProductionAgent { id, production, work_to_date: 0.0, sampler }
    }

    pub fn id(&self)->AgentId {
        self.id
    }
    pub fn production(&self)->f64 {
        self.production
    }
    pub fn work_to_date(&self)->f64 {
        self.work_to_date
    }
    pub fn sampler(&self)->Option<&Arc<dyn Sampler>> {
        self.sampler.as_ref()
    }

    /// Do one step of work and return the amount added.
    /// A failed draw leaves `work_to_date` untouched.
    pub fn step(&mut self)->Result<f64, SamplerError> {
        let increment = match &self.sampler {
            Some(sampler) => self.production * sampler.sample()?,
            None => self.production,
        };
        self.work_to_date += increment;
        trace!(id = self.id, increment, work_to_date = self.work_to_date, "agent stepped");
        Ok(increment)
    }
}

#[cfg(test)]
mod test {
    use crate::{rng::set_sampler_seed, sampler::{BoundSampler, FnSampler}};

    use super::*;

    #[test]
    fn unsampled_agent_adds_production(){
        let mut a = ProductionAgent::new(0, 10.0, None);
        for _ in 0..5 {
            assert_eq!(a.step(), Ok(10.0));
        }
        assert_eq!(a.work_to_date(), 50.0);
    }

    #[test]
    fn sampled_step_is_scaled_by_draw(){
        set_sampler_seed(1);
        let mut a = ProductionAgent::new(3, 10.0, Some(BoundSampler::uniform(0.75, 1.25).shared()));
        let inc = a.step().unwrap();
        assert!((7.5..=12.5).contains(&inc));
        assert_eq!(a.work_to_date(), inc);
        assert_eq!(a.id(), 3);
    }

    #[test]
    fn fixed_closure_sampler(){
        let mut a = ProductionAgent::new(0, 4.0, Some(Arc::new(FnSampler::new("double", || Ok(2.0)))));
        a.step().unwrap();
        a.step().unwrap();
        assert_eq!(a.work_to_date(), 16.0);
    }

    #[test]
    fn failed_draw_leaves_total_alone(){
        let mut a = ProductionAgent::new(0, 10.0, Some(BoundSampler::uniform(2.0, 1.0).shared()));
        assert!(a.step().is_err());
        assert_eq!(a.work_to_date(), 0.0);
    }

    #[test]
    fn overflowing_range_never_reaches_total(){
        let mut a = ProductionAgent::new(0, 10.0, Some(BoundSampler::triangular(-f64::MAX, f64::MAX, 0.0).shared()));
        assert!(a.step().is_err());
        assert_eq!(a.work_to_date(), 0.0);
    }
}
