//! Pre-bound samplers.
//!
//! A [`Sampler`] is a zero-argument source of `f64` draws. The distribution and
//! its parameters are fixed when the sampler is built, so the code calling
//! `sample()` never needs to know which distribution it is drawing from.

use std::{fmt, sync::Arc};

use rand::distributions::Uniform;
use rand_distr::{Distribution as _, Normal, Triangular};
use serde::{Deserialize, Serialize};

use crate::{error::SamplerError, rng::with_rng};

/// A zero-argument callable producing one fresh draw per call
pub trait Sampler
    where Self: Send + Sync + fmt::Debug {
    fn sample(&self)->Result<f64, SamplerError>;
}

/// The supported distributions together with their fixed parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    /// Uniform over `[low, high]`
    Uniform { low: f64, high: f64 },
    /// Triangular over `[low, high]` peaking at `mode`
    Triangular { low: f64, high: f64, mode: f64 },
    Normal { mean: f64, std_dev: f64 },
}

impl Distribution {
    pub fn name(&self)->&'static str {
        match self {
            Distribution::Uniform { .. } => "uniform",
            Distribution::Triangular { .. } => "triangular",
            Distribution::Normal { .. } => "normal",
        }
    }

    /// Closed support of the distribution, `None` when unbounded
    pub fn bounds(&self)->Option<(f64, f64)> {
        match *self {
            Distribution::Uniform { low, high } => Some((low, high)),
            Distribution::Triangular { low, high, .. } => Some((low, high)),
            Distribution::Normal { .. } => None,
        }
    }

    /// Check the parameters. Only called at draw time.
    pub fn validate(&self)->Result<(), SamplerError> {
        let kind = self.name();
        match *self {
            Distribution::Uniform { low, high } => {
                check_finite(kind, &[("low", low), ("high", high)])?;
                if low > high {
                    return Err(SamplerError::invalid(kind, format!("low ({low}) is greater than high ({high})")));
                }
                check_range(kind, low, high)
            },
            Distribution::Triangular { low, high, mode } => {
                check_finite(kind, &[("low", low), ("high", high), ("mode", mode)])?;
                if low > high {
                    return Err(SamplerError::invalid(kind, format!("low ({low}) is greater than high ({high})")));
                }
                if mode < low || mode > high {
                    return Err(SamplerError::invalid(kind, format!("mode ({mode}) lies outside [{low}, {high}]")));
                }
                check_range(kind, low, high)
            },
            Distribution::Normal { mean, std_dev } => {
                check_finite(kind, &[("mean", mean), ("std_dev", std_dev)])?;
                if std_dev < 0.0 {
                    return Err(SamplerError::invalid(kind, format!("std_dev ({std_dev}) is negative")));
                }
                Ok(())
            },
        }
    }

    fn draw(&self)->Result<f64, SamplerError> {
        self.validate()?;
        let kind = self.name();
        let x = match *self {
            Distribution::Uniform { low, high } => {
                if low == high {
                    return Ok(low);
                }
                let dist = Uniform::new_inclusive(low, high);
                with_rng(|rng| dist.sample(rng))
            },
            Distribution::Triangular { low, high, mode } => {
                if low == high {
                    return Ok(low);
                }
                let dist = Triangular::new(low, high, mode)
                    .map_err(|err| SamplerError::invalid(kind, err.to_string()))?;
                with_rng(|rng| dist.sample(rng))
            },
            Distribution::Normal { mean, std_dev } => {
                let dist = Normal::new(mean, std_dev)
                    .map_err(|err| SamplerError::invalid(kind, err.to_string()))?;
                with_rng(|rng| dist.sample(rng))
            },
        };
        if !x.is_finite() {
            return Err(SamplerError::invalid(kind, format!("draw ({x}) is not finite")));
        }
        Ok(x)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            Distribution::Uniform { low, high } => write!(f, "uniform(low={low}, high={high})"),
            Distribution::Triangular { low, high, mode } => write!(f, "triangular(low={low}, high={high}, mode={mode})"),
            Distribution::Normal { mean, std_dev } => write!(f, "normal(mean={mean}, std_dev={std_dev})"),
        }
    }
}

/// Span must survive rand's `(high - low) / (1 - 2^-52)` scaling
fn check_range(kind: &'static str, low: f64, high: f64)->Result<(), SamplerError> {
    if !((high - low) / (1.0 - f64::EPSILON)).is_finite() {
        return Err(SamplerError::invalid(kind, format!("range [{low}, {high}] overflows f64")));
    }
    Ok(())
}

fn check_finite(kind: &'static str, params: &[(&str, f64)])->Result<(), SamplerError> {
    for (name, value) in params {
        if !value.is_finite() {
            return Err(SamplerError::invalid(kind, format!("{name} ({value}) is not finite")));
        }
    }
    Ok(())
}

/// A distribution bound to its parameters. Binding never fails; bad parameters
/// surface on the first `sample()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundSampler {
    distribution: Distribution,
}

impl BoundSampler {
    pub fn new(distribution: Distribution)->Self {
        BoundSampler { distribution }
    }
    pub fn uniform(low: f64, high: f64)->Self {
        Self::new(Distribution::Uniform { low, high })
    }
    pub fn triangular(low: f64, high: f64, mode: f64)->Self {
        Self::new(Distribution::Triangular { low, high, mode })
    }
    pub fn normal(mean: f64, std_dev: f64)->Self {
        Self::new(Distribution::Normal { mean, std_dev })
    }
    pub fn distribution(&self)->&Distribution {
        &self.distribution
    }
    /// Wrap in a shared handle that agents can hold
    pub fn shared(self)->Arc<dyn Sampler> {
        Arc::new(self)
    }
}

impl From<Distribution> for BoundSampler {
    fn from(distribution: Distribution)->Self {
        BoundSampler::new(distribution)
    }
}

impl Sampler for BoundSampler {
    fn sample(&self)->Result<f64, SamplerError> {
        self.distribution.draw()
    }
}

/// Closure rendition of a bound sampler
pub struct FnSampler<F> {
    label: String,
    func: F,
}

impl<F> FnSampler<F>
    where F: Fn()->Result<f64, SamplerError> + Send + Sync {
    pub fn new(label: impl Into<String>, func: F)->Self {
        FnSampler { label: label.into(), func }
    }
}

impl<F> fmt::Debug for FnSampler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        f.debug_struct("FnSampler").field("label", &self.label).finish()
    }
}

impl<F> Sampler for FnSampler<F>
    where F: Fn()->Result<f64, SamplerError> + Send + Sync {
    fn sample(&self)->Result<f64, SamplerError> {
        (self.func)()
    }
}

#[cfg(test)]
mod test {
    use crate::rng::set_sampler_seed;

    use super::*;

    #[test]
    fn uniform_draws_stay_in_bounds(){
        set_sampler_seed(11);
        let s = BoundSampler::uniform(0.75, 1.25);
        for _ in 0..1_000 {
            let x = s.sample().unwrap();
            assert!((0.75..=1.25).contains(&x), "{x} out of range");
        }
    }

    #[test]
    fn triangular_draws_stay_in_bounds(){
        set_sampler_seed(12);
        let s = BoundSampler::triangular(0.75, 1.25, 1.0);
        for _ in 0..1_000 {
            let x = s.sample().unwrap();
            assert!((0.75..=1.25).contains(&x), "{x} out of range");
        }
    }

    #[test]
    fn repeated_draws_are_independent(){
        set_sampler_seed(13);
        let s = BoundSampler::uniform(0.0, 1.0);
        let a = s.sample().unwrap();
        let b = s.sample().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn binding_does_not_validate(){
        // Constructing with inverted bounds is fine; drawing is not.
        let s = BoundSampler::uniform(1.25, 0.75);
        assert!(matches!(s.sample(), Err(SamplerError::InvalidParameters { kind: "uniform", .. })));
    }

    #[test]
    fn triangular_mode_outside_bounds_is_rejected(){
        let s = BoundSampler::triangular(0.75, 1.25, 0.25);
        let err = s.sample().unwrap_err();
        assert!(err.to_string().contains("mode"));
    }

    #[test]
    fn non_finite_and_negative_params_are_rejected(){
        assert!(BoundSampler::uniform(f64::NAN, 1.0).sample().is_err());
        assert!(BoundSampler::normal(0.0, -1.0).sample().is_err());
        assert!(BoundSampler::normal(f64::INFINITY, 1.0).sample().is_err());
    }

    #[test]
    fn extreme_finite_params_error_instead_of_panicking(){
        set_sampler_seed(21);
        for s in [BoundSampler::uniform(0.0, f64::MAX), BoundSampler::uniform(-f64::MAX, f64::MAX)] {
            assert!(matches!(s.sample(), Err(SamplerError::InvalidParameters { kind: "uniform", .. })));
        }
        let err = BoundSampler::triangular(-f64::MAX, f64::MAX, 0.0).sample().unwrap_err();
        assert!(err.to_string().contains("overflows"));
        let wide_normal = BoundSampler::normal(0.0, f64::MAX);
        for _ in 0..100 {
            match wide_normal.sample() {
                Ok(x) => assert!(x.is_finite()),
                Err(SamplerError::InvalidParameters { kind, .. }) => assert_eq!(kind, "normal"),
            }
        }
    }

    #[test]
    fn wide_but_representable_range_still_draws(){
        set_sampler_seed(22);
        let x = BoundSampler::uniform(0.0, f64::MAX / 2.0).sample().unwrap();
        assert!(x.is_finite() && x >= 0.0);
    }

    #[test]
    fn degenerate_range_returns_low(){
        assert_eq!(BoundSampler::uniform(2.0, 2.0).sample(), Ok(2.0));
        assert_eq!(BoundSampler::triangular(2.0, 2.0, 2.0).sample(), Ok(2.0));
        assert_eq!(BoundSampler::normal(3.0, 0.0).sample(), Ok(3.0));
    }

    #[test]
    fn bounds_reported_for_bounded_kinds(){
        assert_eq!(Distribution::Uniform { low: 1.0, high: 2.0 }.bounds(), Some((1.0, 2.0)));
        assert_eq!(Distribution::Normal { mean: 0.0, std_dev: 1.0 }.bounds(), None);
    }

    #[test]
    fn fn_sampler_calls_closure(){
        let s = FnSampler::new("half", || Ok(0.5));
        assert_eq!(s.sample(), Ok(0.5));
        assert!(format!("{s:?}").contains("half"));
    }

    #[test]
    fn distribution_json_is_tagged(){
        let d: Distribution = serde_json::from_str(r#"{"kind":"triangular","low":0.75,"high":1.25,"mode":1.0}"#).unwrap();
        assert_eq!(d, Distribution::Triangular { low: 0.75, high: 1.25, mode: 1.0 });
    }
}
