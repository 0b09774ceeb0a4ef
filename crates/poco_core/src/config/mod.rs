//! Simulation configuration
//!
//! `SimulationConfig` holds every plain-data setting of a run; the estimator
//! and generator templates are supplied separately to the runner. Use
//! [`SimulationBuilder`] for a fluent setup:
//!
//! ```ignore
//! use poco_core::config::SimulationBuilder;
//!
//! let runner = SimulationBuilder::new(estimator, generator)
//!     .effect_sizes(vec![0.0, 0.1, 0.2])
//!     .simulations(1_000)
//!     .null_value(0.0)
//!     .hypothesis(Hypothesis::Greater)
//!     .workers(-1)
//!     .build()?;
//! ```

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::Hypothesis;

pub mod builder;

pub use builder::SimulationBuilder;

fn default_n_simulations() -> usize {
    100
}

fn default_seed() -> u64 {
    42
}

/// Complete plain-data configuration of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid of true effect sizes, simulated in this order
    #[serde(default)]
    pub effect_sizes: Vec<f64>,

    /// Replications per effect size
    #[serde(default = "default_n_simulations")]
    pub n_simulations: usize,

    /// Value tested against for significance
    #[serde(default)]
    pub null_value: f64,

    /// Master seed all trial seeds are derived from
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default)]
    pub workers: Workers,

    #[serde(default)]
    pub hypothesis: Hypothesis,

    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            effect_sizes: Vec::new(),
            n_simulations: default_n_simulations(),
            null_value: 0.0,
            seed: default_seed(),
            workers: Workers::default(),
            hypothesis: Hypothesis::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl SimulationConfig {
    /// Check the configuration and return the total number of trials
    pub fn validate(&self) -> Result<usize, ConfigError> {
        if self.effect_sizes.is_empty() {
            return Err(ConfigError::EmptyEffectSizes);
        }
        if let Some((index, &value)) = self
            .effect_sizes
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(ConfigError::NonFiniteEffectSize { index, value });
        }
        if !self.null_value.is_finite() {
            return Err(ConfigError::NonFiniteNullValue(self.null_value));
        }
        if self.n_simulations == 0 {
            return Err(ConfigError::ZeroSimulations);
        }
        self.effect_sizes
            .len()
            .checked_mul(self.n_simulations)
            .ok_or(ConfigError::TooManyTrials {
                effect_sizes: self.effect_sizes.len(),
                n_simulations: self.n_simulations,
            })
    }
}

/// Size of the worker pool.
///
/// Serialized as an integer: `-1` selects all available cores, any positive
/// value a fixed pool size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Workers {
    #[default]
    AllCores,
    Fixed(NonZeroUsize),
}

impl Workers {
    pub const ALL_CORES_SENTINEL: i64 = -1;

    /// Number of threads the pool will run with
    pub fn resolve(self) -> usize {
        match self {
            Workers::AllCores => std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            Workers::Fixed(n) => n.get(),
        }
    }
}

impl TryFrom<i64> for Workers {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == Self::ALL_CORES_SENTINEL {
            return Ok(Workers::AllCores);
        }
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Workers::Fixed)
            .ok_or(ConfigError::InvalidWorkers(value))
    }
}

impl From<Workers> for i64 {
    fn from(workers: Workers) -> Self {
        match workers {
            Workers::AllCores => Workers::ALL_CORES_SENTINEL,
            Workers::Fixed(n) => i64::try_from(n.get()).unwrap_or(i64::MAX),
        }
    }
}

/// What a run does when a trial's generate or fit step fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole run with the first trial error
    #[default]
    Abort,
    /// Run every trial, drop failed ones from the rows and record them in
    /// [`ResultTable::failures`](crate::model::ResultTable::failures).
    ///
    /// Power and coverage computed from such a table are conditional on
    /// success and may be biased.
    Collect,
}

/// `num` evenly spaced values over `[start, stop]`, endpoints included
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(effect_sizes: Vec<f64>) -> SimulationConfig {
        SimulationConfig {
            effect_sizes,
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_counts_trials() {
        let mut c = config(vec![0.0, 0.1, 0.2]);
        c.n_simulations = 7;
        assert_eq!(c.validate(), Ok(21));
    }

    #[test]
    fn test_validate_rejects_bad_grids() {
        assert_eq!(config(vec![]).validate(), Err(ConfigError::EmptyEffectSizes));
        assert!(matches!(
            config(vec![0.0, f64::NAN]).validate(),
            Err(ConfigError::NonFiniteEffectSize { index: 1, .. })
        ));

        let mut zero = config(vec![0.0]);
        zero.n_simulations = 0;
        assert_eq!(zero.validate(), Err(ConfigError::ZeroSimulations));

        let mut overflow = config(vec![0.0, 1.0]);
        overflow.n_simulations = usize::MAX;
        assert!(matches!(overflow.validate(), Err(ConfigError::TooManyTrials { .. })));

        let mut null = config(vec![0.0]);
        null.null_value = f64::INFINITY;
        assert!(matches!(null.validate(), Err(ConfigError::NonFiniteNullValue(_))));
    }

    #[test]
    fn test_workers_from_integer() {
        assert_eq!(Workers::try_from(-1), Ok(Workers::AllCores));
        assert_eq!(
            Workers::try_from(4),
            Ok(Workers::Fixed(NonZeroUsize::new(4).unwrap()))
        );
        assert_eq!(Workers::try_from(0), Err(ConfigError::InvalidWorkers(0)));
        assert_eq!(Workers::try_from(-2), Err(ConfigError::InvalidWorkers(-2)));
        assert!(Workers::AllCores.resolve() >= 1);
    }

    #[test]
    fn test_deserialize_defaults() {
        let c: SimulationConfig = serde_json::from_str(r#"{"effect_sizes": [0.0, 0.5]}"#).unwrap();
        assert_eq!(c.n_simulations, 100);
        assert_eq!(c.seed, 42);
        assert_eq!(c.workers, Workers::AllCores);
        assert_eq!(c.hypothesis, Hypothesis::TwoSided);
        assert_eq!(c.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_deserialize_rejects_invalid_tokens() {
        assert!(serde_json::from_str::<SimulationConfig>(
            r#"{"effect_sizes": [0.0], "hypothesis": ">="}"#
        )
        .is_err());
        assert!(
            serde_json::from_str::<SimulationConfig>(r#"{"effect_sizes": [0.0], "workers": 0}"#)
                .is_err()
        );
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
