//! Simulation Builder
//!
//! Fluent setup for a [`SimulationRunner`]. Settings are recorded as given and
//! validated together in [`SimulationBuilder::build`], so configuration
//! errors surface before any simulation work starts.

use crate::error::ConfigError;
use crate::generators::Generator;
use crate::estimators::Estimator;
use crate::model::{Hypothesis, SimulationProgress};
use crate::simulation::SimulationRunner;

use super::{FailurePolicy, SimulationConfig, Workers, linspace};

/// Builder for a simulation runner over estimator `E` and generator `G`
pub struct SimulationBuilder<E, G> {
    estimator: E,
    generator: G,
    config: SimulationConfig,
    workers: i64,
    progress: Option<SimulationProgress>,
}

impl<E, G> SimulationBuilder<E, G>
where
    G: Generator,
    E: Estimator<G::Dataset>,
{
    /// Create a builder around the estimator and generator templates
    #[must_use]
    pub fn new(estimator: E, generator: G) -> Self {
        Self {
            estimator,
            generator,
            config: SimulationConfig::default(),
            workers: Workers::ALL_CORES_SENTINEL,
            progress: None,
        }
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.workers = config.workers.into();
        self.config = config;
        self
    }

    // =========================================================================
    // Grid
    // =========================================================================

    #[must_use]
    pub fn effect_sizes(mut self, effect_sizes: impl Into<Vec<f64>>) -> Self {
        self.config.effect_sizes = effect_sizes.into();
        self
    }

    /// Use `num` evenly spaced effect sizes over `[start, stop]`
    #[must_use]
    pub fn effect_grid(mut self, start: f64, stop: f64, num: usize) -> Self {
        self.config.effect_sizes = linspace(start, stop, num);
        self
    }

    /// Replications per effect size
    #[must_use]
    pub fn simulations(mut self, n_simulations: usize) -> Self {
        self.config.n_simulations = n_simulations;
        self
    }

    // =========================================================================
    // Testing
    // =========================================================================

    #[must_use]
    pub fn null_value(mut self, null_value: f64) -> Self {
        self.config.null_value = null_value;
        self
    }

    #[must_use]
    pub fn hypothesis(mut self, hypothesis: Hypothesis) -> Self {
        self.config.hypothesis = hypothesis;
        self
    }

    // =========================================================================
    // Execution
    // =========================================================================

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Pool size; `-1` uses all available cores
    #[must_use]
    pub fn workers(mut self, workers: i64) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Opt into running every trial and recording failures instead of aborting
    #[must_use]
    pub fn collect_failures(self) -> Self {
        self.failure_policy(FailurePolicy::Collect)
    }

    /// Share trial counters with an observer
    #[must_use]
    pub fn progress(mut self, progress: SimulationProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Validate the configuration and create the runner
    pub fn build(mut self) -> Result<SimulationRunner<E, G>, ConfigError> {
        self.config.workers = Workers::try_from(self.workers)?;
        let runner = SimulationRunner::new(self.estimator, self.generator, self.config)?;
        Ok(match self.progress {
            Some(progress) => runner.with_progress(progress),
            None => runner,
        })
    }
}
