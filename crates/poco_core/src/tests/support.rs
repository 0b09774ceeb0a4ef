//! Shared fixtures for the integration tests

use crate::config::SimulationBuilder;
use crate::error::{BoxError, DataError};
use crate::estimators::SampleMean;
use crate::generators::{Generator, NormalMeanShifter};
use crate::simulation::SimulationRunner;

/// Small, fast sample-mean setup over a normal generator
pub fn normal_builder(
    effect_sizes: &[f64],
    n_simulations: usize,
) -> SimulationBuilder<SampleMean, NormalMeanShifter> {
    SimulationBuilder::new(
        SampleMean::new(0.95).unwrap(),
        NormalMeanShifter::new(30, 0.0, 1.0),
    )
    .effect_sizes(effect_sizes.to_vec())
    .simulations(n_simulations)
    .seed(7)
}

pub fn run_normal(
    effect_sizes: &[f64],
    n_simulations: usize,
    workers: i64,
) -> SimulationRunner<SampleMean, NormalMeanShifter> {
    let mut runner = normal_builder(effect_sizes, n_simulations)
        .workers(workers)
        .build()
        .unwrap();
    runner.run().unwrap();
    runner
}

/// Normal generator that fails for one effect size and a subset of seeds
pub struct FlakyGenerator {
    pub inner: NormalMeanShifter,
    pub failing_effect: f64,
    /// Fail when `seed % modulus == 0`; `1` fails every trial at the effect
    pub modulus: u64,
}

impl Generator for FlakyGenerator {
    type Dataset = Vec<f64>;

    fn generate(&self, effect_size: f64, seed: u64) -> Result<Vec<f64>, BoxError> {
        if effect_size == self.failing_effect && seed % self.modulus == 0 {
            return Err(DataError::InsufficientData {
                required: 1,
                found: 0,
            }
            .into());
        }
        self.inner.generate(effect_size, seed)
    }
}
