use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{BoxError, DataError};

use super::Generator;

/// Draws `n_samples` values from `Normal(baseline_mean + effect_size, std_dev)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalMeanShifter {
    pub n_samples: usize,
    pub baseline_mean: f64,
    pub std_dev: f64,
}

impl Default for NormalMeanShifter {
    fn default() -> Self {
        Self {
            n_samples: 100,
            baseline_mean: 0.0,
            std_dev: 1.0,
        }
    }
}

impl NormalMeanShifter {
    pub fn new(n_samples: usize, baseline_mean: f64, std_dev: f64) -> Self {
        Self {
            n_samples,
            baseline_mean,
            std_dev,
        }
    }
}

impl Generator for NormalMeanShifter {
    type Dataset = Vec<f64>;

    fn generate(&self, effect_size: f64, seed: u64) -> Result<Vec<f64>, BoxError> {
        let mean = self.baseline_mean + effect_size;
        // rand_distr accepts a negative std_dev and mirrors the draws
        if !(self.std_dev.is_finite() && self.std_dev >= 0.0) {
            return Err(DataError::InvalidDistribution {
                distribution: "Normal",
                reason: format!("std_dev must be finite and non-negative, got {}", self.std_dev),
            }
            .into());
        }
        let dist = Normal::new(mean, self.std_dev).map_err(|e| DataError::InvalidDistribution {
            distribution: "Normal",
            reason: format!("mean={mean}, std_dev={}: {e}", self.std_dev),
        })?;
        let mut rng = SmallRng::seed_from_u64(seed);
        Ok((0..self.n_samples).map(|_| dist.sample(&mut rng)).collect())
    }
}
