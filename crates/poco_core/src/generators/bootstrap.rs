use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{BoxError, DataError};

use super::Generator;

/// Resamples observed outcomes with replacement and adds a constant shift.
///
/// Each dataset has the same size as the base data; the effect size is added
/// to every resampled value to simulate a constant treatment effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapShifter {
    base: Vec<f64>,
}

impl BootstrapShifter {
    pub fn new(base: Vec<f64>) -> Result<Self, DataError> {
        if base.is_empty() {
            return Err(DataError::EmptyBaseData);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &[f64] {
        &self.base
    }
}

impl Generator for BootstrapShifter {
    type Dataset = Vec<f64>;

    fn generate(&self, effect_size: f64, seed: u64) -> Result<Vec<f64>, BoxError> {
        let n = self.base.len();
        if n == 0 {
            return Err(DataError::EmptyBaseData.into());
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        Ok((0..n)
            .map(|_| self.base[rng.random_range(0..n)] + effect_size)
            .collect())
    }
}
