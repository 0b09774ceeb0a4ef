//! Data generator contract and bundled generators
//!
//! A generator produces one dataset from an effect size and a seed. The
//! output must be a pure function of those inputs plus the generator's own
//! immutable configuration, so trials are reproducible in isolation.

mod bootstrap;
mod normal;

pub use bootstrap::BootstrapShifter;
pub use normal::NormalMeanShifter;

use crate::error::BoxError;

pub trait Generator: Send + Sync {
    /// Dataset handed to the estimator; opaque to the simulation engine
    type Dataset;

    fn generate(&self, effect_size: f64, seed: u64) -> Result<Self::Dataset, BoxError>;
}
