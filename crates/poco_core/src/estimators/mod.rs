//! Estimator contract and bundled estimators
//!
//! An estimator fits one dataset and reports a point estimate, its standard
//! error and a confidence interval at the level it declares. Estimators are
//! stateless: `fit` takes `&self` and returns a [`Fit`] value, so one
//! instance is shared read-only by every trial of a run.

mod sample_mean;
mod student_t;

pub use sample_mean::SampleMean;
pub use student_t::StudentTMean;

use serde::{Deserialize, Serialize};

use crate::error::BoxError;
use crate::model::Confidence;

/// Result of fitting an estimator to one dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub estimate: f64,
    pub standard_error: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

impl Fit {
    /// Symmetric normal-approximation interval `estimate -/+ z * standard_error`
    pub fn normal(estimate: f64, standard_error: f64, confidence: Confidence) -> Self {
        Self::symmetric(estimate, standard_error, confidence.z_critical())
    }

    /// Symmetric interval `estimate -/+ critical * standard_error`
    pub fn symmetric(estimate: f64, standard_error: f64, critical: f64) -> Self {
        Self {
            estimate,
            standard_error,
            ci_lower: estimate - critical * standard_error,
            ci_upper: estimate + critical * standard_error,
        }
    }
}

/// Fits datasets of type `D`.
///
/// Implementations must be safe to call from many worker threads at once.
pub trait Estimator<D: ?Sized>: Send + Sync {
    fn fit(&self, data: &D) -> Result<Fit, BoxError>;

    /// Confidence level of the intervals this estimator reports
    fn confidence(&self) -> Confidence;
}

/// Mean and sample standard deviation (`ddof = 1`) of the non-NaN values
pub(crate) fn mean_and_std(data: &[f64]) -> (usize, f64, f64) {
    let values = data.iter().copied().filter(|v| !v.is_nan());
    let (n, sum) = values.clone().fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    if n == 0 {
        return (0, f64::NAN, f64::NAN);
    }
    let mean = sum / n as f64;
    if n < 2 {
        return (n, mean, f64::NAN);
    }
    let ss: f64 = values.map(|v| (v - mean).powi(2)).sum();
    (n, mean, (ss / (n - 1) as f64).sqrt())
}
