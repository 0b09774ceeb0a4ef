use serde::{Deserialize, Serialize};

use crate::error::{BoxError, ConfigError, DataError};
use crate::model::Confidence;

use super::{Estimator, Fit, mean_and_std};

/// Sample mean with a normal-approximation interval.
///
/// NaN observations are dropped before fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleMean {
    confidence: Confidence,
}

impl SampleMean {
    pub fn new(confidence: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            confidence: Confidence::new(confidence)?,
        })
    }
}

impl Estimator<[f64]> for SampleMean {
    fn fit(&self, data: &[f64]) -> Result<Fit, BoxError> {
        let (n, mean, sd) = mean_and_std(data);
        if n < 2 {
            return Err(DataError::InsufficientData {
                required: 2,
                found: n,
            }
            .into());
        }
        let se = sd / (n as f64).sqrt();
        Ok(Fit::normal(mean, se, self.confidence))
    }

    fn confidence(&self) -> Confidence {
        self.confidence
    }
}

impl Estimator<Vec<f64>> for SampleMean {
    fn fit(&self, data: &Vec<f64>) -> Result<Fit, BoxError> {
        Estimator::<[f64]>::fit(self, data.as_slice())
    }

    fn confidence(&self) -> Confidence {
        self.confidence
    }
}
