use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{BoxError, ConfigError, DataError};
use crate::model::Confidence;

use super::{Estimator, Fit, mean_and_std};

/// Sample mean with a Student's t interval on `n - 1` degrees of freedom.
///
/// Exact for normal data; wider than [`SampleMean`](super::SampleMean) for
/// small samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentTMean {
    confidence: Confidence,
}

impl StudentTMean {
    pub fn new(confidence: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            confidence: Confidence::new(confidence)?,
        })
    }

    fn critical_value(&self, df: f64) -> Result<f64, DataError> {
        let dist =
            StudentsT::new(0.0, 1.0, df).map_err(|e| DataError::InvalidDistribution {
                distribution: "Student's t",
                reason: e.to_string(),
            })?;
        Ok(dist.inverse_cdf(self.confidence.upper_quantile()))
    }
}

impl Estimator<[f64]> for StudentTMean {
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
        let t = self.critical_value((n - 1) as f64)?;
        Ok(Fit::symmetric(mean, se, t))
    }

    fn confidence(&self) -> Confidence {
        self.confidence
    }
}

impl Estimator<Vec<f64>> for StudentTMean {
    fn fit(&self, data: &Vec<f64>) -> Result<Fit, BoxError> {
        Estimator::<[f64]>::fit(self, data.as_slice())
    }

    fn confidence(&self) -> Confidence {
        self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::SampleMean;

    #[test]
    fn test_critical_value_small_sample() {
        // t_{0.975, 4} = 2.776
        let t = StudentTMean::new(0.95).unwrap().critical_value(4.0).unwrap();
        assert!((t - 2.776_445).abs() < 1e-4, "t = {t}");
    }

    #[test]
    fn test_wider_than_normal_interval() {
        let data = vec![0.3, -1.2, 0.8, 1.5, -0.4, 0.1];
        let t_fit = StudentTMean::new(0.95).unwrap().fit(&data).unwrap();
        let z_fit = SampleMean::new(0.95).unwrap().fit(&data).unwrap();

        assert_eq!(t_fit.estimate, z_fit.estimate);
        assert_eq!(t_fit.standard_error, z_fit.standard_error);
        assert!(t_fit.ci_upper - t_fit.ci_lower > z_fit.ci_upper - z_fit.ci_lower);
    }
}
