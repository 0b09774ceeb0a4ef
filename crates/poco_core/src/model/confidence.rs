use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use statrs::function::erf::erf_inv;

use crate::error::ConfigError;

/// A confidence level in the open interval (0, 1).
///
/// Validated once at construction. Equality and hashing use the bit pattern
/// of the underlying value, which is well defined because NaN is rejected.
#[derive(Debug, Clone, Copy, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(level: f64) -> Result<Self, ConfigError> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(ConfigError::InvalidConfidence(level))
        }
    }

    pub fn level(self) -> f64 {
        self.0
    }

    /// Total tail probability `1 - level`
    pub fn alpha(self) -> f64 {
        1.0 - self.0
    }

    /// Two-sided standard normal critical value, `Phi^-1(1 - alpha / 2)`.
    ///
    /// Uses `Phi^-1(p) = sqrt(2) * erf^-1(2p - 1)`, where `2p - 1` reduces to
    /// the level itself.
    pub fn z_critical(self) -> f64 {
        std::f64::consts::SQRT_2 * erf_inv(self.0)
    }

    /// Upper-tail probability used for two-sided quantiles, `1 - alpha / 2`
    pub fn upper_quantile(self) -> f64 {
        1.0 - self.alpha() / 2.0
    }
}

impl PartialEq for Confidence {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Confidence {}

impl Hash for Confidence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ConfigError;

    fn try_from(level: f64) -> Result<Self, Self::Error> {
        Confidence::new(level)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_levels_outside_open_unit_interval() {
        for level in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            assert!(Confidence::new(level).is_err(), "{level} should be rejected");
        }
        assert!(Confidence::new(0.95).is_ok());
    }

    #[test]
    fn test_z_critical_matches_normal_table() {
        let cases = [(0.90, 1.644_853_6), (0.95, 1.959_964_0), (0.99, 2.575_829_3)];
        for (level, expected) in cases {
            let z = Confidence::new(level).unwrap().z_critical();
            assert!(
                (z - expected).abs() < 1e-6,
                "z({level}) = {z}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_z_critical_increases_with_level() {
        let lower = Confidence::new(0.8).unwrap().z_critical();
        let higher = Confidence::new(0.999).unwrap().z_critical();
        assert!(higher > lower);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Confidence = serde_json::from_str("0.9").unwrap();
        assert_eq!(ok.level(), 0.9);
        assert!(serde_json::from_str::<Confidence>("1.2").is_err());
    }
}
