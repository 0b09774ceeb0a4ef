use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::Confidence;

/// Direction of the alternative hypothesis.
///
/// Significance is read off the confidence interval, so the one-sided tests
/// reject at half the two-sided level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hypothesis {
    /// `H1: theta != null`
    #[default]
    #[serde(rename = "!=")]
    TwoSided,
    /// `H1: theta > null`
    #[serde(rename = ">")]
    Greater,
    /// `H1: theta < null`
    #[serde(rename = "<")]
    Less,
}

impl Hypothesis {
    pub const ALL: [Hypothesis; 3] = [Hypothesis::TwoSided, Hypothesis::Greater, Hypothesis::Less];

    pub fn token(self) -> &'static str {
        match self {
            Hypothesis::TwoSided => "!=",
            Hypothesis::Greater => ">",
            Hypothesis::Less => "<",
        }
    }

    /// Whether the interval `[ci_lower, ci_upper]` rejects `null_value`
    pub fn is_significant(self, ci_lower: f64, ci_upper: f64, null_value: f64) -> bool {
        match self {
            Hypothesis::TwoSided => !(ci_lower <= null_value && null_value <= ci_upper),
            Hypothesis::Greater => ci_lower > null_value,
            Hypothesis::Less => ci_upper < null_value,
        }
    }

    /// Nominal type I error rate of the interval-based test at `confidence`
    pub fn nominal_significance(self, confidence: Confidence) -> f64 {
        match self {
            Hypothesis::TwoSided => confidence.alpha(),
            Hypothesis::Greater | Hypothesis::Less => confidence.alpha() / 2.0,
        }
    }
}

impl FromStr for Hypothesis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "!=" => Ok(Hypothesis::TwoSided),
            ">" => Ok(Hypothesis::Greater),
            "<" => Ok(Hypothesis::Less),
            other => Err(ConfigError::InvalidHypothesis(other.to_string())),
        }
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
