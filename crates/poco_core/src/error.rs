use thiserror::Error;

/// Error type returned by pluggable estimators and generators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while validating a run configuration.
///
/// These always surface before any simulation work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid hypothesis direction {0:?}: expected one of \"!=\", \">\", \"<\"")]
    InvalidHypothesis(String),
    #[error("confidence must lie strictly between 0 and 1, got {0}")]
    InvalidConfidence(f64),
    #[error("effect size grid is empty")]
    EmptyEffectSizes,
    #[error("effect size at position {index} is not finite ({value})")]
    NonFiniteEffectSize { index: usize, value: f64 },
    #[error("null value must be finite, got {0}")]
    NonFiniteNullValue(f64),
    #[error("number of simulations per effect size must be positive")]
    ZeroSimulations,
    #[error("{effect_sizes} effect sizes x {n_simulations} simulations overflows the trial count")]
    TooManyTrials {
        effect_sizes: usize,
        n_simulations: usize,
    },
    #[error("invalid worker count {0}: use -1 for all cores or a positive count")]
    InvalidWorkers(i64),
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Errors related to per-trial seed derivation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("cannot derive {requested} distinct seeds from a range of {available} values")]
    RangeExhausted { requested: usize, available: u64 },
}

/// A failure inside one trial's generate or fit step.
///
/// Carries enough context to reproduce the trial in isolation.
#[derive(Debug, Error)]
pub enum TrialError {
    #[error("trial {index} (effect size {effect_size}, seed {seed}): data generation failed")]
    Generate {
        index: usize,
        effect_size: f64,
        seed: u64,
        source: BoxError,
    },
    #[error("trial {index} (effect size {effect_size}, seed {seed}): estimator fit failed")]
    Fit {
        index: usize,
        effect_size: f64,
        seed: u64,
        source: BoxError,
    },
    #[error(
        "trial {index} (effect size {effect_size}, seed {seed}): estimator returned non-finite {field} ({value})"
    )]
    NonFinite {
        index: usize,
        effect_size: f64,
        seed: u64,
        field: &'static str,
        value: f64,
    },
}

impl TrialError {
    /// Index of the trial in dispatch order
    pub fn index(&self) -> usize {
        match self {
            TrialError::Generate { index, .. }
            | TrialError::Fit { index, .. }
            | TrialError::NonFinite { index, .. } => *index,
        }
    }
}

/// Errors raised by the bundled estimators and generators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("need at least {required} observations, found {found}")]
    InsufficientData { required: usize, found: usize },
    #[error("bootstrap base data is empty")]
    EmptyBaseData,
    #[error("invalid {distribution} parameters: {reason}")]
    InvalidDistribution {
        distribution: &'static str,
        reason: String,
    },
}

/// Top-level error for orchestration and recomputation
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Trial(#[from] TrialError),
    #[error("no results available: run the simulation first")]
    NoResults,
}

pub type Result<T> = std::result::Result<T, SimulationError>;
