//! YAML study files
//!
//! A study names one of the bundled estimators and generators plus the
//! simulation settings:
//!
//! ```yaml
//! name: mean-shift
//! estimator:
//!   type: SampleMean
//!   confidence: 0.95
//! generator:
//!   type: Normal
//!   n_samples: 100
//! simulation:
//!   n_simulations: 500
//!   hypothesis: "!="
//!   workers: -1
//! effect_grid:
//!   start: 0.0
//!   stop: 0.5
//!   num: 11
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use poco_core::error::{BoxError, ConfigError, DataError, SimulationError};
use poco_core::estimators::{SampleMean, StudentTMean};
use poco_core::generators::{BootstrapShifter, NormalMeanShifter};
use poco_core::{Confidence, Estimator, Fit, Generator, Hypothesis, SimulationBuilder};
use poco_core::{SimulationConfig, SimulationRunner};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse study: {0}")]
    Parse(#[from] serde_saphyr::Error),
    #[error("study sets both `effect_grid` and `simulation.effect_sizes`")]
    AmbiguousGrid,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

fn default_confidence() -> f64 {
    0.95
}

fn default_n_samples() -> usize {
    100
}

fn default_std_dev() -> f64 {
    1.0
}

/// YAML-friendly estimator choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EstimatorSpec {
    /// Sample mean with a normal-approximation interval
    SampleMean {
        #[serde(default = "default_confidence")]
        confidence: f64,
    },
    /// Sample mean with a Student's t interval
    StudentT {
        #[serde(default = "default_confidence")]
        confidence: f64,
    },
}

/// YAML-friendly generator choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeneratorSpec {
    Normal {
        #[serde(default = "default_n_samples")]
        n_samples: usize,
        #[serde(default)]
        baseline_mean: f64,
        #[serde(default = "default_std_dev")]
        std_dev: f64,
    },
    /// Resample `base` with replacement and shift by the effect size
    Bootstrap { base: Vec<f64> },
}

/// Evenly spaced effect sizes over `[start, stop]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectGrid {
    pub start: f64,
    pub stop: f64,
    pub num: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub estimator: EstimatorSpec,
    pub generator: GeneratorSpec,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect_grid: Option<EffectGrid>,
}

/// Command-line adjustments applied on top of a study
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunOverrides {
    pub seed: Option<u64>,
    pub workers: Option<i64>,
    /// Recompute at this confidence level after the run
    pub confidence: Option<f64>,
    /// Re-derive significance for this direction after the run
    pub hypothesis: Option<Hypothesis>,
}

pub type StudyRunner = SimulationRunner<StudyEstimator, StudyGenerator>;

impl Study {
    pub fn from_yaml(yaml: &str) -> Result<Self, StudyError> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, StudyError> {
        let content = fs::read_to_string(path).map_err(|source| StudyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Simulation settings with the effect grid expanded
    pub fn simulation_config(&self) -> Result<SimulationConfig, StudyError> {
        let mut config = self.simulation.clone();
        if let Some(grid) = self.effect_grid {
            if !config.effect_sizes.is_empty() {
                return Err(StudyError::AmbiguousGrid);
            }
            config.effect_sizes = poco_core::config::linspace(grid.start, grid.stop, grid.num);
        }
        Ok(config)
    }

    /// Build a runner for this study with `overrides` applied
    pub fn runner(&self, overrides: &RunOverrides) -> Result<StudyRunner, StudyError> {
        let config = self.simulation_config()?;
        let mut builder =
            SimulationBuilder::new(self.estimator.build()?, self.generator.build()?).config(config);
        if let Some(seed) = overrides.seed {
            builder = builder.seed(seed);
        }
        if let Some(workers) = overrides.workers {
            builder = builder.workers(workers);
        }
        Ok(builder.build()?)
    }

    /// Run the study and apply any post-run overrides.
    ///
    /// Each override archives the view it replaces, so the returned runner
    /// still holds the estimator's native results.
    pub fn run(&self, overrides: &RunOverrides) -> Result<StudyRunner, StudyError> {
        let mut runner = self.runner(overrides)?;
        tracing::info!(
            study = self.name.as_deref().unwrap_or("unnamed"),
            "Running study"
        );
        runner.run()?;
        if let Some(confidence) = overrides.confidence {
            runner.override_confidence(confidence)?;
        }
        if let Some(hypothesis) = overrides.hypothesis {
            runner.override_hypothesis(hypothesis)?;
        }
        Ok(runner)
    }
}

impl EstimatorSpec {
    pub fn build(&self) -> Result<StudyEstimator, ConfigError> {
        Ok(match *self {
            EstimatorSpec::SampleMean { confidence } => {
                StudyEstimator::SampleMean(SampleMean::new(confidence)?)
            }
            EstimatorSpec::StudentT { confidence } => {
                StudyEstimator::StudentT(StudentTMean::new(confidence)?)
            }
        })
    }
}

impl GeneratorSpec {
    pub fn build(&self) -> Result<StudyGenerator, DataError> {
        Ok(match self {
            GeneratorSpec::Normal {
                n_samples,
                baseline_mean,
                std_dev,
            } => StudyGenerator::Normal(NormalMeanShifter::new(*n_samples, *baseline_mean, *std_dev)),
            GeneratorSpec::Bootstrap { base } => {
                StudyGenerator::Bootstrap(BootstrapShifter::new(base.clone())?)
            }
        })
    }
}

/// Any estimator a study file can name
#[derive(Debug, Clone)]
pub enum StudyEstimator {
    SampleMean(SampleMean),
    StudentT(StudentTMean),
}

impl Estimator<Vec<f64>> for StudyEstimator {
    fn fit(&self, data: &Vec<f64>) -> Result<Fit, BoxError> {
        match self {
            StudyEstimator::SampleMean(e) => Estimator::<Vec<f64>>::fit(e, data),
            StudyEstimator::StudentT(e) => Estimator::<Vec<f64>>::fit(e, data),
        }
    }

    fn confidence(&self) -> Confidence {
        match self {
            StudyEstimator::SampleMean(e) => Estimator::<Vec<f64>>::confidence(e),
            StudyEstimator::StudentT(e) => Estimator::<Vec<f64>>::confidence(e),
        }
    }
}

/// Any generator a study file can name
#[derive(Debug, Clone)]
pub enum StudyGenerator {
    Normal(NormalMeanShifter),
    Bootstrap(BootstrapShifter),
}

impl Generator for StudyGenerator {
    type Dataset = Vec<f64>;

    fn generate(&self, effect_size: f64, seed: u64) -> Result<Vec<f64>, BoxError> {
        match self {
            StudyGenerator::Normal(g) => g.generate(effect_size, seed),
            StudyGenerator::Bootstrap(g) => g.generate(effect_size, seed),
        }
    }
}
