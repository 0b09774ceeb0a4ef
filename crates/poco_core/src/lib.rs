//! Power and coverage simulation library
//!
//! This crate provides a Monte Carlo engine for evaluating the frequentist
//! operating characteristics of an estimator under a user-defined
//! data-generating process. It supports:
//! - Reproducible, collision-free per-trial seeds derived from one master seed
//! - Parallel trial execution with a deterministic result order
//! - Coverage and significance columns for two-sided and one-sided hypotheses
//! - Re-deriving intervals and significance after the fact, with an archive
//!   of every prior view
//! - Per-effect-size summaries (power, coverage, bias, MCSE)
//!
//! # Example
//!
//! ```ignore
//! use poco_core::config::SimulationBuilder;
//! use poco_core::estimators::SampleMean;
//! use poco_core::generators::NormalMeanShifter;
//!
//! let mut runner = SimulationBuilder::new(SampleMean::new(0.95)?, NormalMeanShifter::default())
//!     .effect_grid(0.0, 0.5, 20)
//!     .simulations(500)
//!     .seed(24)
//!     .build()?;
//!
//! runner.run()?;
//! runner.override_confidence(0.99)?;
//! let summary = poco_core::summary::summarize(runner.results().unwrap());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod recompute;
pub mod seed;
pub mod simulation;
pub mod summary;
pub mod trial;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Collaborator contracts and reference implementations
// ============================================================================

pub mod estimators;
pub mod generators;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{FailurePolicy, SimulationBuilder, SimulationConfig, Workers};
pub use error::{ConfigError, SimulationError, TrialError};
pub use estimators::{Estimator, Fit};
pub use generators::Generator;
pub use model::{Confidence, Hypothesis, ResultRow, ResultTable};
pub use simulation::SimulationRunner;
