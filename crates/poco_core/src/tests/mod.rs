//! Integration tests for the simulation engine
//!
//! Tests are organized by topic:
//! - `determinism` - Reproducibility across repeated runs and worker counts
//! - `grid` - Trial grid completeness and row order
//! - `derived_columns` - Coverage and significance for every direction
//! - `recompute` - Confidence/hypothesis overrides and the archive
//! - `failures` - Trial error propagation and the opt-in collect mode
//! - `scenario` - Statistical sanity check of the sample-mean setup

mod support;
