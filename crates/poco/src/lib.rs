//! Command-line front end for the poco simulation engine
//!
//! Loads a YAML study, runs it, applies any requested recomputation and
//! reports per-effect power and coverage.

mod logging;
pub mod report;
pub mod study;

pub use logging::{default_filter, init_logging};
pub use study::{RunOverrides, Study, StudyError};
