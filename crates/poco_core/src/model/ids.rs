//! Identifiers attached to simulation outputs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the worker thread that executed a trial.
///
/// Diagnostic only: two runs with different worker counts produce the same
/// outcomes but different worker ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerId {
    /// Executed on the calling thread, outside any worker pool
    Main,
    /// Executed on the pool thread with this index
    Pool(usize),
}

impl WorkerId {
    /// Identify the thread this is called from
    #[cfg(feature = "parallel")]
    pub fn current() -> Self {
        rayon::current_thread_index().map_or(WorkerId::Main, WorkerId::Pool)
    }

    /// Identify the thread this is called from
    #[cfg(not(feature = "parallel"))]
    pub fn current() -> Self {
        WorkerId::Main
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerId::Main => write!(f, "main"),
            WorkerId::Pool(index) => write!(f, "worker-{index}"),
        }
    }
}
