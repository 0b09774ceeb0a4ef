use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trial counters shared between the runner and an observer.
///
/// Observational only; row order and results never depend on these values.
#[derive(Debug, Clone, Default)]
pub struct SimulationProgress {
    completed: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
}

impl SimulationProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from existing atomics, e.g. counters owned by a UI thread
    pub fn from_atomics(completed: Arc<AtomicUsize>, total: Arc<AtomicUsize>) -> Self {
        Self { completed, total }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Completed share of the current run, in [0, 1]
    #[must_use]
    pub fn fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.completed() as f64 / total as f64
        }
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counters() {
        let progress = SimulationProgress::new();
        let observer = progress.clone();

        progress.reset(4);
        progress.increment();
        progress.increment();

        assert_eq!(observer.completed(), 2);
        assert_eq!(observer.total(), 4);
        assert!((observer.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_atomics_reports_into_owned_counters() {
        let completed = Arc::new(AtomicUsize::new(7));
        let total = Arc::new(AtomicUsize::new(0));
        let progress = SimulationProgress::from_atomics(completed.clone(), total.clone());

        progress.reset(3);
        progress.increment();

        assert_eq!(completed.load(Ordering::Relaxed), 1);
        assert_eq!(total.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_fraction_without_total() {
        assert_eq!(SimulationProgress::new().fraction(), 0.0);
    }
}
