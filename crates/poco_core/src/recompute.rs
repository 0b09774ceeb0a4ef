//! Derived-statistics recomputation
//!
//! Changing the confidence level or the alternative direction only affects
//! columns derived from the stored estimates and standard errors, so both
//! overrides rewrite the live table in place instead of re-simulating. The
//! superseded view is archived under its (confidence, hypothesis) key first.
//!
//! Confidence overrides rebuild intervals as `estimate -/+ z * standard_error`.
//! Estimators whose native interval is not of that symmetric normal form get
//! normal-approximation intervals after an override.

use tracing::debug;

use crate::error::{Result, SimulationError};
use crate::estimators::Estimator;
use crate::generators::Generator;
use crate::model::{Archive, ArchiveKey, Confidence, Hypothesis, ResultTable};
use crate::simulation::SimulationRunner;

impl<E, G> SimulationRunner<E, G>
where
    G: Generator,
    E: Estimator<G::Dataset>,
{
    /// Recompute intervals, coverage and significance at a new confidence level.
    ///
    /// Estimates, standard errors and worker ids are never touched.
    pub fn override_confidence(&mut self, confidence: f64) -> Result<&ResultTable> {
        let confidence = Confidence::new(confidence)?;
        self.ensure_results()?;
        self.confidence = confidence;
        let table = self.archive_live_view()?;
        table.apply_confidence(confidence);
        Ok(&*table)
    }

    /// Re-derive significance for a new alternative direction.
    ///
    /// Interval bounds and coverage are unchanged.
    pub fn override_hypothesis(&mut self, hypothesis: Hypothesis) -> Result<&ResultTable> {
        self.ensure_results()?;
        self.hypothesis = hypothesis;
        let table = self.archive_live_view()?;
        table.apply_hypothesis(hypothesis);
        Ok(&*table)
    }

    fn ensure_results(&self) -> Result<()> {
        match self.results {
            Some(_) => Ok(()),
            None => Err(SimulationError::NoResults),
        }
    }

    /// Snapshot the live table into the archive and hand it back for rewriting
    fn archive_live_view(&mut self) -> Result<&mut ResultTable> {
        let table = self.results.as_mut().ok_or(SimulationError::NoResults)?;
        let key = table.archive_key();
        debug!(
            confidence = key.confidence.level(),
            hypothesis = %key.hypothesis,
            "Archiving result view"
        );
        self.archive.insert(key, table.clone());
        Ok(table)
    }

    /// Every view superseded by an override since the last run
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// The archived view made with `confidence` and `hypothesis`, if any
    pub fn archived(&self, confidence: Confidence, hypothesis: Hypothesis) -> Option<&ResultTable> {
        self.archive.get(&ArchiveKey {
            confidence,
            hypothesis,
        })
    }
}
