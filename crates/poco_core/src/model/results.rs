//! Simulation results
//!
//! Contains the per-trial outcome record and the tidy result table assembled
//! from all outcomes of one run, plus the archive of superseded views.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::confidence::Confidence;
use super::hypothesis::Hypothesis;
use super::ids::WorkerId;

/// Raw output of one generate+fit trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub effect_size: f64,
    pub estimate: f64,
    pub standard_error: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub confidence: Confidence,
    pub worker_id: WorkerId,
}

/// One row of the result table: a trial outcome plus its derived columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub effect_size: f64,
    pub estimate: f64,
    pub standard_error: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub confidence: Confidence,
    pub is_covered: bool,
    pub is_significant: bool,
    pub worker_id: WorkerId,
}

impl ResultRow {
    fn from_outcome(outcome: TrialOutcome) -> Self {
        Self {
            effect_size: outcome.effect_size,
            estimate: outcome.estimate,
            standard_error: outcome.standard_error,
            ci_lower: outcome.ci_lower,
            ci_upper: outcome.ci_upper,
            confidence: outcome.confidence,
            is_covered: false,
            is_significant: false,
            worker_id: outcome.worker_id,
        }
    }

    /// Width of the confidence interval
    pub fn ci_width(&self) -> f64 {
        self.ci_upper - self.ci_lower
    }

    /// Bit-exact comparison of every column except the worker id
    pub fn same_outcome(&self, other: &ResultRow) -> bool {
        self.effect_size.to_bits() == other.effect_size.to_bits()
            && self.estimate.to_bits() == other.estimate.to_bits()
            && self.standard_error.to_bits() == other.standard_error.to_bits()
            && self.ci_lower.to_bits() == other.ci_lower.to_bits()
            && self.ci_upper.to_bits() == other.ci_upper.to_bits()
            && self.confidence == other.confidence
            && self.is_covered == other.is_covered
            && self.is_significant == other.is_significant
    }
}

/// Whether the closed interval `[ci_lower, ci_upper]` contains `value`
#[inline]
pub fn is_covered(ci_lower: f64, ci_upper: f64, value: f64) -> bool {
    ci_lower <= value && value <= ci_upper
}

/// A trial that failed under [`FailurePolicy::Collect`](crate::config::FailurePolicy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialFailure {
    pub index: usize,
    pub effect_size: f64,
    pub seed: u64,
    pub message: String,
}

/// Tidy table of all trial outcomes of one run.
///
/// Rows are in dispatch order: effect sizes in grid order, replications
/// within each effect size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
    confidence: Confidence,
    hypothesis: Hypothesis,
    null_value: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    failures: Vec<TrialFailure>,
}

impl ResultTable {
    /// Assemble a table and compute the coverage and significance columns
    pub fn from_outcomes(
        outcomes: Vec<TrialOutcome>,
        confidence: Confidence,
        hypothesis: Hypothesis,
        null_value: f64,
    ) -> Self {
        let mut table = Self {
            rows: outcomes.into_iter().map(ResultRow::from_outcome).collect(),
            confidence,
            hypothesis,
            null_value,
            failures: Vec::new(),
        };
        table.derive_coverage();
        table.derive_significance();
        table
    }

    pub(crate) fn with_failures(mut self, failures: Vec<TrialFailure>) -> Self {
        self.failures = failures;
        self
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn hypothesis(&self) -> Hypothesis {
        self.hypothesis
    }

    pub fn null_value(&self) -> f64 {
        self.null_value
    }

    /// Trials excluded from the rows because they failed.
    ///
    /// Always empty unless the run opted into collecting failures.
    pub fn failures(&self) -> &[TrialFailure] {
        &self.failures
    }

    /// Key under which this view is archived when it gets superseded
    pub fn archive_key(&self) -> ArchiveKey {
        ArchiveKey {
            confidence: self.confidence,
            hypothesis: self.hypothesis,
        }
    }

    /// Distinct effect sizes in the order they first appear
    pub fn effect_sizes(&self) -> Vec<f64> {
        let mut seen: Vec<f64> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.effect_size) {
                seen.push(row.effect_size);
            }
        }
        seen
    }

    /// Rows simulated at `effect_size`
    pub fn rows_for(&self, effect_size: f64) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter().filter(move |r| r.effect_size == effect_size)
    }

    /// Compare with another table ignoring worker ids.
    ///
    /// Worker ids depend on scheduling; everything else is determined by the
    /// run configuration.
    pub fn same_outcomes(&self, other: &ResultTable) -> bool {
        self.confidence == other.confidence
            && self.hypothesis == other.hypothesis
            && self.null_value.to_bits() == other.null_value.to_bits()
            && self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| a.same_outcome(b))
    }

    /// Rebuild interval bounds as `estimate -/+ z * standard_error` at a new
    /// confidence level, then re-derive coverage and significance
    pub(crate) fn apply_confidence(&mut self, confidence: Confidence) {
        let z = confidence.z_critical();
        for row in &mut self.rows {
            row.ci_lower = row.estimate - z * row.standard_error;
            row.ci_upper = row.estimate + z * row.standard_error;
            row.confidence = confidence;
        }
        self.confidence = confidence;
        self.derive_coverage();
        self.derive_significance();
    }

    /// Switch the alternative direction; intervals and coverage stay as is
    pub(crate) fn apply_hypothesis(&mut self, hypothesis: Hypothesis) {
        self.hypothesis = hypothesis;
        self.derive_significance();
    }

    fn derive_coverage(&mut self) {
        for row in &mut self.rows {
            row.is_covered = is_covered(row.ci_lower, row.ci_upper, row.effect_size);
        }
    }

    fn derive_significance(&mut self) {
        let (hypothesis, null_value) = (self.hypothesis, self.null_value);
        for row in &mut self.rows {
            row.is_significant = hypothesis.is_significant(row.ci_lower, row.ci_upper, null_value);
        }
    }
}

/// Identifies an archived view of a result table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveKey {
    pub confidence: Confidence,
    pub hypothesis: Hypothesis,
}

/// Prior result-table views, keyed by the analysis choices they were made with
pub type Archive = FxHashMap<ArchiveKey, ResultTable>;
