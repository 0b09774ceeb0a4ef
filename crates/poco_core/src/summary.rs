//! Per-effect-size summaries of a result table
//!
//! Aggregates the tidy rows into the quantities behind power, coverage, bias
//! and standard-error diagnostics. Summaries are computed on demand from the
//! live table, so they follow confidence and hypothesis overrides.

use serde::{Deserialize, Serialize};

use crate::model::{Confidence, Hypothesis, ResultRow, ResultTable};

/// Aggregates over all rows sharing one effect size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSummary {
    pub effect_size: f64,
    pub trials: usize,
    /// Share of significant trials
    pub power: f64,
    /// Share of intervals containing the true effect size
    pub coverage: f64,
    /// Binomial standard error of `power`
    pub power_mcse: f64,
    /// Binomial standard error of `coverage`
    pub coverage_mcse: f64,
    pub mean_estimate: f64,
    /// `mean_estimate - effect_size`
    pub bias: f64,
    /// Mean of the estimator-reported standard errors
    pub mean_standard_error: f64,
    /// Empirical standard deviation of the estimates (`ddof = 1`).
    /// `None` with fewer than two trials.
    pub estimate_std_dev: Option<f64>,
    /// `mean_standard_error - estimate_std_dev`
    pub standard_error_bias: Option<f64>,
    pub mean_ci_width: f64,
}

impl EffectSummary {
    fn from_rows(effect_size: f64, rows: &[&ResultRow]) -> Self {
        let n = rows.len() as f64;
        let share = |pred: fn(&ResultRow) -> bool| rows.iter().filter(|r| pred(r)).count() as f64 / n;
        let mean = |value: fn(&ResultRow) -> f64| rows.iter().map(|r| value(r)).sum::<f64>() / n;

        let power = share(|r| r.is_significant);
        let coverage = share(|r| r.is_covered);
        let mean_estimate = mean(|r| r.estimate);
        let mean_standard_error = mean(|r| r.standard_error);

        let estimate_std_dev = (rows.len() >= 2).then(|| {
            let ss: f64 = rows.iter().map(|r| (r.estimate - mean_estimate).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        });

        Self {
            effect_size,
            trials: rows.len(),
            power,
            coverage,
            power_mcse: binomial_se(power, n),
            coverage_mcse: binomial_se(coverage, n),
            mean_estimate,
            bias: mean_estimate - effect_size,
            mean_standard_error,
            estimate_std_dev,
            standard_error_bias: estimate_std_dev.map(|sd| mean_standard_error - sd),
            mean_ci_width: mean(ResultRow::ci_width),
        }
    }
}

fn binomial_se(p: f64, n: f64) -> f64 {
    (p * (1.0 - p) / n).sqrt()
}

/// Summary of a whole result table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub confidence: Confidence,
    pub hypothesis: Hypothesis,
    pub null_value: f64,
    /// Expected power when the true effect equals the null value
    pub nominal_significance: f64,
    /// One entry per effect size, in grid order
    pub effects: Vec<EffectSummary>,
    pub failed_trials: usize,
}

impl SimulationSummary {
    pub fn effect(&self, effect_size: f64) -> Option<&EffectSummary> {
        self.effects.iter().find(|e| e.effect_size == effect_size)
    }
}

/// Summarize every effect size of `table`
pub fn summarize(table: &ResultTable) -> SimulationSummary {
    let effects = table
        .effect_sizes()
        .into_iter()
        .map(|effect_size| {
            let rows: Vec<&ResultRow> = table.rows_for(effect_size).collect();
            EffectSummary::from_rows(effect_size, &rows)
        })
        .collect();

    SimulationSummary {
        confidence: table.confidence(),
        hypothesis: table.hypothesis(),
        null_value: table.null_value(),
        nominal_significance: table.hypothesis().nominal_significance(table.confidence()),
        effects,
        failed_trials: table.failures().len(),
    }
}

/// Quantiles of the point estimates at one effect size.
///
/// Uses linear interpolation between order statistics. Returns `None` when no
/// row has this effect size; levels outside [0, 1] are clamped.
pub fn estimate_quantiles(
    table: &ResultTable,
    effect_size: f64,
    levels: &[f64],
) -> Option<Vec<(f64, f64)>> {
    let mut estimates: Vec<f64> = table.rows_for(effect_size).map(|r| r.estimate).collect();
    if estimates.is_empty() {
        return None;
    }
    estimates.sort_by(f64::total_cmp);

    Some(
        levels
            .iter()
            .map(|&level| (level, quantile_sorted(&estimates, level)))
            .collect(),
    )
}

fn quantile_sorted(sorted: &[f64], level: f64) -> f64 {
    let position = level.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TrialOutcome, WorkerId};

    fn table(estimates: &[(f64, f64)], hypothesis: Hypothesis) -> ResultTable {
        let c = Confidence::new(0.95).unwrap();
        let outcomes = estimates
            .iter()
            .map(|&(effect_size, estimate)| TrialOutcome {
                effect_size,
                estimate,
                standard_error: 0.1,
                ci_lower: estimate - 0.2,
                ci_upper: estimate + 0.2,
                confidence: c,
                worker_id: WorkerId::Main,
            })
            .collect();
        ResultTable::from_outcomes(outcomes, c, hypothesis, 0.0)
    }

    #[test]
    fn test_power_coverage_and_bias() {
        let t = table(
            &[(0.0, 0.1), (0.0, -0.1), (0.0, 0.3), (0.0, -0.3), (1.0, 1.0), (1.0, 1.4)],
            Hypothesis::TwoSided,
        );
        let summary = summarize(&t);

        assert_eq!(summary.effects.len(), 2);
        let null = summary.effect(0.0).unwrap();
        assert_eq!(null.trials, 4);
        // +-0.3 intervals exclude 0
        assert!((null.power - 0.5).abs() < 1e-12);
        assert!((null.coverage - 0.5).abs() < 1e-12);
        assert!(null.bias.abs() < 1e-12);
        assert!((null.mean_ci_width - 0.4).abs() < 1e-12);

        let shifted = summary.effect(1.0).unwrap();
        assert!((shifted.power - 1.0).abs() < 1e-12);
        assert!((shifted.coverage - 0.5).abs() < 1e-12);
        assert!((shifted.bias - 0.2).abs() < 1e-12);
        assert_eq!(shifted.power_mcse, 0.0);
    }

    #[test]
    fn test_standard_error_bias() {
        let t = table(&[(0.0, 1.0), (0.0, 3.0)], Hypothesis::TwoSided);
        let s = summarize(&t);
        let e = &s.effects[0];
        let sd = 2.0_f64.sqrt();
        assert!((e.estimate_std_dev.unwrap() - sd).abs() < 1e-12);
        assert!((e.standard_error_bias.unwrap() - (0.1 - sd)).abs() < 1e-12);
    }

    #[test]
    fn test_single_trial_has_no_spread() {
        let s = summarize(&table(&[(0.5, 0.5)], Hypothesis::Greater));
        assert!(s.effects[0].estimate_std_dev.is_none());
        assert!((s.nominal_significance - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_quantiles_interpolate() {
        let t = table(
            &[(0.0, 4.0), (0.0, 1.0), (0.0, 3.0), (0.0, 2.0), (0.0, 5.0)],
            Hypothesis::TwoSided,
        );
        let q = estimate_quantiles(&t, 0.0, &[0.0, 0.25, 0.5, 0.9, 1.0]).unwrap();
        let values: Vec<f64> = q.iter().map(|(_, v)| *v).collect();
        assert_eq!(values[0], 1.0);
        assert_eq!(values[1], 2.0);
        assert_eq!(values[2], 3.0);
        assert!((values[3] - 4.6).abs() < 1e-12);
        assert_eq!(values[4], 5.0);

        assert!(estimate_quantiles(&t, 9.0, &[0.5]).is_none());
    }
}
