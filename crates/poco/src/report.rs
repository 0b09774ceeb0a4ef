//! Plain-text and JSON reports of a finished study

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use poco_core::ResultTable;
use poco_core::summary::SimulationSummary;

/// Render the per-effect summary as an aligned text table
pub fn render_summary(summary: &SimulationSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "confidence {} | H1: effect {} {} | nominal significance {:.4}",
        summary.confidence,
        summary.hypothesis,
        summary.null_value,
        summary.nominal_significance
    );
    let _ = writeln!(
        out,
        "{:>10} {:>7} {:>8} {:>8} {:>9} {:>8} {:>9} {:>9} {:>9} {:>9}",
        "effect", "trials", "power", "+/-", "coverage", "+/-", "bias", "mean se", "sd est", "ci width"
    );
    for e in &summary.effects {
        let sd = e
            .estimate_std_dev
            .map_or_else(|| "-".to_string(), |sd| format!("{sd:.4}"));
        let _ = writeln!(
            out,
            "{:>10.4} {:>7} {:>8.4} {:>8.4} {:>9.4} {:>8.4} {:>9.4} {:>9.4} {:>9} {:>9.4}",
            e.effect_size,
            e.trials,
            e.power,
            e.power_mcse,
            e.coverage,
            e.coverage_mcse,
            e.bias,
            e.mean_standard_error,
            sd,
            e.mean_ci_width
        );
    }
    if summary.failed_trials > 0 {
        let _ = writeln!(out, "{} trials failed and were excluded", summary.failed_trials);
    }
    out
}

/// Write the result table as pretty-printed JSON
pub fn write_results_json(path: &Path, table: &ResultTable) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, table)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::{RunOverrides, Study};
    use poco_core::summary::summarize;

    const STUDY: &str = r#"
estimator:
  type: SampleMean
generator:
  type: Normal
  n_samples: 25
simulation:
  effect_sizes: [0.0, 0.5]
  n_simulations: 20
  workers: 1
"#;

    fn run() -> ResultTable {
        let study = Study::from_yaml(STUDY).unwrap();
        study
            .run(&RunOverrides::default())
            .unwrap()
            .into_results()
            .unwrap()
    }

    #[test]
    fn test_render_summary_has_row_per_effect() {
        let text = render_summary(&summarize(&run()));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("confidence 0.95"));
        assert!(lines[0].contains("!= 0"));
        assert!(lines[1].contains("coverage"));
        assert!(lines[2].trim_start().starts_with("0.0000"));
        assert!(lines[3].trim_start().starts_with("0.5000"));
    }

    #[test]
    fn test_write_results_json_reloads() {
        let table = run();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        write_results_json(&path, &table).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let reloaded: ResultTable = serde_json::from_str(&content).unwrap();
        assert!(reloaded.same_outcomes(&table));
        assert_eq!(reloaded.confidence(), table.confidence());
    }
}
