use std::path::PathBuf;

use clap::Parser;
use poco::report::{render_summary, write_results_json};
use poco::{RunOverrides, Study, init_logging};
use poco_core::Hypothesis;
use poco_core::summary::summarize;

#[derive(Parser, Debug)]
#[command(name = "poco")]
#[command(about = "Monte Carlo power and coverage simulations")]
struct Args {
    /// Path to the YAML study file
    study: PathBuf,

    /// Master seed (overrides the study)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads; -1 uses all cores (overrides the study)
    #[arg(short, long, allow_hyphen_values = true)]
    jobs: Option<i64>,

    /// Recompute intervals at this confidence level after the run
    #[arg(short, long)]
    confidence: Option<f64>,

    /// Re-derive significance for this alternative: "!=", ">" or "<"
    #[arg(long)]
    hypothesis: Option<Hypothesis>,

    /// Write the result table as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let study = Study::load(&args.study)?;
    let overrides = RunOverrides {
        seed: args.seed,
        workers: args.jobs,
        confidence: args.confidence,
        hypothesis: args.hypothesis,
    };
    let runner = study.run(&overrides)?;
    let Some(table) = runner.results() else {
        color_eyre::eyre::bail!("simulation produced no results");
    };

    print!("{}", render_summary(&summarize(table)));

    if let Some(path) = &args.output {
        write_results_json(path, table)?;
        tracing::info!(path = %path.display(), rows = table.len(), "Wrote results");
    }

    Ok(())
}
