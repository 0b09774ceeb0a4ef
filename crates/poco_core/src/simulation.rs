//! Monte Carlo orchestration
//!
//! The runner expands the effect-size grid into trials, derives one seed per
//! trial, executes trials on a worker pool and assembles the result table in
//! dispatch order.

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{info, warn};

use crate::config::{FailurePolicy, SimulationConfig};
use crate::error::{ConfigError, Result, SimulationError, TrialError};
use crate::estimators::Estimator;
use crate::generators::Generator;
use crate::model::{
    Archive, Confidence, Hypothesis, ResultTable, SimulationProgress, TrialFailure, TrialOutcome,
};
use crate::seed::derive_seeds;
use crate::trial::{Trial, execute, plan_trials};

/// Owns the run configuration, the live result table and its archive
pub struct SimulationRunner<E, G> {
    pub(crate) estimator: E,
    pub(crate) generator: G,
    pub(crate) config: SimulationConfig,
    pub(crate) confidence: Confidence,
    pub(crate) hypothesis: Hypothesis,
    pub(crate) results: Option<ResultTable>,
    pub(crate) archive: Archive,
    progress: SimulationProgress,
}

impl<E, G> SimulationRunner<E, G>
where
    G: Generator,
    E: Estimator<G::Dataset>,
{
    /// Validate `config` and create a runner with no results yet
    pub fn new(
        estimator: E,
        generator: G,
        config: SimulationConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            confidence: estimator.confidence(),
            hypothesis: config.hypothesis,
            estimator,
            generator,
            config,
            results: None,
            archive: Archive::default(),
            progress: SimulationProgress::new(),
        })
    }

    /// Report trial counters through `progress` instead of a private handle
    #[must_use]
    pub fn with_progress(mut self, progress: SimulationProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Simulate every (effect size, replication) pair.
    ///
    /// Either returns the complete table or an error; on error the previous
    /// table, if any, is left in place. A successful run starts a fresh
    /// archive, since prior snapshots describe different simulations.
    pub fn run(&mut self) -> Result<&ResultTable> {
        let total = self.config.validate()?;
        let seeds = derive_seeds(self.config.seed, total)?;
        let trials = plan_trials(&self.config.effect_sizes, self.config.n_simulations, &seeds);

        info!(
            total_trials = total,
            effect_sizes = self.config.effect_sizes.len(),
            simulations_per_effect = self.config.n_simulations,
            workers = self.config.workers.resolve(),
            seed = self.config.seed,
            "Starting simulation"
        );
        let started = Instant::now();
        self.progress.reset(total);

        let (outcomes, failures) = self.execute_trials(&trials)?;
        if !failures.is_empty() {
            warn!(
                failed = failures.len(),
                total, "Trials failed and were excluded from the results"
            );
        }

        // A fresh run reports the estimator's native intervals.
        self.confidence = self.estimator.confidence();
        let table = ResultTable::from_outcomes(
            outcomes,
            self.confidence,
            self.hypothesis,
            self.config.null_value,
        )
        .with_failures(failures);

        info!(
            rows = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Simulation complete"
        );

        self.archive.clear();
        Ok(&*self.results.insert(table))
    }

    fn execute_trials(&self, trials: &[Trial]) -> Result<(Vec<TrialOutcome>, Vec<TrialFailure>)> {
        let run_one = |trial: &Trial| {
            let outcome = execute(&self.estimator, &self.generator, trial);
            self.progress.increment();
            outcome
        };
        let policy = self.config.failure_policy;

        #[cfg(feature = "parallel")]
        {
            let pool = build_pool(self.config.workers)?;
            pool.install(|| match policy {
                FailurePolicy::Abort => run_until_first_failure(trials, run_one)
                    .map(|outcomes| (outcomes, Vec::new()))
                    .map_err(SimulationError::from),
                FailurePolicy::Collect => {
                    let results: Vec<_> = trials.par_iter().map(run_one).collect();
                    Ok(partition(trials, results))
                }
            })
        }

        #[cfg(not(feature = "parallel"))]
        {
            match policy {
                FailurePolicy::Abort => trials
                    .iter()
                    .map(run_one)
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map(|outcomes| (outcomes, Vec::new()))
                    .map_err(SimulationError::from),
                FailurePolicy::Collect => {
                    let results: Vec<_> = trials.iter().map(run_one).collect();
                    Ok(partition(trials, results))
                }
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The live result table, if a run has completed
    pub fn results(&self) -> Option<&ResultTable> {
        self.results.as_ref()
    }

    pub fn into_results(self) -> Option<ResultTable> {
        self.results
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Confidence level of the live view
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Alternative-hypothesis direction of the live view
    pub fn hypothesis(&self) -> Hypothesis {
        self.hypothesis
    }

    pub fn null_value(&self) -> f64 {
        self.config.null_value
    }

    pub fn progress(&self) -> &SimulationProgress {
        &self.progress
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

#[cfg(feature = "parallel")]
fn build_pool(
    workers: crate::config::Workers,
) -> std::result::Result<rayon::ThreadPool, ConfigError> {
    use crate::config::Workers;

    let threads = match workers {
        // rayon picks the number of logical cores
        Workers::AllCores => 0,
        Workers::Fixed(n) => n.get(),
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("poco-worker-{i}"))
        .build()
        .map_err(|e| ConfigError::WorkerPool(e.to_string()))
}

/// Run trials in parallel and fail with the lowest-index trial error.
///
/// Trials after the lowest failure seen so far are skipped. Every trial below
/// the final lowest failure still runs, so the reported error does not depend
/// on scheduling.
#[cfg(feature = "parallel")]
fn run_until_first_failure<F>(
    trials: &[Trial],
    run_one: F,
) -> std::result::Result<Vec<TrialOutcome>, TrialError>
where
    F: Fn(&Trial) -> std::result::Result<TrialOutcome, TrialError> + Sync,
{
    use std::sync::atomic::{AtomicUsize, Ordering};

    let first_failure = AtomicUsize::new(usize::MAX);
    let results: Vec<Option<_>> = trials
        .par_iter()
        .map(|trial| {
            if trial.index > first_failure.load(Ordering::Relaxed) {
                return None;
            }
            let result = run_one(trial);
            if result.is_err() {
                first_failure.fetch_min(trial.index, Ordering::Relaxed);
            }
            Some(result)
        })
        .collect();

    // Skipped slots all follow the lowest failure, so it is met first
    let mut outcomes = Vec::with_capacity(results.len());
    for result in results.into_iter().flatten() {
        outcomes.push(result?);
    }
    Ok(outcomes)
}

/// Split per-trial results into outcomes and failures, both in dispatch order
fn partition(
    trials: &[Trial],
    results: Vec<std::result::Result<TrialOutcome, TrialError>>,
) -> (Vec<TrialOutcome>, Vec<TrialFailure>) {
    let mut outcomes = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (trial, result) in trials.iter().zip(results) {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => failures.push(TrialFailure {
                index: trial.index,
                effect_size: trial.effect_size,
                seed: trial.seed,
                message: error_chain(&err),
            }),
        }
    }
    (outcomes, failures)
}

/// Render an error and its sources as `outer: inner: ...`
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
