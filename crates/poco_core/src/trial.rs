//! Single-trial execution
//!
//! A trial generates one dataset and fits the estimator to it. Templates are
//! only borrowed immutably; the dataset and the fit are owned by the call, so
//! concurrent trials never observe each other's state.

use crate::error::TrialError;
use crate::estimators::Estimator;
use crate::generators::Generator;
use crate::model::{TrialOutcome, WorkerId};

/// One (effect size, seed) unit of work, at position `index` in dispatch order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    pub index: usize,
    pub effect_size: f64,
    pub seed: u64,
}

/// Flatten the grid into trials: effect sizes outer, replications inner.
///
/// Trial `i` receives `seeds[i]`; `seeds` must hold one seed per trial.
pub fn plan_trials(effect_sizes: &[f64], n_simulations: usize, seeds: &[u64]) -> Vec<Trial> {
    debug_assert_eq!(seeds.len(), effect_sizes.len() * n_simulations);
    effect_sizes
        .iter()
        .flat_map(|&effect_size| std::iter::repeat_n(effect_size, n_simulations))
        .zip(seeds)
        .enumerate()
        .map(|(index, (effect_size, &seed))| Trial {
            index,
            effect_size,
            seed,
        })
        .collect()
}

/// Run one trial: generate, fit, and read back the estimator's outputs
pub fn execute<E, G>(estimator: &E, generator: &G, trial: &Trial) -> Result<TrialOutcome, TrialError>
where
    G: Generator + ?Sized,
    E: Estimator<G::Dataset> + ?Sized,
{
    let Trial {
        index,
        effect_size,
        seed,
    } = *trial;

    let data = generator
        .generate(effect_size, seed)
        .map_err(|source| TrialError::Generate {
            index,
            effect_size,
            seed,
            source,
        })?;

    let fit = estimator.fit(&data).map_err(|source| TrialError::Fit {
        index,
        effect_size,
        seed,
        source,
    })?;

    for (field, value) in [
        ("estimate", fit.estimate),
        ("standard_error", fit.standard_error),
        ("ci_lower", fit.ci_lower),
        ("ci_upper", fit.ci_upper),
    ] {
        if !value.is_finite() {
            return Err(TrialError::NonFinite {
                index,
                effect_size,
                seed,
                field,
                value,
            });
        }
    }

    tracing::trace!(index, effect_size, seed, estimate = fit.estimate, "trial complete");

    Ok(TrialOutcome {
        effect_size,
        estimate: fit.estimate,
        standard_error: fit.standard_error,
        ci_lower: fit.ci_lower,
        ci_upper: fit.ci_upper,
        confidence: estimator.confidence(),
        worker_id: WorkerId::current(),
    })
}
