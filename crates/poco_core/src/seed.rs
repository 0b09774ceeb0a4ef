//! Per-trial seed derivation
//!
//! All seeds of a run are drawn up front from one generator seeded with the
//! master seed, so the seed of trial `i` never depends on how trials are
//! later spread across workers or in which order they finish.
//!
//! Trials are treated as statistically independent because their seeds come
//! from one batched draw of a high-quality generator. This is an assumption,
//! not a proven guarantee.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use crate::error::SeedError;

/// Exclusive upper bound of derived seeds; seeds lie in `[0, 2^32 - 1)`
pub const SEED_UPPER_BOUND: u64 = u32::MAX as u64;

/// Derive `count` pairwise distinct seeds from `master_seed`.
///
/// Values already issued are redrawn, which keeps the output a pure function
/// of `(master_seed, count)`: a longer request extends a shorter one.
pub fn derive_seeds(master_seed: u64, count: usize) -> Result<Vec<u64>, SeedError> {
    if count as u64 > SEED_UPPER_BOUND {
        return Err(SeedError::RangeExhausted {
            requested: count,
            available: SEED_UPPER_BOUND,
        });
    }

    let mut rng = StdRng::seed_from_u64(master_seed);
    let mut issued = FxHashSet::default();
    issued.reserve(count);

    let mut seeds = Vec::with_capacity(count);
    while seeds.len() < count {
        let seed = rng.random_range(0..SEED_UPPER_BOUND);
        if issued.insert(seed) {
            seeds.push(seed);
        }
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducible() {
        assert_eq!(derive_seeds(42, 1_000).unwrap(), derive_seeds(42, 1_000).unwrap());
        assert_ne!(derive_seeds(42, 1_000).unwrap(), derive_seeds(43, 1_000).unwrap());
    }

    #[test]
    fn test_prefix_stable() {
        let short = derive_seeds(7, 100).unwrap();
        let long = derive_seeds(7, 10_000).unwrap();
        assert_eq!(short[..], long[..100]);
    }

    #[test]
    fn test_no_duplicates_for_a_million_trials() {
        // Independent 32-bit draws would collide roughly a hundred times here.
        let seeds = derive_seeds(2024, 1_000_000).unwrap();
        let distinct: FxHashSet<u64> = seeds.iter().copied().collect();
        assert_eq!(distinct.len(), seeds.len());
    }

    #[test]
    fn test_seeds_within_range() {
        let seeds = derive_seeds(1, 10_000).unwrap();
        assert!(seeds.iter().all(|&s| s < SEED_UPPER_BOUND));
    }

    #[test]
    fn test_empty_request() {
        assert!(derive_seeds(1, 0).unwrap().is_empty());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_rejects_more_seeds_than_range() {
        let err = derive_seeds(1, SEED_UPPER_BOUND as usize + 1).unwrap_err();
        assert!(matches!(err, SeedError::RangeExhausted { .. }));
    }
}
