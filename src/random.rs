//! Seeded random number generation.
//!
//! Every randomized operation in the crate takes `&mut R where R: Rng`, so
//! callers that want paired experiments (e.g. SA and IG under identical
//! draws) can hand the same seeded generator to both runners.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed, falling back to OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
