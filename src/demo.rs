//! Synthetic price source for exercising the signal pipeline.
//!
//! The random source is always supplied by the caller so runs can be
//! reproduced from a seed.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generate `len` prices scattered uniformly within `base ± jitter`.
///
/// `jitter` must be finite and non-negative.
pub fn synthetic_prices<R: Rng>(rng: &mut R, len: usize, base: f64, jitter: f64) -> Vec<f64> {
    (0..len)
        .map(|_| base + rng.gen_range(-jitter..=jitter))
        .collect()
}

/// Build a deterministic generator, drawing a fresh seed when none is given.
///
/// Returns the seed actually used so it can be logged for replay.
pub fn seeded_rng(seed: Option<u64>) -> (ChaCha8Rng, u64) {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    (ChaCha8Rng::seed_from_u64(seed), seed)
}
