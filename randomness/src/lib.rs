pub use rand::{CryptoRng, Rng, RngCore, SeedableRng, distr, seq};

/// A non-deterministic, thread-local generator for production code paths (e.g. backoff jitter)
#[must_use]
pub fn make_pseudo_rng() -> impl Rng {
    rand::rng()
}

/// Uniformly picks a value in `[0, upper_inclusive]`
#[must_use]
pub fn jitter_millis(rng: &mut impl Rng, upper_inclusive: u64) -> u64 {
    rng.random_range(0..=upper_inclusive)
}
