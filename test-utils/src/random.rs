use rand_chacha::ChaChaRng;
pub use randomness::{Rng, RngCore, SeedableRng};
use randomness::distr::{Alphanumeric, uniform::SampleRange};
use rstest::fixture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64);

impl Seed {
    #[must_use]
    pub fn from_entropy() -> Self {
        Seed(randomness::make_pseudo_rng().random::<u64>())
    }

    #[must_use]
    pub fn from_u64(v: u64) -> Self {
        Seed(v)
    }

    /// Reads the seed from the `TEST_SEED` env var if set, so a failing run can be reproduced
    #[must_use]
    pub fn from_env_or_entropy() -> Self {
        std::env::var("TEST_SEED")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map_or_else(Self::from_entropy, Self::from_u64)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[fixture]
pub fn random_seed() -> Seed {
    let seed = Seed::from_env_or_entropy();
    println!("Using test seed: {seed}");
    seed
}

#[must_use]
pub fn make_seedable_rng(seed: Seed) -> impl Rng + Clone {
    ChaChaRng::seed_from_u64(seed.0)
}

pub fn make_random_alphanumeric_string(rng: &mut impl Rng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn gen_random_string<R: SampleRange<usize>>(
    rng: &mut impl Rng,
    len_range: R,
) -> String {
    let len = rng.random_range(len_range);
    make_random_alphanumeric_string(rng, len)
}

pub fn gen_random_bytes<R: SampleRange<usize>>(
    rng: &mut impl Rng,
    len_range: R,
) -> Vec<u8> {
    let len = rng.random_range(len_range);
    (0..len).map(|_| rng.random::<u8>()).collect()
}

/// A fill percentage in `[0, 100]`, whole numbers only, as reported by the devices
pub fn gen_fill_level(rng: &mut impl Rng) -> f64 {
    f64::from(rng.random_range(0u8..=100))
}
