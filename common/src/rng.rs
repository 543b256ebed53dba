use rand::prelude::{SeedableRng, StdRng};

/// A fixed seed gives reproducible runs, otherwise the generator is seeded from system entropy.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
