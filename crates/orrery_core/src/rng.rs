//! Random source construction

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build the engine's random source; a fixed seed makes spawns and shake
/// noise reproducible
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
