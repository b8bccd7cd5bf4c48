//! Seeded random candidate tables.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use siteselect_core::{Candidate, ScoreTable};

/// `n` candidates with uniform scores in `[0, 1)`, reproducible per seed.
pub fn random_candidates(n: usize, seed: u64) -> Vec<Candidate> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|id| {
            Candidate::new(id, rng.random(), rng.random(), rng.random())
                .with_area(rng.random_range(0.0..50.0))
        })
        .collect()
}

pub fn random_table(n: usize, seed: u64) -> ScoreTable {
    match ScoreTable::new(random_candidates(n, seed)) {
        Ok(table) => table,
        Err(e) => panic!("random table is invalid: {e}"),
    }
}
