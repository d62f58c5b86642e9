//! Random column generators for tests and benches

use rand::RngCore;
use rand_distr::{Distribution, LogNormal};

/// A column of `length` random keys, each `width` bytes wide
pub fn random_keys(width: usize, length: usize, rng: &mut dyn RngCore) -> Vec<Vec<u8>> {
    (0..length)
        .map(|_| {
            let mut key = vec![0u8; width];
            rng.fill_bytes(&mut key);
            key
        })
        .collect()
}

/// An integer column with an age-like skewed distribution
pub fn ages_column(length: usize, rng: &mut dyn RngCore) -> Vec<i64> {
    let log_normal = LogNormal::new(3.5, 0.35).expect("valid distribution parameters");
    (0..length)
        .map(|_| log_normal.sample(rng) as i64)
        .collect()
}
