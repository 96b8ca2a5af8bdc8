#![crate_name = "lwe_util"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Sampling utilities for the LWE dataset generator.

use rand::{seq::index, thread_rng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Create a ChaCha generator.
///
/// With a seed the generator is fully deterministic; without one it is seeded
/// from the thread-local entropy source.
pub fn rng_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => {
            let mut seed = <ChaCha8Rng as SeedableRng>::Seed::default();
            thread_rng().fill(&mut seed);
            ChaCha8Rng::from_seed(seed)
        }
    }
}

/// Offset an optional seed, wrapping on overflow.
pub fn offset_seed(seed: Option<u64>, offset: u64) -> Option<u64> {
    seed.map(|s| s.wrapping_add(offset))
}

/// Sample `amount` distinct indices uniformly in `[0, length)`.
///
/// The indices are returned in the order in which they were drawn.
pub fn sample_distinct_indices<R: RngCore>(
    length: usize,
    amount: usize,
    rng: &mut R,
) -> Result<Vec<usize>, &'static str> {
    if amount > length {
        return Err("The number of indices exceeds the length of the range");
    }
    Ok(index::sample(rng, length, amount).into_vec())
}

/// Round to the nearest integer, ties to even.
pub fn round_half_even(x: f64) -> f64 {
    x.round_ties_even()
}

/// Sample a vector of independent Gaussian values of standard deviation
/// `sigma`, rounded to the nearest integer (ties to even).
///
/// A standard deviation of zero yields a zero vector.
pub fn sample_vec_normal<R: RngCore>(
    vector_size: usize,
    sigma: f64,
    rng: &mut R,
) -> Result<Vec<i64>, &'static str> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err("The standard deviation should be a finite non-negative number");
    }
    let normal = Normal::new(0.0, sigma).map_err(|_| "Invalid normal distribution")?;
    Ok((0..vector_size)
        .map(|_| round_half_even(normal.sample(rng)) as i64)
        .collect())
}
