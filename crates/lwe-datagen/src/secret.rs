//! Sparse binary secrets.

use crate::{Error, Result};
use lwe_util::{rng_from_seed, sample_distinct_indices};
use rand::RngCore;

/// Sample a binary secret of dimension `n` with exactly `hamming` entries set
/// to one, at positions drawn uniformly without replacement.
///
/// The parameters are validated before any randomness is consumed.
pub fn sample_secret<R: RngCore>(n: usize, hamming: usize, rng: &mut R) -> Result<Vec<i64>> {
    if n == 0 {
        return Err(Error::invalid_dimension(n));
    }
    if hamming > n {
        return Err(Error::hamming_too_large(hamming, n));
    }

    let ones = sample_distinct_indices(n, hamming, rng).map_err(|e| {
        Error::DefaultError(format!("Failed to sample the secret support: {e}"))
    })?;
    let mut s = vec![0i64; n];
    ones.into_iter().for_each(|i| s[i] = 1);
    Ok(s)
}

/// Sample a binary secret from an optional seed.
///
/// The same `(n, hamming, seed)` triple always yields the same secret; without
/// a seed the draw is not reproducible.
pub fn sample_secret_with_seed(n: usize, hamming: usize, seed: Option<u64>) -> Result<Vec<i64>> {
    sample_secret(n, hamming, &mut rng_from_seed(seed))
}

/// Number of non-zero entries of a vector.
pub fn hamming_weight(s: &[i64]) -> usize {
    s.iter().filter(|si| **si != 0).count()
}

#[cfg(test)]
mod tests {
    use super::{hamming_weight, sample_secret, sample_secret_with_seed};
    use crate::ParametersError;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn reference_secret() {
        let s = sample_secret_with_seed(10, 3, Some(111)).unwrap();
        assert_eq!(s.len(), 10);
        assert_eq!(hamming_weight(&s), 3);
        assert!(s.iter().all(|si| *si == 0 || *si == 1));
        assert_eq!(s, vec![0, 0, 0, 0, 1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn edge_weights() {
        assert_eq!(sample_secret_with_seed(10, 0, Some(1)).unwrap(), vec![0; 10]);
        assert_eq!(sample_secret_with_seed(10, 10, Some(1)).unwrap(), vec![1; 10]);
        assert_eq!(hamming_weight(&sample_secret_with_seed(30, 3, None).unwrap()), 3);
    }

    #[test]
    fn invalid_parameters_consume_no_randomness() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let e = sample_secret(10, 11, &mut rng).unwrap_err();
        assert_eq!(
            e.as_parameters_error(),
            Some(&ParametersError::HammingTooLarge(11, 10))
        );
        let e = sample_secret(0, 0, &mut rng).unwrap_err();
        assert_eq!(
            e.as_parameters_error(),
            Some(&ParametersError::InvalidDimension(0))
        );
        assert_eq!(rng.next_u64(), ChaCha8Rng::seed_from_u64(5).next_u64());
    }

    #[test]
    fn different_seeds() {
        // With 252 possible supports, a handful of seeds cannot all collide.
        let secrets = (0..8u64)
            .map(|seed| sample_secret_with_seed(10, 5, Some(seed)).unwrap())
            .collect::<Vec<_>>();
        assert!(secrets.iter().any(|s| *s != secrets[0]));
    }

    proptest! {
        #[test]
        fn hamming_invariant(n in 1usize..64, hamming_ratio in 0.0f64..=1.0, seed: u64) {
            let hamming = ((n as f64) * hamming_ratio).floor() as usize;
            let s = sample_secret_with_seed(n, hamming, Some(seed)).unwrap();
            prop_assert_eq!(s.len(), n);
            prop_assert_eq!(hamming_weight(&s), hamming);
            prop_assert_eq!(s, sample_secret_with_seed(n, hamming, Some(seed)).unwrap());
        }
    }
}
