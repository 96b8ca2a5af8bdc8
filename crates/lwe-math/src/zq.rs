//! Modular arithmetic over `Z_q`.

use crate::{Error, Result};
use itertools::izip;
use rand::{Rng, RngCore};

/// Largest modulus supported, so that residues always fit in an `i64` and
/// products fit in a `u128`.
pub const MAX_MODULUS: u64 = (1 << 62) - 1;

/// Structure encapsulating an integer modulus up to 62 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modulus {
    p: u64,
}

impl Modulus {
    /// Create a modulus from an integer between 1 and 2^62 - 1.
    pub fn new(p: u64) -> Result<Self> {
        if p == 0 || p > MAX_MODULUS {
            Err(Error::InvalidModulus(p))
        } else {
            Ok(Self { p })
        }
    }

    /// Returns the value of the modulus.
    pub const fn modulus(&self) -> u64 {
        self.p
    }

    /// Reduce an unsigned integer modulo p.
    pub const fn reduce(&self, a: u64) -> u64 {
        a % self.p
    }

    /// Reduce a signed integer to its residue in [0, p).
    pub const fn reduce_i64(&self, a: i64) -> u64 {
        (a as i128).rem_euclid(self.p as i128) as u64
    }

    /// Reduce a 128-bit integer modulo p.
    pub const fn reduce_u128(&self, a: u128) -> u64 {
        (a % (self.p as u128)) as u64
    }

    /// Modular addition of residues.
    pub const fn add(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.p && b < self.p);
        let c = a + b;
        if c >= self.p {
            c - self.p
        } else {
            c
        }
    }

    /// Modular multiplication of residues.
    pub const fn mul(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.p && b < self.p);
        self.reduce_u128((a as u128) * (b as u128))
    }

    /// Reduce a vector of signed integers to residues in [0, p).
    pub fn reduce_vec_i64(&self, a: &[i64]) -> Vec<u64> {
        a.iter().map(|ai| self.reduce_i64(*ai)).collect()
    }

    /// Inner product of two vectors of residues, modulo p.
    ///
    /// Products are accumulated in 128 bits and reduced once.
    pub fn dot(&self, a: &[u64], b: &[u64]) -> Result<u64> {
        if a.len() != b.len() {
            return Err(Error::LengthMismatch(a.len(), b.len()));
        }
        let mut acc = 0u128;
        for (ai, bi) in izip!(a, b) {
            acc += (*ai as u128) * (*bi as u128);
            // Keep the accumulator far from overflow for long vectors.
            if acc >= 1 << 126 {
                acc %= self.p as u128;
            }
        }
        Ok(self.reduce_u128(acc))
    }

    /// Sample a vector of residues uniformly at random in [0, p).
    pub fn random_vec<R: RngCore>(&self, size: usize, rng: &mut R) -> Vec<u64> {
        (0..size).map(|_| rng.gen_range(0..self.p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Modulus, MAX_MODULUS};
    use crate::Error;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn constructor() {
        assert!(Modulus::new(1).is_ok());
        assert!(Modulus::new(842779).is_ok());
        assert!(Modulus::new(MAX_MODULUS).is_ok());
        assert_eq!(Modulus::new(0), Err(Error::InvalidModulus(0)));
        assert_eq!(
            Modulus::new(MAX_MODULUS + 1),
            Err(Error::InvalidModulus(MAX_MODULUS + 1))
        );
    }

    #[test]
    fn signed_reduction() {
        let q = Modulus::new(842779).unwrap();
        assert_eq!(q.reduce_i64(-1), 842778);
        assert_eq!(q.reduce_i64(-842779), 0);
        assert_eq!(q.reduce_i64(842780), 1);
        assert_eq!(q.reduce_i64(i64::MIN), (i64::MIN as i128).rem_euclid(842779) as u64);
    }

    #[test]
    fn dot_product() {
        let q = Modulus::new(17).unwrap();
        assert_eq!(q.dot(&[1, 2, 3], &[4, 5, 6]), Ok(32 % 17));
        assert_eq!(q.dot(&[], &[]), Ok(0));
        assert_eq!(q.dot(&[1, 2], &[1]), Err(Error::LengthMismatch(2, 1)));

        let q = Modulus::new(MAX_MODULUS).unwrap();
        let a = vec![MAX_MODULUS - 1; 64];
        let expected = (0..64).fold(0u64, |acc, _| q.add(acc, q.mul(MAX_MODULUS - 1, MAX_MODULUS - 1)));
        assert_eq!(q.dot(&a, &a), Ok(expected));
    }

    #[test]
    fn random_vec_is_reduced_and_deterministic() {
        let q = Modulus::new(842779).unwrap();
        let v1 = q.random_vec(1000, &mut ChaCha8Rng::seed_from_u64(7));
        let v2 = q.random_vec(1000, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(v1, v2);
        assert!(v1.iter().all(|vi| *vi < 842779));
    }

    proptest! {
        #[test]
        fn add(p in 1..=MAX_MODULUS, a: u64, b: u64) {
            let q = Modulus::new(p).unwrap();
            let (a, b) = (q.reduce(a), q.reduce(b));
            prop_assert_eq!(q.add(a, b) as u128, (a as u128 + b as u128) % p as u128);
        }

        #[test]
        fn mul(p in 1..=MAX_MODULUS, a: u64, b: u64) {
            let q = Modulus::new(p).unwrap();
            let (a, b) = (q.reduce(a), q.reduce(b));
            prop_assert_eq!(q.mul(a, b) as u128, (a as u128 * b as u128) % p as u128);
        }
    }
}
