//! LWE sample generation.

use crate::{Error, ParametersError, Result};
use log::debug;
use lwe_math::zq::Modulus;
use lwe_util::{offset_seed, rng_from_seed, sample_vec_normal};
use ndarray::{Array1, Array2};
use rand::RngCore;
use std::sync::Arc;

/// Offset applied to seeds handed to [`gen_lwe_samples`], so that the matrix
/// and noise stream differs from a secret drawn with the same base seed.
pub const LWE_SEED_OFFSET: u64 = 1000;

/// How secret entries are related to the LWE modulus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RingPolicy {
    /// Secret entries are reduced modulo q before the inner products.
    #[default]
    Reduce,
    /// Secret entries must already lie in [0, q).
    Strict,
}

/// Parameters of the LWE sample generator.
#[derive(Debug, Clone, PartialEq)]
pub struct LweParameters {
    /// Number of samples m.
    samples: usize,
    /// LWE modulus q.
    modulus: u64,
    /// Standard deviation of the noise.
    sigma: f64,
    ring_policy: RingPolicy,
}

impl LweParameters {
    /// Returns the number of samples.
    pub const fn samples(&self) -> usize {
        self.samples
    }

    /// Returns the LWE modulus.
    pub const fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Returns the noise standard deviation.
    pub const fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Returns the ring policy.
    pub const fn ring_policy(&self) -> RingPolicy {
        self.ring_policy
    }
}

/// Builder for the LWE parameters.
#[derive(Debug, Clone)]
pub struct LweParametersBuilder {
    samples: usize,
    modulus: u64,
    sigma: f64,
    ring_policy: RingPolicy,
}

impl LweParametersBuilder {
    /// Creates a new instance of the builder.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            samples: Default::default(),
            modulus: Default::default(),
            sigma: 3.0,
            ring_policy: Default::default(),
        }
    }

    /// Sets the number of samples m.
    pub fn set_samples(&mut self, samples: usize) -> &mut Self {
        self.samples = samples;
        self
    }

    /// Sets the LWE modulus q.
    pub fn set_modulus(&mut self, modulus: u64) -> &mut Self {
        self.modulus = modulus;
        self
    }

    /// Sets the noise standard deviation.
    pub fn set_sigma(&mut self, sigma: f64) -> &mut Self {
        self.sigma = sigma;
        self
    }

    /// Sets the ring policy.
    pub fn set_ring_policy(&mut self, ring_policy: RingPolicy) -> &mut Self {
        self.ring_policy = ring_policy;
        self
    }

    /// Build a new `LweParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<LweParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `LweParameters`.
    pub fn build(&self) -> Result<LweParameters> {
        Modulus::new(self.modulus).map_err(|_| ParametersError::InvalidModulus(self.modulus))?;
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(Error::invalid_sigma(self.sigma));
        }
        Ok(LweParameters {
            samples: self.samples,
            modulus: self.modulus,
            sigma: self.sigma,
            ring_policy: self.ring_policy,
        })
    }
}

/// An LWE instance `(A, b, e)` with `b = A·s + e mod q`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LweInstance {
    /// Public matrix, `m × n`, entries in [0, q).
    pub a: Array2<i64>,
    /// Observations, entries in [0, q).
    pub b: Array1<i64>,
    /// Noise reduced to [0, q).
    pub e: Array1<i64>,
    modulus: u64,
}

impl LweInstance {
    /// Generate an instance for `secret`.
    ///
    /// `A` is drawn first, row by row, then the `m` noise values.
    pub fn generate<R: RngCore>(
        secret: &[i64],
        par: &LweParameters,
        rng: &mut R,
    ) -> Result<Self> {
        let n = secret.len();
        let m = par.samples;
        if n == 0 {
            return Err(Error::invalid_dimension(n));
        }
        let size = m
            .checked_mul(n)
            .ok_or(ParametersError::TooManySamples(m, n))?;
        let q = Modulus::new(par.modulus)?;

        if par.ring_policy == RingPolicy::Strict {
            if let Some((index, value)) = secret
                .iter()
                .enumerate()
                .find(|(_, si)| **si < 0 || **si as u64 >= par.modulus)
            {
                return Err(Error::RingMismatch {
                    index,
                    value: *value,
                    modulus: par.modulus,
                });
            }
        }
        let s = q.reduce_vec_i64(secret);

        let a = q.random_vec(size, rng);
        let e = sample_vec_normal(m, par.sigma, rng)
            .map_err(|e| Error::DefaultError(format!("Failed to sample the noise: {e}")))?;
        let e = q.reduce_vec_i64(&e);

        let b = a
            .chunks(n)
            .zip(e.iter())
            .map(|(row, ei)| -> Result<u64> { Ok(q.add(q.dot(row, &s)?, *ei)) })
            .collect::<Result<Vec<u64>>>()?;

        debug!("Generated {m} LWE samples of dimension {n} modulo {}", par.modulus);

        Ok(Self {
            a: Array2::from_shape_vec((m, n), to_signed(a))?,
            b: Array1::from_vec(to_signed(b)),
            e: Array1::from_vec(to_signed(e)),
            modulus: par.modulus,
        })
    }

    /// Generate an instance from an optional seed; the seed is offset by
    /// [`LWE_SEED_OFFSET`].
    pub fn generate_with_seed(
        secret: &[i64],
        par: &LweParameters,
        seed: Option<u64>,
    ) -> Result<Self> {
        let mut rng = rng_from_seed(offset_seed(seed, LWE_SEED_OFFSET));
        Self::generate(secret, par, &mut rng)
    }

    /// Create an instance from existing arrays, checking their shapes.
    pub fn try_from_arrays(
        a: Array2<i64>,
        b: Array1<i64>,
        e: Array1<i64>,
        modulus: u64,
    ) -> Result<Self> {
        Modulus::new(modulus).map_err(|_| ParametersError::InvalidModulus(modulus))?;
        if b.len() != a.nrows() || e.len() != a.nrows() {
            return Err(Error::DefaultError(format!(
                "Inconsistent shapes: A has {} rows, b has {} entries and e has {}",
                a.nrows(),
                b.len(),
                e.len()
            )));
        }
        Ok(Self { a, b, e, modulus })
    }

    /// Returns the secret dimension n.
    pub fn dimension(&self) -> usize {
        self.a.ncols()
    }

    /// Returns the number of samples m.
    pub fn samples(&self) -> usize {
        self.a.nrows()
    }

    /// Returns the LWE modulus.
    pub const fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Checks that `(A·secret + e) mod q == b` for every row. The secret is
    /// reduced modulo q first, as in [`LweInstance::generate`].
    pub fn verify(&self, secret: &[i64]) -> bool {
        if secret.len() != self.dimension() {
            return false;
        }
        let Ok(q) = Modulus::new(self.modulus) else {
            return false;
        };
        let s = q.reduce_vec_i64(secret);
        self.a
            .rows()
            .into_iter()
            .zip(self.b.iter().zip(self.e.iter()))
            .all(|(row, (bi, ei))| {
                let row = row.iter().map(|aij| q.reduce_i64(*aij)).collect::<Vec<_>>();
                match q.dot(&row, &s) {
                    Ok(dot) => *bi >= 0 && q.add(dot, q.reduce_i64(*ei)) == *bi as u64,
                    Err(_) => false,
                }
            })
    }
}

/// Generate `m` LWE samples for `secret`; see
/// [`LweInstance::generate_with_seed`].
pub fn gen_lwe_samples(
    secret: &[i64],
    par: &LweParameters,
    seed: Option<u64>,
) -> Result<LweInstance> {
    LweInstance::generate_with_seed(secret, par, seed)
}

fn to_signed(v: Vec<u64>) -> Vec<i64> {
    v.into_iter().map(|vi| vi as i64).collect()
}
