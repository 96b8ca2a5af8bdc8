//! Polynomial obfuscation of secrets.
//!
//! A secret `s` of dimension `n` is mapped to
//! `s' = Σ_d c_d · s^(⊗d) mod q_obf`, where `s^(⊗d)` is the degree-`d`
//! self-convolution of `s` in the circulant ring `Z_{q_obf}[x] / (x^n - 1)`
//! and the coefficients `c_d` are drawn from a small signed set.

use crate::{Error, ParametersError, Result};
use itertools::Itertools;
use lwe_math::{rq::Context, zq::Modulus};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Ring size used by the reference datasets.
pub const DEFAULT_OBFUSCATION_MODULUS: u64 = 842779;

/// Seed of the generator drawing the obfuscation coefficients.
pub const COEFFICIENT_SEED: u64 = 0;

/// Mapping from degree to obfuscation coefficient.
pub type Coefficients = BTreeMap<usize, i64>;

/// Parameters of the polynomial obfuscation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscationParameters {
    /// Ring modulus q_obf.
    modulus: u64,
    /// Exponents to combine, in the order coefficients are drawn.
    degrees: Box<[usize]>,
    /// Set the coefficients are drawn from.
    coeff_choices: Box<[i64]>,
}

impl ObfuscationParameters {
    /// Returns the ring modulus.
    pub const fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Returns the degrees.
    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// Returns the coefficient choices.
    pub fn coeff_choices(&self) -> &[i64] {
        &self.coeff_choices
    }

    /// Parameters of the reference datasets: `q_obf = 842779`,
    /// degrees `{1, 3, 5}` and coefficients in `{-1, 1}`.
    pub fn default_arc() -> Arc<Self> {
        ObfuscationParametersBuilder::new().build_arc().unwrap()
    }

    /// Draw one coefficient per degree from the coefficient choices.
    ///
    /// The generator is seeded with [`COEFFICIENT_SEED`], so the result only
    /// depends on the degrees and the choices.
    pub fn draw_coefficients(&self) -> Result<Coefficients> {
        if self.coeff_choices.is_empty() {
            return Err(ParametersError::TooFewSpecified(
                "At least one coefficient choice is needed to draw coefficients".to_string(),
            )
            .into());
        }
        let mut rng = ChaCha8Rng::seed_from_u64(COEFFICIENT_SEED);
        let coeffs = self
            .degrees
            .iter()
            .map(|d| {
                let i = rng.gen_range(0..self.coeff_choices.len());
                (*d, self.coeff_choices[i])
            })
            .collect::<Coefficients>();
        Ok(coeffs)
    }

    /// Obfuscate a secret.
    ///
    /// When `coeffs` is `None`, coefficients are drawn with
    /// [`Self::draw_coefficients`]. A degree missing from `coeffs` contributes
    /// nothing, and entries of `coeffs` for degrees outside of
    /// [`Self::degrees`] are ignored. Returns `s'`, with entries in
    /// `[0, q_obf)`, and the coefficients used.
    pub fn obfuscate(
        &self,
        s: &[i64],
        coeffs: Option<&Coefficients>,
    ) -> Result<(Vec<i64>, Coefficients)> {
        if s.is_empty() {
            return Err(Error::invalid_dimension(0));
        }
        let coeffs = match coeffs {
            Some(c) => c.clone(),
            None => self.draw_coefficients()?,
        };

        let ctx = Context::new(self.modulus, s.len())?;
        let q = &ctx.q;
        let s = q.reduce_vec_i64(s);

        let mut s_prime = vec![0u64; ctx.degree()];
        for d in self.degrees.iter() {
            let c = q.reduce_i64(coeffs.get(d).copied().unwrap_or_default());
            if c == 0 {
                continue;
            }
            // Every power restarts from the raw secret.
            let term = ctx.pow(&s, *d)?;
            s_prime
                .iter_mut()
                .zip(term)
                .for_each(|(acc, t)| *acc = q.add(*acc, q.mul(c, t)));
        }

        Ok((s_prime.into_iter().map(|v| v as i64).collect(), coeffs))
    }
}

/// Obfuscate a secret with the given parameters; see
/// [`ObfuscationParameters::obfuscate`].
pub fn obfuscate(
    s: &[i64],
    par: &ObfuscationParameters,
    coeffs: Option<&Coefficients>,
) -> Result<(Vec<i64>, Coefficients)> {
    par.obfuscate(s, coeffs)
}

/// Builder for the obfuscation parameters.
#[derive(Debug, Clone)]
pub struct ObfuscationParametersBuilder {
    modulus: u64,
    degrees: Vec<usize>,
    coeff_choices: Vec<i64>,
}

impl ObfuscationParametersBuilder {
    /// Creates a new instance of the builder, initialized with the reference
    /// parameters.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            modulus: DEFAULT_OBFUSCATION_MODULUS,
            degrees: vec![1, 3, 5],
            coeff_choices: vec![-1, 1],
        }
    }

    /// Sets the ring modulus.
    pub fn set_modulus(&mut self, modulus: u64) -> &mut Self {
        self.modulus = modulus;
        self
    }

    /// Sets the degrees to combine.
    pub fn set_degrees(&mut self, degrees: &[usize]) -> &mut Self {
        self.degrees = degrees.to_owned();
        self
    }

    /// Sets the set coefficients are drawn from. It may be empty when the
    /// coefficients are always supplied by the caller.
    pub fn set_coeff_choices(&mut self, choices: &[i64]) -> &mut Self {
        self.coeff_choices = choices.to_owned();
        self
    }

    /// Build a new `ObfuscationParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<ObfuscationParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `ObfuscationParameters`.
    pub fn build(&self) -> Result<ObfuscationParameters> {
        Modulus::new(self.modulus)
            .map_err(|_| ParametersError::InvalidModulus(self.modulus))?;

        if self.degrees.is_empty() {
            return Err(ParametersError::TooFewSpecified(
                "At least one degree must be specified".to_string(),
            )
            .into());
        }
        if let Some(d) = self.degrees.iter().find(|d| **d == 0) {
            return Err(ParametersError::InvalidDegree(*d).into());
        }
        if let Some(d) = self.degrees.iter().duplicates().next() {
            return Err(ParametersError::DuplicateDegree(*d).into());
        }

        Ok(ObfuscationParameters {
            modulus: self.modulus,
            degrees: self.degrees.clone().into_boxed_slice(),
            coeff_choices: self.coeff_choices.clone().into_boxed_slice(),
        })
    }
}
