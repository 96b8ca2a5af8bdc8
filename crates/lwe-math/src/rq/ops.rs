//! Ring operations.

use super::Context;
use crate::{Error, Result};

impl Context {
    /// Full linear convolution of two vectors of residues, reduced modulo q.
    ///
    /// The output has length `a.len() + b.len() - 1`, or is empty when either
    /// operand is empty.
    pub fn convolve(&self, a: &[u64], b: &[u64]) -> Vec<u64> {
        if a.is_empty() || b.is_empty() {
            return vec![];
        }
        let q = &self.q;
        let mut c = vec![0u64; a.len() + b.len() - 1];
        for (i, ai) in a.iter().enumerate() {
            let ai = q.reduce(*ai);
            if ai == 0 {
                continue;
            }
            for (j, bj) in b.iter().enumerate() {
                c[i + j] = q.add(c[i + j], q.mul(ai, q.reduce(*bj)));
            }
        }
        c
    }

    /// Fold a convolution result back to `degree` coefficients by adding the
    /// block `[n, 2n)` onto the block `[0, n)`, both zero padded, modulo q.
    ///
    /// Returns an error if the input is longer than `2n`.
    pub fn circular_wrap(&self, c: &[u64]) -> Result<Vec<u64>> {
        let n = self.degree;
        if c.len() > 2 * n {
            return Err(Error::LengthMismatch(2 * n, c.len()));
        }
        let q = &self.q;
        let mut out = vec![0u64; n];
        for (k, ck) in c.iter().enumerate() {
            out[k % n] = q.add(out[k % n], q.reduce(*ck));
        }
        Ok(out)
    }

    /// Product of two ring elements: convolution followed by the circular
    /// fold.
    pub fn mul(&self, a: &[u64], b: &[u64]) -> Result<Vec<u64>> {
        self.check_length(a)?;
        self.check_length(b)?;
        self.circular_wrap(&self.convolve(a, b))
    }

    /// Degree-`d` self-convolution of `s`.
    ///
    /// `pow(s, 1)` is `s` reduced modulo q; each further power multiplies the
    /// running term by the original `s`.
    pub fn pow(&self, s: &[u64], d: usize) -> Result<Vec<u64>> {
        if d == 0 {
            return Err(Error::InvalidExponent(d));
        }
        self.check_length(s)?;
        let mut term = s.iter().map(|si| self.q.reduce(*si)).collect::<Vec<_>>();
        for _ in 1..d {
            term = self.mul(&term, s)?;
        }
        Ok(term)
    }
}
