use std::fmt::Debug;

use crate::{zq::Modulus, Error, Result};

/// Struct that holds the context associated with elements in rq.
#[derive(Clone, PartialEq, Eq)]
pub struct Context {
    /// Modulus operator for the coefficients
    pub q: Modulus,
    /// Number of coefficients of a ring element
    pub degree: usize,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("modulus", &self.q.modulus())
            .field("degree", &self.degree)
            .finish()
    }
}

impl Context {
    /// Creates a context from a modulus and a number of coefficients.
    ///
    /// Returns an error if the modulus is not between 1 and 2^62 - 1 or if
    /// the degree is zero.
    pub fn new(modulus: u64, degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(Error::InvalidDegree(degree));
        }
        Ok(Self {
            q: Modulus::new(modulus)?,
            degree,
        })
    }

    /// Returns the modulus.
    pub const fn modulus(&self) -> u64 {
        self.q.modulus()
    }

    /// Returns the number of coefficients of the ring elements.
    pub const fn degree(&self) -> usize {
        self.degree
    }

    /// Checks that a slice has the length of a ring element.
    pub(crate) fn check_length(&self, a: &[u64]) -> Result<()> {
        if a.len() != self.degree {
            Err(Error::LengthMismatch(self.degree, a.len()))
        } else {
            Ok(())
        }
    }
}
