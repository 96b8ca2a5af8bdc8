//! Error types for dataset generation.

use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Indicates an error in the underlying mathematical library.
    #[error("{0}")]
    MathError(#[from] lwe_math::Error),

    /// Indicates that the parameters are invalid.
    #[error("{0}")]
    ParametersError(#[from] ParametersError),

    /// Indicates that a dataset of a configuration has invalid parameters.
    #[error("Invalid dataset `{name}`: {source}")]
    InvalidDataset {
        /// Name of the dataset
        name: String,
        /// Parameters error
        source: ParametersError,
    },

    /// Indicates that a secret entry lies outside the ring of the LWE modulus.
    #[error("Secret entry {value} at index {index} is not a residue modulo {modulus}")]
    RingMismatch {
        /// Position of the offending entry
        index: usize,
        /// Value of the offending entry
        value: i64,
        /// LWE modulus
        modulus: u64,
    },

    /// Indicates an I/O error while persisting or loading a dataset.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Indicates a serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Indicates a default error.
    #[error("{0}")]
    DefaultError(String),
}

/// Separate enum to indicate parameters-related errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParametersError {
    /// Indicates that the Hamming weight exceeds the dimension.
    #[error("Invalid Hamming weight: {0} exceeds the dimension {1}")]
    HammingTooLarge(usize, usize),

    /// Indicates that the dimension is invalid.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(usize),

    /// Indicates that a modulus is invalid.
    #[error("Invalid modulus: {0}")]
    InvalidModulus(u64),

    /// Indicates that the noise standard deviation is invalid.
    #[error("Invalid standard deviation: {0} should be finite and non-negative")]
    InvalidSigma(f64),

    /// Indicates that an obfuscation degree is invalid.
    #[error("Invalid degree: {0}")]
    InvalidDegree(usize),

    /// Indicates that an obfuscation degree is listed twice.
    #[error("Duplicated degree: {0}")]
    DuplicateDegree(usize),

    /// Indicates that the number of samples times the dimension overflows.
    #[error("Too many samples: {0} samples of dimension {1} do not fit in memory")]
    TooManySamples(usize, usize),

    /// Indicates that too few parameters were specified.
    #[error("{0}")]
    TooFewSpecified(String),
}

impl Error {
    /// Create a Hamming weight error.
    pub fn hamming_too_large(hamming: usize, n: usize) -> Self {
        ParametersError::HammingTooLarge(hamming, n).into()
    }

    /// Create a dimension error.
    pub fn invalid_dimension(n: usize) -> Self {
        ParametersError::InvalidDimension(n).into()
    }

    /// Create a standard deviation error.
    pub fn invalid_sigma(sigma: f64) -> Self {
        ParametersError::InvalidSigma(sigma).into()
    }

    /// Create a serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Returns the parameters error, if this is one.
    pub fn as_parameters_error(&self) -> Option<&ParametersError> {
        match self {
            Self::ParametersError(e) | Self::InvalidDataset { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::serialization(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::serialization(e.to_string())
    }
}

impl From<ndarray_npy::WriteNpyError> for Error {
    fn from(e: ndarray_npy::WriteNpyError) -> Self {
        Self::serialization(e.to_string())
    }
}

impl From<ndarray_npy::ReadNpyError> for Error {
    fn from(e: ndarray_npy::ReadNpyError) -> Self {
        Self::serialization(e.to_string())
    }
}

impl From<ndarray::ShapeError> for Error {
    fn from(e: ndarray::ShapeError) -> Self {
        Self::DefaultError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, ParametersError};

    #[test]
    fn error_strings() {
        assert_eq!(
            Error::hamming_too_large(11, 10).to_string(),
            "Invalid Hamming weight: 11 exceeds the dimension 10"
        );
        assert_eq!(
            Error::invalid_dimension(0).to_string(),
            "Invalid dimension: 0"
        );
        assert_eq!(
            Error::invalid_sigma(-1.0).to_string(),
            "Invalid standard deviation: -1 should be finite and non-negative"
        );
        assert_eq!(
            Error::RingMismatch {
                index: 2,
                value: 842779,
                modulus: 3329
            }
            .to_string(),
            "Secret entry 842779 at index 2 is not a residue modulo 3329"
        );
        assert_eq!(
            Error::MathError(lwe_math::Error::InvalidDegree(0)).to_string(),
            "Invalid degree: 0"
        );
        assert_eq!(
            Error::serialization("truncated file").to_string(),
            "Serialization error: truncated file"
        );
    }

    #[test]
    fn parameters_error_accessor() {
        assert_eq!(
            Error::invalid_dimension(0).as_parameters_error(),
            Some(&ParametersError::InvalidDimension(0))
        );
        assert_eq!(
            Error::InvalidDataset {
                name: "n10".to_string(),
                source: ParametersError::InvalidSigma(-1.0),
            }
            .as_parameters_error(),
            Some(&ParametersError::InvalidSigma(-1.0))
        );
        assert_eq!(Error::DefaultError("x".to_string()).as_parameters_error(), None);
    }
}
