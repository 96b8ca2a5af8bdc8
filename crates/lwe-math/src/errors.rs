use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates an invalid modulus.
    #[error("Invalid modulus: modulus {0} should be between 1 and (1 << 62) - 1.")]
    InvalidModulus(u64),

    /// Indicates an invalid ring degree.
    #[error("Invalid degree: {0}")]
    InvalidDegree(usize),

    /// Indicates that an exponent of a ring power is invalid.
    #[error("Invalid exponent: {0}")]
    InvalidExponent(usize),

    /// Indicates that two operands have mismatching lengths.
    #[error("Length mismatch: expected {0}, found {1}")]
    LengthMismatch(usize, usize),

    /// Indicates a default error.
    #[error("{0}")]
    Default(String),
}
