#![crate_name = "lwe_datagen"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Generator of synthetic Learning With Errors datasets.
//!
//! A sparse binary secret is sampled, optionally obfuscated by a polynomial
//! combination of its circular self-convolutions, and used to produce LWE
//! samples `(A, b = A·s + e mod q)`.

mod errors;

pub mod dataset;
pub mod lwe;
pub mod obfuscation;
pub mod secret;

pub use errors::{Error, ParametersError, Result};
pub use lwe::{gen_lwe_samples, LweInstance, LweParameters, LweParametersBuilder, RingPolicy};
pub use obfuscation::{obfuscate, ObfuscationParameters, ObfuscationParametersBuilder};
pub use secret::{sample_secret, sample_secret_with_seed};
