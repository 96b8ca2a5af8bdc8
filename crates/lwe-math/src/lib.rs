#![crate_name = "lwe_math"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Mathematical utilities for the LWE dataset generator: modular arithmetic
//! over `Z_q` and the circulant ring used to obfuscate secrets.

mod errors;
pub mod rq;
pub mod zq;

pub use errors::{Error, Result};
