//! Circulant ring `Z_q[x] / (x^n - 1)` used to obfuscate LWE secrets.
//!
//! Products are computed as a full linear convolution followed by a circular
//! fold of the high block onto the low block.

mod context;
mod ops;

pub use context::Context;
