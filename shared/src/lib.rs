//! Shared value types for nativecall.
//!
//! Holds the types that both the invocation core and generated native
//! wrappers pass around without depending on each other.

pub mod error;
pub mod math;
pub mod vector_arg;

pub use error::VectorError;
pub use math::{RawVector, Vector3};
pub use vector_arg::VectorArg;
