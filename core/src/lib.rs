//! nativecall core - typed calls into hash-identified natives
//!
//! This crate marshals arguments into the layout a native runtime expects,
//! crosses the boundary once per call, and decodes the raw results against
//! statically declared output markers.
//!
//! # Architecture
//!
//! - [`Invoker`] - Entry point; builds an [`Invocation`] per call
//! - [`NativeHost`] - The boundary; [`NativeTable`] is an in-process host
//! - [`marker`] - `Ret<K>` / `Out<K>` output markers and their decoding
//! - [`encode`] - Argument encoders, static and dynamic
//! - [`CallbackRegistry`] - Function references the runtime re-enters

pub mod callback;
pub mod config;
pub mod encode;
pub mod error;
pub mod frame;
pub mod host;
pub mod id;
pub mod invoke;
pub mod marker;
pub mod vector;

pub use callback::{CallbackError, CallbackHandle, CallbackRegistry};
pub use config::{ConfigError, InvokerConfig};
pub use encode::{EncodedArgument, IntoArguments, StructuredObject};
pub use error::{BoundaryError, ErrorKind, InvokeError};
pub use frame::{CallFrame, RawSlot, ResultBuffer};
pub use host::{NativeContext, NativeHost, NativeTable};
pub use id::NativeId;
pub use invoke::{Invocation, Invoker};
pub use marker::{Out, OutputSet, Ret, kind};

// Re-export shared vector types
pub use nativecall_shared::{Vector3, VectorArg, VectorError};
