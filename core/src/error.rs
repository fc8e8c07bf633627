//! Invocation error types

use nativecall_shared::VectorError;

use crate::id::NativeId;
use crate::marker::SlotKind;

/// Coarse classification of an [`InvokeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or wrongly-typed input to an encoder or to vector math
    InvalidArgument,
    /// Angle calculation on a zero-length vector
    DegenerateInput,
    /// A result slot did not match its declared output marker
    DecodeMismatch,
    /// The boundary call itself could not be completed
    BoundaryFailure,
}

/// Failure of one native invocation.
///
/// None of these are retried by the invoker and none are replaced by a
/// default value; the caller decides what to do.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("native {native}: result slot {slot} expected {expected}, found {found}")]
    DecodeMismatch {
        native: NativeId,
        slot: usize,
        expected: SlotKind,
        found: String,
    },

    #[error("native {native}: boundary call failed")]
    BoundaryFailure {
        native: NativeId,
        #[source]
        source: BoundaryError,
    },
}

impl InvokeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InvokeError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            InvokeError::DegenerateInput(_) => ErrorKind::DegenerateInput,
            InvokeError::DecodeMismatch { .. } => ErrorKind::DecodeMismatch,
            InvokeError::BoundaryFailure { .. } => ErrorKind::BoundaryFailure,
        }
    }
}

impl From<VectorError> for InvokeError {
    fn from(err: VectorError) -> Self {
        match err {
            VectorError::InvalidArgument(msg) => InvokeError::InvalidArgument(msg),
            VectorError::DegenerateInput(msg) => InvokeError::DegenerateInput(msg.to_string()),
        }
    }
}

/// Failure reported by a [`NativeHost`](crate::host::NativeHost).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundaryError {
    /// The runtime has no native registered under this identifier
    #[error("no native registered for {0}")]
    UnknownNative(NativeId),

    /// The runtime could not read an argument in the shape it expects
    #[error("argument {index}: expected {expected}")]
    BadArgument {
        index: usize,
        expected: &'static str,
    },

    /// The runtime refused or aborted the call
    #[error("{0}")]
    Rejected(String),
}
