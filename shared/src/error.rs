//! Error type for vector construction and geometry

/// Failure raised synchronously by [`Vector3`](crate::Vector3) operations.
///
/// Both variants indicate a programming error at the call site; neither is
/// transient and neither should be retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VectorError {
    /// Malformed or wrongly-shaped input to construction or arithmetic
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Angle requested against a zero-length vector
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),
}

impl VectorError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
