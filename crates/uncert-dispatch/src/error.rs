//! Error types for operation dispatch

use crate::dispatcher::CallMode;
use thiserror::Error;

/// Errors that can occur while dispatching a numeric-library operation
#[derive(Error, Debug)]
pub enum Error {
    /// A ufunc invocation mode other than a direct call was requested
    #[error("invocation mode {mode:?} is not supported; only direct calls propagate uncertainty")]
    UnsupportedBroadcastMode { mode: CallMode },

    /// The operation has no registered propagation rule
    #[error("operation '{op}' has no registered propagation rule")]
    NotImplemented { op: String },

    /// An array-protocol or unknown attribute was requested
    #[error("attribute '{name}' is not available on uncertainty values")]
    AttributeUnavailable { name: String },

    /// The operation was invoked with the wrong number of operands
    #[error("operation '{op}' expects {expected} operand(s), got {actual}")]
    ArityMismatch {
        op: String,
        expected: usize,
        actual: usize,
    },

    /// Operands mix more than one distinct uncertainty-capable type
    #[error("cannot dispatch over {count} distinct uncertainty-capable types")]
    AmbiguousTypes { count: usize },

    /// A keyword parameter the rule requires was not supplied
    #[error("operation requires the '{name}' parameter")]
    MissingParam { name: &'static str },

    /// Storage-level error
    #[error("storage error: {0}")]
    Core(#[from] uncert_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an unregistered operation
    pub fn not_implemented(op: &str) -> Self {
        Self::NotImplemented { op: op.to_string() }
    }

    /// Create an error for an unavailable attribute
    pub fn attribute_unavailable(name: &str) -> Self {
        Self::AttributeUnavailable {
            name: name.to_string(),
        }
    }

    /// Create an error for a wrong operand count
    pub fn arity_mismatch(op: &str, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            op: op.to_string(),
            expected,
            actual,
        }
    }
}
