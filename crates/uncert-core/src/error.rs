//! Error types for uncertainty storage and propagation
//!
//! Provides the shared error type consumed by all uncert crates.

use thiserror::Error;

/// Core error type for uncertainty operations
#[derive(Error, Debug)]
pub enum Error {
    /// Nominal and error buffers disagree on shape
    #[error("nominal/error shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// An error buffer contains a negative element
    #[error("error values must be non-negative")]
    NegativeError,

    /// Two operand shapes cannot be broadcast together
    #[error("shapes {lhs:?} and {rhs:?} are not broadcast-compatible")]
    Broadcast { lhs: Vec<usize>, rhs: Vec<usize> },

    /// The nominal container rejected an index key
    #[error("index {key} not supported by {storage} storage")]
    IndexingUnsupported { key: String, storage: &'static str },

    /// An index fell outside the container bounds
    #[error("index {index} out of bounds for axis of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A non-uncertainty operand was passed where one is required
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// The storage cannot be enumerated as scalars
    #[error("{storage} storage does not support conversion to scalars")]
    ConversionUnsupported { storage: &'static str },

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create a shape-mismatch error from two shapes
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Create a broadcast error from two operand shapes
    pub fn broadcast(lhs: &[usize], rhs: &[usize]) -> Self {
        Self::Broadcast {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Create an error for an index key the storage cannot honor
    pub fn indexing_unsupported(key: impl std::fmt::Display, storage: &'static str) -> Self {
        Self::IndexingUnsupported {
            key: key.to_string(),
            storage,
        }
    }

    /// Create an error for an out-of-range index
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Create an error for an operand of the wrong kind
    pub fn type_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    /// Create an error for storage that cannot enumerate its elements
    pub fn conversion_unsupported(storage: &'static str) -> Self {
        Self::ConversionUnsupported { storage }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::shape_mismatch(&[2, 3], &[3, 2]);
        assert_eq!(
            err.to_string(),
            "nominal/error shape mismatch: expected [2, 3], got [3, 2]"
        );

        let err = Error::NegativeError;
        assert_eq!(err.to_string(), "error values must be non-negative");

        let err = Error::broadcast(&[2], &[3]);
        assert_eq!(
            err.to_string(),
            "shapes [2] and [3] are not broadcast-compatible"
        );

        let err = Error::indexing_unsupported("[4]", "scalar");
        assert_eq!(err.to_string(), "index [4] not supported by scalar storage");

        let err = Error::index_out_of_bounds(7, 3);
        assert_eq!(
            err.to_string(),
            "index 7 out of bounds for axis of length 3"
        );

        let err = Error::type_mismatch("an uncertainty operand", "an exact value");
        assert_eq!(
            err.to_string(),
            "expected an uncertainty operand, got an exact value"
        );

        let err = Error::conversion_unsupported("scalar");
        assert_eq!(
            err.to_string(),
            "scalar storage does not support conversion to scalars"
        );
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn check_shapes(a: &[usize], b: &[usize]) -> Result<()> {
            if a != b {
                return Err(Error::shape_mismatch(a, b));
            }
            Ok(())
        }

        assert!(check_shapes(&[2], &[2]).is_ok());
        assert!(check_shapes(&[2], &[3]).is_err());
    }
}
