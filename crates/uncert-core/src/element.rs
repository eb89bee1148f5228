//! Element trait for nominal and error buffers
//!
//! Defines the scalar element bound shared by every storage kind. The
//! propagation formulas need floating-point math (square roots, NaN
//! sentinels), so the bound builds on `num_traits::Float` rather than the
//! wider integer-friendly hierarchy a general statistics library would use.

use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Scalar element type usable inside nominal/error storage.
///
/// `FromPrimitive` is required so propagation rules can materialize small
/// constants (2, ln 10, ...) in the element type.
pub trait Element:
    Float + FromPrimitive + Debug + Display + Send + Sync + 'static
{
}

impl<T> Element for T where T: Float + FromPrimitive + Debug + Display + Send + Sync + 'static {}
