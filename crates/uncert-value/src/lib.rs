//! Uncertainty value type with first-order error propagation
//!
//! This crate provides [`Uncertainty`], a container pairing a nominal value
//! with a same-shaped, non-negative error magnitude, plus the propagation
//! laws its arithmetic is built on.
//!
//! Values combine under the assumption of statistical independence:
//!
//! ```rust
//! use uncert_value::Uncertainty;
//!
//! let a = Uncertainty::new(1.0, 3.0).unwrap();
//! let b = Uncertainty::new(2.0, 4.0).unwrap();
//!
//! let sum = a + b;
//! assert_eq!(*sum.value(), 3.0);
//! assert_eq!(*sum.error(), 5.0); // sqrt(3^2 + 4^2)
//! ```
//!
//! With the `ndarray` feature (default), the same type wraps dynamic-
//! dimension arrays and every operation is elementwise with broadcasting:
//!
//! ```rust
//! # #[cfg(feature = "ndarray")]
//! # {
//! use ndarray::arr1;
//! use uncert_value::Uncertainty;
//!
//! let v = Uncertainty::new(
//!     arr1(&[1.0, 2.0]).into_dyn(),
//!     arr1(&[0.1, 0.2]).into_dyn(),
//! )
//! .unwrap();
//!
//! let doubled = v * 2.0;
//! assert_eq!(doubled.value()[[1]], 4.0);
//! # }
//! ```

pub mod laws;
mod iter;
mod ops;
mod uncertainty;

pub use iter::UncertaintyIter;
pub use laws::Operand;
pub use uncertainty::{Side, Uncertainty};
