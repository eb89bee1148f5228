//! Value-with-uncertainty numerics with first-order error propagation
//!
//! `uncert` pairs a nominal value with a same-shaped, non-negative error
//! magnitude and propagates the error through arithmetic under
//! independence assumptions. Scalars and `ndarray` dynamic arrays share
//! one value type; generic numeric-function calls route through an
//! explicit dispatcher and rule registry.
//!
//! # Architecture Overview
//!
//! - **`uncert-core`**: the storage boundary ([`Magnitude`]) between the
//!   engine and the array library, plus shared error types
//! - **`uncert-value`**: the [`Uncertainty`] value type with arithmetic,
//!   comparisons, indexing, iteration and conversions
//! - **`uncert-dispatch`**: the [`Dispatcher`]/[`Registry`] pair that
//!   intercepts named operations and applies propagation rules
//!
//! # Example
//!
//! ```rust
//! use uncert::prelude::*;
//!
//! let a = Uncertainty::new(2.0f64, 0.1).unwrap();
//! let b = Uncertainty::new(2.0f64, 0.1).unwrap();
//!
//! let ratio = a / b;
//! assert_eq!(*ratio.value(), 1.0);
//! assert!((*ratio.error() - 0.0707).abs() < 1e-3);
//! ```

// Re-export core types
pub use uncert_core::{Element, Error, Key, Magnitude, Result};

pub use uncert_value::{laws, Operand, Side, Uncertainty, UncertaintyIter};

pub use uncert_dispatch::{
    CallMode, ClosedFn, ComponentFn, Dispatcher, Error as DispatchError, Params, Registry,
    Result as DispatchResult, Rule,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CallMode, Dispatcher, Key, Magnitude, Operand, Registry, Result, Rule, Uncertainty,
    };

    pub use crate::Error;
}
