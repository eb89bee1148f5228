//! Operation dispatch for uncertainty values
//!
//! This crate intercepts generic numeric-library calls over uncertainty
//! operands and routes them through an explicit table of propagation
//! rules:
//!
//! ```rust
//! use uncert_dispatch::{Dispatcher, Registry};
//! use uncert_value::{Operand, Uncertainty};
//!
//! // built once at startup, then only consulted
//! let registry = Registry::with_defaults();
//! let dispatcher = Dispatcher::new(&registry);
//!
//! let a = Uncertainty::new(1.0, 3.0).unwrap();
//! let b = Uncertainty::new(2.0, 4.0).unwrap();
//!
//! let sum = dispatcher
//!     .call("add", &[Operand::from(a), Operand::from(b)])
//!     .unwrap();
//! assert_eq!(*sum.error(), 5.0);
//!
//! // unregistered operations refuse instead of dropping the uncertainty
//! assert!(dispatcher.call("hypot", &[]).is_err());
//! ```

mod dispatcher;
mod error;
mod registry;

pub use dispatcher::{CallMode, Dispatcher, Params};
pub use error::{Error, Result};
pub use registry::{ClosedFn, ComponentFn, Registry, Rule};
