//! Core traits and types for uncertainty propagation
//!
//! This crate provides the foundation the propagation engine builds on:
//!
//! - [`Element`]: the scalar element bound (floating point, constants)
//! - [`Magnitude`]: the storage boundary between the engine and the
//!   numeric array library; implemented for plain float scalars here and
//!   for `ndarray::ArrayD` behind the `ndarray` feature
//! - [`Error`]/[`Result`]: the shared error type for all uncert crates
//!
//! # Design Philosophy
//!
//! - **Storage is a dependency, not a commitment**: the engine only sees
//!   the operations [`Magnitude`] names
//! - **Scalars are first-class**: a bare `f64` is the zero-dimensional
//!   provider, so scalar values pay no array overhead
//! - **Fail fast**: invariant violations surface as typed errors at the
//!   point of construction, never later

pub mod element;
pub mod error;
pub mod magnitude;

#[cfg(feature = "ndarray")]
mod dense;

pub use element::Element;
pub use error::{Error, Result};
pub use magnitude::{Key, Magnitude};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
