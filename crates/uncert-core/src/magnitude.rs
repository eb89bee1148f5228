//! Storage abstraction for nominal and error buffers
//!
//! This module defines the boundary between the propagation engine and the
//! numeric array library that actually holds data. The engine never touches
//! concrete buffers; it goes through [`Magnitude`], which captures exactly
//! the operations the engine needs: shape introspection, elementwise
//! mapping and zipping (with broadcasting), keyed indexing, and the
//! structural operations the array protocol exposes.
//!
//! Two providers exist:
//!
//! - plain float scalars (`f64`, `f32`), implemented here as the degenerate
//!   zero-dimensional storage
//! - `ndarray` dynamic-dimension arrays, implemented in the `dense` module
//!   behind the `ndarray` feature

use crate::element::Element;
use crate::error::{Error, Result};
use num_traits::Zero;
use std::fmt;

/// Index keys accepted by [`Magnitude::get`] and [`Magnitude::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Select one subset along the leading axis.
    Axis(usize),
    /// Select a single element by its full multi-index.
    At(Vec<usize>),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Axis(i) => write!(f, "[{i}]"),
            Key::At(idx) => write!(f, "{idx:?}"),
        }
    }
}

/// The interface the propagation engine requires from a storage provider.
///
/// Shapes follow array conventions: scalars report an empty shape, and
/// `size` is the element count (1 for scalars). Every method that combines
/// two storages broadcasts where the provider supports it and reports
/// [`Error::Broadcast`] where it does not.
pub trait Magnitude: Clone + fmt::Debug + PartialEq + Send + Sync + Sized + 'static {
    /// Scalar element type held by this storage.
    type Elem: Element;

    /// Whether this storage can enumerate its elements as scalars.
    const ENUMERABLE: bool;

    /// Shape of the storage; empty for scalars.
    fn shape(&self) -> &[usize];

    /// Total element count.
    fn size(&self) -> usize {
        self.shape().iter().product()
    }

    /// Whether this value is zero-dimensional.
    fn is_scalar(&self) -> bool {
        self.shape().is_empty()
    }

    /// Build a broadcastable storage value holding a single element.
    fn splat(v: Self::Elem) -> Self;

    /// Same-shaped storage with every element set to `v`.
    fn full_like(&self, v: Self::Elem) -> Self;

    /// Apply `f` to every element.
    fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Self::Elem) -> Self::Elem;

    /// Combine elementwise with `other`, broadcasting either side.
    fn zip_with<F>(&self, other: &Self, f: F) -> Result<Self>
    where
        F: Fn(Self::Elem, Self::Elem) -> Self::Elem;

    /// Whether any element satisfies `pred`.
    fn any<F>(&self, pred: F) -> bool
    where
        F: Fn(Self::Elem) -> bool;

    /// Extract the single element of a zero-dimensional storage.
    fn as_scalar(&self) -> Option<Self::Elem>;

    /// Length of the leading axis; `None` for scalars.
    fn leading_len(&self) -> Option<usize>;

    /// Index with `key`, producing a new storage of the selected subset.
    fn get(&self, key: &Key) -> Result<Self>;

    /// Write `value` into the subset selected by `key`.
    fn set(&mut self, key: &Key, value: &Self) -> Result<()>;

    /// Reshape in place; the element count must be preserved.
    fn set_shape(&mut self, shape: &[usize]) -> Result<()>;

    /// Axis-reversed copy.
    fn transposed(&self) -> Self;

    /// Overwrite every element with `v`.
    fn fill(&mut self, v: Self::Elem);

    /// Write `values` at the given flat indices, cycling values if fewer
    /// than indices are supplied.
    fn put(&mut self, indices: &[usize], values: &Self) -> Result<()>;

    /// Bound elements below by `lo` and above by `hi`.
    fn clip(&self, lo: Option<Self::Elem>, hi: Option<Self::Elem>) -> Self {
        self.map(|x| clip_elem(x, lo, hi))
    }

    /// All elements in row-major order.
    fn to_flat_vec(&self) -> Vec<Self::Elem>;

    /// Copy `src` into this storage's existing buffer.
    ///
    /// Shapes must already agree; callers guard this.
    fn assign_from(&mut self, src: &Self) {
        *self = src.clone();
    }

    /// Real projection. Identity for real element types.
    fn real(&self) -> Self {
        self.clone()
    }

    /// Imaginary projection. All zeros for real element types.
    fn imag(&self) -> Self {
        self.full_like(Self::Elem::zero())
    }
}

/// Clamp one element between optional bounds.
pub(crate) fn clip_elem<E: Element>(x: E, lo: Option<E>, hi: Option<E>) -> E {
    let x = match lo {
        Some(l) if x < l => l,
        _ => x,
    };
    match hi {
        Some(h) if x > h => h,
        _ => x,
    }
}

// =============================================================================
// Scalar storage providers
// =============================================================================

macro_rules! impl_scalar_magnitude {
    ($t:ty) => {
        impl Magnitude for $t {
            type Elem = $t;

            const ENUMERABLE: bool = false;

            fn shape(&self) -> &[usize] {
                &[]
            }

            fn splat(v: $t) -> Self {
                v
            }

            fn full_like(&self, v: $t) -> Self {
                v
            }

            fn map<F>(&self, f: F) -> Self
            where
                F: Fn($t) -> $t,
            {
                f(*self)
            }

            fn zip_with<F>(&self, other: &Self, f: F) -> Result<Self>
            where
                F: Fn($t, $t) -> $t,
            {
                Ok(f(*self, *other))
            }

            fn any<F>(&self, pred: F) -> bool
            where
                F: Fn($t) -> bool,
            {
                pred(*self)
            }

            fn as_scalar(&self) -> Option<$t> {
                Some(*self)
            }

            fn leading_len(&self) -> Option<usize> {
                None
            }

            fn get(&self, key: &Key) -> Result<Self> {
                Err(Error::indexing_unsupported(key, "scalar"))
            }

            fn set(&mut self, key: &Key, _value: &Self) -> Result<()> {
                Err(Error::indexing_unsupported(key, "scalar"))
            }

            fn set_shape(&mut self, shape: &[usize]) -> Result<()> {
                if shape.is_empty() {
                    Ok(())
                } else {
                    Err(Error::shape_mismatch(&[], shape))
                }
            }

            fn transposed(&self) -> Self {
                *self
            }

            fn fill(&mut self, v: $t) {
                *self = v;
            }

            fn put(&mut self, _indices: &[usize], _values: &Self) -> Result<()> {
                Err(Error::indexing_unsupported("flat put", "scalar"))
            }

            fn to_flat_vec(&self) -> Vec<$t> {
                vec![*self]
            }
        }
    };
}

impl_scalar_magnitude!(f64);
impl_scalar_magnitude!(f32);
