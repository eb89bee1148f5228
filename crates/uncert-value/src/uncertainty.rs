//! The uncertainty value type
//!
//! [`Uncertainty`] pairs a nominal value with a same-shaped, non-negative
//! error buffer. Both invariants are checked at construction and every
//! operation preserves them, so the rest of the engine can treat the pair
//! as always well-formed.

use crate::laws::{self, Operand};
use num_traits::{Float, FromPrimitive, ToPrimitive, Zero};
use uncert_core::{Error, Key, Magnitude, Result};
use std::fmt;

/// Which side of a run of equal elements `searchsorted` resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A nominal value with an associated error magnitude of identical shape.
///
/// Arithmetic assumes the two combined values are statistically
/// independent: added/subtracted errors combine in quadrature, multiplied/
/// divided values combine relative errors in quadrature, and power,
/// floor-division and modulo propagate zero error (a documented
/// limitation).
///
/// Equality and ordering compare nominal values only; the error magnitude
/// never participates in comparison.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "RawUncertainty<S>",
        bound(
            serialize = "S: serde::Serialize",
            deserialize = "S: serde::de::DeserializeOwned"
        )
    )
)]
pub struct Uncertainty<S: Magnitude = f64> {
    #[cfg_attr(feature = "serde", serde(rename = "nominal"))]
    nom: S,
    #[cfg_attr(feature = "serde", serde(rename = "error"))]
    err: S,
}

/// Unvalidated mirror used to route deserialization through [`Uncertainty::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "S: serde::de::DeserializeOwned"))]
struct RawUncertainty<S> {
    nominal: S,
    error: S,
}

#[cfg(feature = "serde")]
impl<S: Magnitude> TryFrom<RawUncertainty<S>> for Uncertainty<S> {
    type Error = Error;

    fn try_from(raw: RawUncertainty<S>) -> Result<Self> {
        Self::new(raw.nominal, raw.error)
    }
}

impl<S: Magnitude> Uncertainty<S> {
    /// Create a value from a nominal/error pair.
    ///
    /// Fails with [`Error::ShapeMismatch`] when the shapes disagree and
    /// with [`Error::NegativeError`] when any error element is negative.
    pub fn new(nominal: S, error: S) -> Result<Self> {
        if nominal.shape() != error.shape() {
            return Err(Error::shape_mismatch(nominal.shape(), error.shape()));
        }
        if error.any(|e| e < S::Elem::zero()) {
            return Err(Error::NegativeError);
        }
        Ok(Self {
            nom: nominal,
            err: error,
        })
    }

    /// Wrap a plain value as exact (zero error).
    pub fn exact(nominal: S) -> Self {
        let err = nominal.full_like(S::Elem::zero());
        Self { nom: nominal, err }
    }

    /// Assemble from components that are known to share a shape.
    pub(crate) fn from_parts(nom: S, err: S) -> Self {
        debug_assert_eq!(nom.shape(), err.shape());
        Self { nom, err }
    }

    /// The nominal component.
    pub fn value(&self) -> &S {
        &self.nom
    }

    /// The error component.
    pub fn error(&self) -> &S {
        &self.err
    }

    /// Alias for [`Uncertainty::error`].
    pub fn std_dev(&self) -> &S {
        self.error()
    }

    /// Consume the value, yielding its nominal and error buffers.
    pub fn into_parts(self) -> (S, S) {
        (self.nom, self.err)
    }

    /// Relative error `error / nominal`, with a NaN sentinel wherever the
    /// nominal is zero.
    pub fn relative(&self) -> S {
        self.err
            .zip_with(&self.nom, |e, n| {
                if n.is_zero() {
                    S::Elem::nan()
                } else {
                    e / n
                }
            })
            .expect("nominal and error share a shape")
    }

    /// Shape of both components.
    pub fn shape(&self) -> &[usize] {
        self.nom.shape()
    }

    /// Total element count.
    pub fn size(&self) -> usize {
        self.nom.size()
    }

    /// Whether this value is zero-dimensional.
    pub fn is_scalar(&self) -> bool {
        self.nom.is_scalar()
    }

    /// Length of the leading axis; `None` for scalar values.
    pub fn leading_len(&self) -> Option<usize> {
        self.nom.leading_len()
    }

    /// Scalar truthiness of the nominal; `None` for array values.
    pub fn is_nonzero(&self) -> Option<bool> {
        self.nom.as_scalar().map(|v| !v.is_zero())
    }

    /// Index both components with the same key.
    pub fn get(&self, key: &Key) -> Result<Self> {
        Ok(Self::from_parts(self.nom.get(key)?, self.err.get(key)?))
    }

    /// Write an uncertainty value into the subset selected by `key`.
    ///
    /// Exact operands are rejected with [`Error::TypeMismatch`]: assigning
    /// them would silently drop the error channel of the target.
    pub fn set(&mut self, key: &Key, value: &Operand<S>) -> Result<()> {
        match value {
            Operand::Exact(_) => Err(Error::type_mismatch(
                "an uncertainty operand",
                "an exact value",
            )),
            Operand::Uncertain(u) => {
                self.nom.set(key, u.value())?;
                self.err.set(key, u.error())?;
                Ok(())
            }
        }
    }

    /// Write uncertainty values at the given flat indices.
    ///
    /// Like [`Uncertainty::set`], only uncertainty operands are accepted.
    pub fn put(&mut self, indices: &[usize], values: &Operand<S>) -> Result<()> {
        match values {
            Operand::Exact(_) => Err(Error::type_mismatch(
                "an uncertainty operand",
                "an exact value",
            )),
            Operand::Uncertain(u) => {
                self.nom.put(indices, u.value())?;
                self.err.put(indices, u.error())?;
                Ok(())
            }
        }
    }

    /// Reshape both components in place.
    pub fn set_shape(&mut self, shape: &[usize]) -> Result<()> {
        self.nom.set_shape(shape)?;
        self.err.set_shape(shape)
    }

    /// Axis-reversed copy of both components.
    pub fn transposed(&self) -> Self {
        Self::from_parts(self.nom.transposed(), self.err.transposed())
    }

    /// Overwrite every nominal element with `value`.
    ///
    /// The error buffer is left untouched.
    pub fn fill(&mut self, value: S::Elem) {
        self.nom.fill(value);
    }

    /// Bound the nominal between optional limits; the error is unchanged.
    pub fn clip(&self, lo: Option<S::Elem>, hi: Option<S::Elem>) -> Self {
        Self::from_parts(self.nom.clip(lo, hi), self.err.clone())
    }

    /// Real projection of both components.
    pub fn real(&self) -> Self {
        Self::from_parts(self.nom.real(), self.err.real())
    }

    /// Imaginary projection of both components.
    pub fn imag(&self) -> Self {
        Self::from_parts(self.nom.imag(), self.err.imag())
    }

    /// Round the nominal to `ndigits` decimal places; the error is unchanged.
    pub fn round_to(&self, ndigits: i32) -> Self {
        let scale = S::Elem::from_f64(10f64.powi(ndigits))
            .expect("decimal scale fits the element type");
        Self::from_parts(
            self.nom.map(|x| (x * scale).round() / scale),
            self.err.clone(),
        )
    }

    /// Insertion index for `v` in the (assumed sorted) flat nominal data.
    ///
    /// Only the nominal participates, as with every ordering operation.
    pub fn searchsorted(&self, v: S::Elem, side: Side) -> usize {
        let flat = self.nom.to_flat_vec();
        match side {
            Side::Left => flat.partition_point(|&x| x < v),
            Side::Right => flat.partition_point(|&x| x <= v),
        }
    }

    /// Floored division routed through the propagation laws.
    pub fn floor_div(&self, rhs: impl Into<Operand<S>>) -> Result<Self> {
        laws::floor_div(self, &rhs.into())
    }

    /// Power routed through the propagation laws.
    pub fn powf(&self, rhs: impl Into<Operand<S>>) -> Result<Self> {
        laws::pow(self, &rhs.into())
    }

    /// Floored quotient and remainder in one call.
    pub fn div_rem(&self, rhs: impl Into<Operand<S>>) -> Result<(Self, Self)> {
        let rhs = rhs.into();
        Ok((laws::floor_div(self, &rhs)?, laws::rem(self, &rhs)?))
    }

    /// Nominal value of a scalar-backed instance as `f64`.
    pub fn to_f64(&self) -> Option<f64> {
        self.nom.as_scalar().and_then(|v| v.to_f64())
    }

    /// Truncated nominal value of a scalar-backed instance as `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        self.nom.as_scalar().and_then(|v| v.trunc().to_i64())
    }

    /// Downcast to the plain nominal storage, discarding the error.
    ///
    /// This is the array-protocol downcast path, so it warns: losing the
    /// error channel here is usually an accident. Use [`Uncertainty::value`]
    /// for a silent read.
    pub fn downcast(&self) -> S {
        log::warn!("uncertainty is stripped when downcasting to the nominal storage");
        self.nom.clone()
    }

    /// Flatten into scalar-backed values, one per element.
    pub fn to_scalars(&self) -> Result<Vec<Uncertainty<S::Elem>>>
    where
        S::Elem: Magnitude<Elem = S::Elem>,
    {
        if !S::ENUMERABLE {
            return Err(Error::conversion_unsupported("scalar"));
        }
        let noms = self.nom.to_flat_vec();
        let errs = self.err.to_flat_vec();
        Ok(noms
            .into_iter()
            .zip(errs)
            .map(|(n, e)| Uncertainty::from_parts(n, e))
            .collect())
    }

    /// Recompute-and-store used by the assigning operators.
    ///
    /// Array-backed storage keeps its buffers when shapes agree.
    pub(crate) fn store(&mut self, out: Self) {
        if self.nom.shape() == out.nom.shape() {
            self.nom.assign_from(&out.nom);
            self.err.assign_from(&out.err);
        } else {
            *self = out;
        }
    }
}

#[cfg(feature = "ndarray")]
impl<F> Uncertainty<ndarray::ArrayD<F>>
where
    F: uncert_core::Element + Magnitude<Elem = F>,
{
    /// Aggregate scalar-backed values into one array-backed value,
    /// preserving input order.
    pub fn from_sequence<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = Uncertainty<F>>,
    {
        let items: Vec<_> = items.into_iter().collect();
        let mut noms = Vec::with_capacity(items.len());
        let mut errs = Vec::with_capacity(items.len());
        for item in items {
            let (n, e) = item.into_parts();
            noms.push(n);
            errs.push(e);
        }
        let len = noms.len();
        let nom = ndarray::ArrayD::from_shape_vec(ndarray::IxDyn(&[len]), noms)
            .map_err(|e| Error::Other(anyhow_shape_error(e)))?;
        let err = ndarray::ArrayD::from_shape_vec(ndarray::IxDyn(&[len]), errs)
            .map_err(|e| Error::Other(anyhow_shape_error(e)))?;
        Ok(Self::from_parts(nom, err))
    }
}

#[cfg(feature = "ndarray")]
fn anyhow_shape_error(e: ndarray::ShapeError) -> anyhow::Error {
    anyhow::Error::new(e)
}

// Comparisons look at the nominal only.

impl<S: Magnitude> PartialEq for Uncertainty<S> {
    fn eq(&self, other: &Self) -> bool {
        self.nom == other.nom
    }
}

impl<S: Magnitude> PartialEq<S> for Uncertainty<S> {
    fn eq(&self, other: &S) -> bool {
        self.nom == *other
    }
}

impl<S: Magnitude + PartialOrd> PartialOrd for Uncertainty<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.nom.partial_cmp(&other.nom)
    }
}

impl<S: Magnitude + PartialOrd> PartialOrd<S> for Uncertainty<S> {
    fn partial_cmp(&self, other: &S) -> Option<std::cmp::Ordering> {
        self.nom.partial_cmp(other)
    }
}

impl<S: Magnitude + fmt::Display> fmt::Display for Uncertainty<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} +/- {}", self.nom, self.err)
    }
}

impl<S: Magnitude + fmt::Display> Uncertainty<S> {
    /// The display string as raw bytes (UTF-8).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}
