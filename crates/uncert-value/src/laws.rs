//! Propagation laws
//!
//! Every arithmetic operation on uncertainty values reduces to one of the
//! pure functions in this module. The right-hand side is resolved once into
//! an [`Operand`], either an exact value (error zero) or a full
//! nominal/error pair, and each law is written over that variant, assuming
//! the two operands are statistically independent.
//!
//! Combined errors use the quadrature sum `sqrt(ex² + ey²)`; multiplicative
//! operations combine relative errors instead. Power, floor-division and
//! modulo propagate zero error: no first-order formula is applied for them,
//! which is a documented limitation rather than an approximation.

use crate::uncertainty::Uncertainty;
use num_traits::{Float, Zero};
use uncert_core::{Magnitude, Result};

/// A resolved right-hand operand: exact, or carrying its own uncertainty.
#[derive(Debug, Clone)]
pub enum Operand<S: Magnitude> {
    /// A plain value with no uncertainty attached.
    Exact(S),
    /// A full nominal/error pair.
    Uncertain(Uncertainty<S>),
}

impl<S: Magnitude> Operand<S> {
    /// Promote a bare element to an exact, broadcastable operand.
    pub fn scalar(v: S::Elem) -> Self {
        Operand::Exact(S::splat(v))
    }

    /// The nominal component of this operand.
    pub fn nominal(&self) -> &S {
        match self {
            Operand::Exact(v) => v,
            Operand::Uncertain(u) => u.value(),
        }
    }

    /// The error component of this operand; zero for exact values.
    pub fn error(&self) -> S {
        match self {
            Operand::Exact(v) => v.full_like(S::Elem::zero()),
            Operand::Uncertain(u) => u.error().clone(),
        }
    }

    /// Whether this operand carries uncertainty.
    pub fn is_uncertain(&self) -> bool {
        matches!(self, Operand::Uncertain(_))
    }
}

impl<S: Magnitude> From<S> for Operand<S> {
    fn from(v: S) -> Self {
        Operand::Exact(v)
    }
}

impl<S: Magnitude> From<Uncertainty<S>> for Operand<S> {
    fn from(u: Uncertainty<S>) -> Self {
        Operand::Uncertain(u)
    }
}

impl<S: Magnitude> From<&Uncertainty<S>> for Operand<S> {
    fn from(u: &Uncertainty<S>) -> Self {
        Operand::Uncertain(u.clone())
    }
}

/// Quadrature sum of two independent errors.
fn quadrature<F: Float>(a: F, b: F) -> F {
    (a * a + b * b).sqrt()
}

/// Relative error `e / n`, with IEEE division semantics at `n == 0`.
fn rel<S: Magnitude>(u: &Uncertainty<S>) -> Result<S> {
    u.error().zip_with(u.value(), |e, n| e / n)
}

/// `x + y`, errors in quadrature.
pub fn add<S: Magnitude>(lhs: &Uncertainty<S>, rhs: &Operand<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.value().zip_with(rhs.nominal(), |a, b| a + b)?;
    match rhs {
        Operand::Uncertain(o) => {
            let err = lhs.error().zip_with(o.error(), quadrature)?;
            Uncertainty::new(nom, err)
        }
        Operand::Exact(_) => Uncertainty::new(nom, lhs.error().clone()),
    }
}

/// `x - y`, errors in quadrature.
pub fn sub<S: Magnitude>(lhs: &Uncertainty<S>, rhs: &Operand<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.value().zip_with(rhs.nominal(), |a, b| a - b)?;
    match rhs {
        Operand::Uncertain(o) => {
            let err = lhs.error().zip_with(o.error(), quadrature)?;
            Uncertainty::new(nom, err)
        }
        Operand::Exact(_) => Uncertainty::new(nom, lhs.error().clone()),
    }
}

/// `y - x` for an exact left-hand side; the error is unchanged.
pub fn rsub<S: Magnitude>(lhs: &S, rhs: &Uncertainty<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.zip_with(rhs.value(), |a, b| a - b)?;
    Uncertainty::new(nom, rhs.error().clone())
}

/// `x * y`, relative errors in quadrature.
pub fn mul<S: Magnitude>(lhs: &Uncertainty<S>, rhs: &Operand<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.value().zip_with(rhs.nominal(), |a, b| a * b)?;
    match rhs {
        Operand::Uncertain(o) => {
            let quad = rel(lhs)?.zip_with(&rel(o)?, quadrature)?;
            let err = nom.zip_with(&quad, |n, q| (n * q).abs())?;
            Uncertainty::new(nom, err)
        }
        Operand::Exact(k) => {
            let err = lhs.error().zip_with(k, |e, b| (e * b).abs())?;
            Uncertainty::new(nom, err)
        }
    }
}

/// `x / y`, relative errors in quadrature.
pub fn div<S: Magnitude>(lhs: &Uncertainty<S>, rhs: &Operand<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.value().zip_with(rhs.nominal(), |a, b| a / b)?;
    match rhs {
        Operand::Uncertain(o) => {
            let quad = rel(lhs)?.zip_with(&rel(o)?, quadrature)?;
            let err = nom.zip_with(&quad, |n, q| (n * q).abs())?;
            Uncertainty::new(nom, err)
        }
        Operand::Exact(k) => {
            let err = lhs.error().zip_with(k, |e, b| (e / b).abs())?;
            Uncertainty::new(nom, err)
        }
    }
}

/// `y / x` for an exact left-hand side: the relative error of `x` carries
/// over onto the quotient.
pub fn rdiv<S: Magnitude>(lhs: &S, rhs: &Uncertainty<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.zip_with(rhs.value(), |a, b| a / b)?;
    let err = nom.zip_with(&rel(rhs)?, |n, r| (n * r).abs())?;
    Uncertainty::new(nom, err)
}

/// `x // y` (floored division); zero error propagated.
pub fn floor_div<S: Magnitude>(lhs: &Uncertainty<S>, rhs: &Operand<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.value().zip_with(rhs.nominal(), |a, b| (a / b).floor())?;
    let err = nom.full_like(S::Elem::zero());
    Uncertainty::new(nom, err)
}

/// `y // x` for an exact left-hand side; zero error propagated.
pub fn rfloor_div<S: Magnitude>(lhs: &S, rhs: &Uncertainty<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.zip_with(rhs.value(), |a, b| (a / b).floor())?;
    let err = nom.full_like(S::Elem::zero());
    Uncertainty::new(nom, err)
}

/// `x % y`; zero error propagated.
pub fn rem<S: Magnitude>(lhs: &Uncertainty<S>, rhs: &Operand<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.value().zip_with(rhs.nominal(), |a, b| a % b)?;
    let err = nom.full_like(S::Elem::zero());
    Uncertainty::new(nom, err)
}

/// `y % x` for an exact left-hand side; zero error propagated.
pub fn rrem<S: Magnitude>(lhs: &S, rhs: &Uncertainty<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.zip_with(rhs.value(), |a, b| a % b)?;
    let err = nom.full_like(S::Elem::zero());
    Uncertainty::new(nom, err)
}

/// `x ** y`; zero error propagated.
pub fn pow<S: Magnitude>(lhs: &Uncertainty<S>, rhs: &Operand<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.value().zip_with(rhs.nominal(), |a, b| a.powf(b))?;
    let err = nom.full_like(S::Elem::zero());
    Uncertainty::new(nom, err)
}

/// `y ** x` for an exact left-hand side; zero error propagated.
pub fn rpow<S: Magnitude>(lhs: &S, rhs: &Uncertainty<S>) -> Result<Uncertainty<S>> {
    let nom = lhs.zip_with(rhs.value(), |a, b| a.powf(b))?;
    let err = nom.full_like(S::Elem::zero());
    Uncertainty::new(nom, err)
}

/// `-x`; the error is unchanged.
pub fn neg<S: Magnitude>(u: &Uncertainty<S>) -> Uncertainty<S> {
    Uncertainty::from_parts(u.value().map(|x| -x), u.error().clone())
}

/// `|x|`; the error is unchanged.
pub fn abs<S: Magnitude>(u: &Uncertainty<S>) -> Uncertainty<S> {
    Uncertainty::from_parts(u.value().map(|x| x.abs()), u.error().clone())
}
