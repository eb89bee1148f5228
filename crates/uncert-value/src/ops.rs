//! Operator overloads
//!
//! Direct operators are handled inline by the value type: every impl here
//! resolves its right-hand side into an [`Operand`] and delegates to the
//! corresponding propagation law. The checked (`Result`-returning) law
//! functions stay available in [`crate::laws`] for callers that need to
//! handle shape errors; the operator surface mirrors the underlying array
//! library and panics on incompatible shapes.

use crate::laws::{self, Operand};
use crate::uncertainty::Uncertainty;
use uncert_core::Magnitude;
#[cfg(feature = "ndarray")]
use ndarray::ArrayD;
#[cfg(feature = "ndarray")]
use uncert_core::Element;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

fn expect_law<T>(result: uncert_core::Result<T>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("uncertainty arithmetic failed: {e}"),
    }
}

macro_rules! impl_binary_op {
    ($Op:ident, $method:ident, $Assign:ident, $assign:ident, $law:ident) => {
        impl<S: Magnitude> $Op for Uncertainty<S> {
            type Output = Uncertainty<S>;

            fn $method(self, rhs: Uncertainty<S>) -> Uncertainty<S> {
                expect_law(laws::$law(&self, &Operand::Uncertain(rhs)))
            }
        }

        impl<S: Magnitude> $Op<&Uncertainty<S>> for &Uncertainty<S> {
            type Output = Uncertainty<S>;

            fn $method(self, rhs: &Uncertainty<S>) -> Uncertainty<S> {
                expect_law(laws::$law(self, &Operand::Uncertain(rhs.clone())))
            }
        }

        impl<S: Magnitude> $Op<S> for Uncertainty<S> {
            type Output = Uncertainty<S>;

            fn $method(self, rhs: S) -> Uncertainty<S> {
                expect_law(laws::$law(&self, &Operand::Exact(rhs)))
            }
        }

        impl<S: Magnitude> $Op<S> for &Uncertainty<S> {
            type Output = Uncertainty<S>;

            fn $method(self, rhs: S) -> Uncertainty<S> {
                expect_law(laws::$law(self, &Operand::Exact(rhs)))
            }
        }

        #[cfg(feature = "ndarray")]
        impl<F: Element> $Op<F> for Uncertainty<ArrayD<F>> {
            type Output = Uncertainty<ArrayD<F>>;

            fn $method(self, rhs: F) -> Uncertainty<ArrayD<F>> {
                expect_law(laws::$law(&self, &Operand::scalar(rhs)))
            }
        }

        impl<S: Magnitude> $Assign for Uncertainty<S> {
            fn $assign(&mut self, rhs: Uncertainty<S>) {
                let out = expect_law(laws::$law(self, &Operand::Uncertain(rhs)));
                self.store(out);
            }
        }

        impl<S: Magnitude> $Assign<S> for Uncertainty<S> {
            fn $assign(&mut self, rhs: S) {
                let out = expect_law(laws::$law(self, &Operand::Exact(rhs)));
                self.store(out);
            }
        }

        #[cfg(feature = "ndarray")]
        impl<F: Element> $Assign<F> for Uncertainty<ArrayD<F>> {
            fn $assign(&mut self, rhs: F) {
                let out = expect_law(laws::$law(self, &Operand::scalar(rhs)));
                self.store(out);
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, add);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, sub);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, mul);
impl_binary_op!(Div, div, DivAssign, div_assign, div);
impl_binary_op!(Rem, rem, RemAssign, rem_assign, rem);

// Reverse forms for a bare scalar on the left.

macro_rules! impl_reverse_op {
    ($Op:ident, $method:ident, |$lhs:ident, $rhs:ident| $body:expr) => {
        impl<S: Magnitude<Elem = f64>> $Op<Uncertainty<S>> for f64 {
            type Output = Uncertainty<S>;

            fn $method(self, rhs: Uncertainty<S>) -> Uncertainty<S> {
                let $lhs = self;
                let $rhs = rhs;
                expect_law($body)
            }
        }
    };
}

impl_reverse_op!(Add, add, |l, r| laws::add(&r, &Operand::scalar(l)));
impl_reverse_op!(Sub, sub, |l, r| laws::rsub(&S::splat(l), &r));
impl_reverse_op!(Mul, mul, |l, r| laws::mul(&r, &Operand::scalar(l)));
impl_reverse_op!(Div, div, |l, r| laws::rdiv(&S::splat(l), &r));
impl_reverse_op!(Rem, rem, |l, r| laws::rrem(&S::splat(l), &r));

impl<S: Magnitude> Neg for Uncertainty<S> {
    type Output = Uncertainty<S>;

    fn neg(self) -> Uncertainty<S> {
        laws::neg(&self)
    }
}

impl<S: Magnitude> Neg for &Uncertainty<S> {
    type Output = Uncertainty<S>;

    fn neg(self) -> Uncertainty<S> {
        laws::neg(self)
    }
}

impl<S: Magnitude> Uncertainty<S> {
    /// Absolute value of the nominal; the error is unchanged.
    pub fn abs(&self) -> Self {
        laws::abs(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn u(n: f64, e: f64) -> Uncertainty<f64> {
        Uncertainty::new(n, e).unwrap()
    }

    #[test]
    fn test_owned_and_borrowed_operators_agree() {
        let a = u(1.0, 3.0);
        let b = u(2.0, 4.0);
        let owned = a.clone() + b.clone();
        let borrowed = &a + &b;
        assert_eq!(owned, borrowed);
        assert_relative_eq!(*owned.error(), 5.0);
    }

    #[test]
    fn test_plain_rhs() {
        let a = u(2.0, 0.2);
        let out = &a * 3.0;
        assert_relative_eq!(*out.value(), 6.0);
        assert_relative_eq!(*out.error(), 0.6);
    }

    #[test]
    fn test_reverse_forms() {
        let a = u(4.0, 0.25);

        let s = 10.0 - a.clone();
        assert_relative_eq!(*s.value(), 6.0);
        assert_relative_eq!(*s.error(), 0.25);

        let d = 10.0 / u(2.0, 0.2);
        assert_relative_eq!(*d.value(), 5.0);
        assert_relative_eq!(*d.error(), 0.5);

        let p = 10.0 + u(1.0, 0.1);
        assert_relative_eq!(*p.value(), 11.0);
        assert_relative_eq!(*p.error(), 0.1);

        let m = 3.0 * u(2.0, 0.2);
        assert_relative_eq!(*m.value(), 6.0);
        assert_relative_eq!(*m.error(), 0.6);

        let r = 7.0 % u(2.0, 0.2);
        assert_relative_eq!(*r.value(), 1.0);
        assert_relative_eq!(*r.error(), 0.0);
    }

    #[test]
    fn test_assigning_operators() {
        let mut a = u(1.0, 0.3);
        a += u(2.0, 0.4);
        assert_relative_eq!(*a.value(), 3.0);
        assert_relative_eq!(*a.error(), 0.5);

        a -= 1.0;
        assert_relative_eq!(*a.value(), 2.0);
        assert_relative_eq!(*a.error(), 0.5);

        a *= 2.0;
        assert_relative_eq!(*a.value(), 4.0);
        assert_relative_eq!(*a.error(), 1.0);
    }

    #[test]
    fn test_neg_preserves_error() {
        let a = u(5.0, 0.5);
        let n = -&a;
        assert_relative_eq!(*n.value(), -5.0);
        assert_relative_eq!(*n.error(), 0.5);
        assert_eq!(n.abs(), a);
    }
}
