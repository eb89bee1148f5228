//! Integration tests for the propagation laws over both storage kinds,
//! checking the documented statistical properties end to end.

use approx::assert_relative_eq;
use ndarray::{arr1, ArrayD};
use proptest::prelude::*;
use uncert_core::{Key, Magnitude};
use uncert_value::{Operand, Side, Uncertainty};

fn scalar(n: f64, e: f64) -> Uncertainty<f64> {
    Uncertainty::new(n, e).unwrap()
}

fn array(noms: &[f64], errs: &[f64]) -> Uncertainty<ArrayD<f64>> {
    Uncertainty::new(arr1(noms).into_dyn(), arr1(errs).into_dyn()).unwrap()
}

#[test]
fn construction_round_trips_inputs() {
    let u = array(&[1.0, 2.0], &[0.1, 0.2]);
    assert_eq!(u.value(), &arr1(&[1.0, 2.0]).into_dyn());
    assert_eq!(u.error(), &arr1(&[0.1, 0.2]).into_dyn());
    assert_eq!(u.shape(), &[2]);
    assert_eq!(u.size(), 2);
}

#[test]
fn construction_rejects_shape_mismatch() {
    let result = Uncertainty::new(arr1(&[1.0, 2.0]).into_dyn(), arr1(&[0.1]).into_dyn());
    assert!(matches!(
        result,
        Err(uncert_core::Error::ShapeMismatch { .. })
    ));
}

#[test]
fn construction_rejects_any_negative_error_element() {
    let result = Uncertainty::new(
        arr1(&[1.0, 2.0, 3.0]).into_dyn(),
        arr1(&[0.1, -0.2, 0.3]).into_dyn(),
    );
    assert!(matches!(result, Err(uncert_core::Error::NegativeError)));
}

#[test]
fn addition_is_commutative() {
    let a = scalar(1.5, 0.3);
    let b = scalar(2.5, 0.4);
    let ab = &a + &b;
    let ba = &b + &a;
    assert_eq!(ab, ba);
    assert_relative_eq!(*ab.error(), *ba.error());
}

#[test]
fn scalar_multiple_is_exact() {
    let u = scalar(2.0, 0.3);
    let k = 4.0;
    let out = &u * k;
    assert_relative_eq!(*out.value(), 8.0);
    assert_relative_eq!(*out.error(), 1.2);
}

#[test]
fn dividing_identical_values() {
    let out = scalar(2.0, 0.1) / scalar(2.0, 0.1);
    assert_relative_eq!(*out.value(), 1.0);
    assert_relative_eq!(*out.error(), 0.07071, max_relative = 1e-3);
}

#[test]
fn negation_preserves_error() {
    let out = -scalar(5.0, 0.5);
    assert_eq!(out, scalar(-5.0, 0.5));
    assert_relative_eq!(*out.error(), 0.5);
}

#[test]
fn from_sequence_preserves_order() {
    let u = Uncertainty::from_sequence(vec![scalar(1.0, 0.1), scalar(2.0, 0.2)]).unwrap();
    assert_eq!(u.value(), &arr1(&[1.0, 2.0]).into_dyn());
    assert_eq!(u.error(), &arr1(&[0.1, 0.2]).into_dyn());
}

#[test]
fn equality_ignores_error_and_accepts_plain_numbers() {
    assert_eq!(scalar(3.0, 0.1), scalar(3.0, 99.0));
    assert_eq!(scalar(3.0, 0.1), 3.0);
}

#[test]
fn downcast_returns_nominal_unchanged() {
    let u = array(&[1.0, 2.0], &[0.1, 0.2]);
    let plain = u.downcast();
    assert_eq!(plain, arr1(&[1.0, 2.0]).into_dyn());
}

#[test]
fn in_place_addition_updates_array_binding() {
    let mut u = array(&[1.0, 2.0], &[0.3, 0.4]);
    u += array(&[10.0, 20.0], &[0.4, 0.3]);
    assert_eq!(u.value(), &arr1(&[11.0, 22.0]).into_dyn());
    assert_relative_eq!(u.error()[[0]], 0.5);
    assert_relative_eq!(u.error()[[1]], 0.5);
}

#[test]
fn elementwise_arithmetic_broadcasts_scalars() {
    let u = array(&[1.0, 2.0, 3.0], &[0.1, 0.1, 0.1]);
    let shifted = &u + <ArrayD<f64> as Magnitude>::splat(10.0);
    assert_eq!(shifted.value(), &arr1(&[11.0, 12.0, 13.0]).into_dyn());
    assert_eq!(shifted.error(), u.error());
}

#[test]
fn array_operands_combine_elementwise() {
    let a = array(&[1.0, 2.0], &[3.0, 6.0]);
    let b = array(&[10.0, 20.0], &[4.0, 8.0]);
    let sum = a + b;
    assert_eq!(sum.value(), &arr1(&[11.0, 22.0]).into_dyn());
    assert_relative_eq!(sum.error()[[0]], 5.0);
    assert_relative_eq!(sum.error()[[1]], 10.0);
}

#[test]
fn incompatible_shapes_error_through_checked_laws() {
    let a = array(&[1.0, 2.0], &[0.1, 0.1]);
    let b = array(&[1.0, 2.0, 3.0], &[0.1, 0.1, 0.1]);
    let result = uncert_value::laws::add(&a, &Operand::from(b));
    assert!(matches!(result, Err(uncert_core::Error::Broadcast { .. })));
}

#[test]
fn indexing_pairs_nominal_and_error() {
    let u = array(&[1.0, 2.0, 3.0], &[0.1, 0.2, 0.3]);
    let second = u.get(&Key::Axis(1)).unwrap();
    assert_eq!(second.value().as_scalar(), Some(2.0));
    assert_eq!(second.error().as_scalar(), Some(0.2));

    assert!(u.get(&Key::Axis(9)).is_err());
}

#[test]
fn set_writes_both_components() {
    let mut u = array(&[1.0, 2.0, 3.0], &[0.1, 0.2, 0.3]);
    let replacement = Uncertainty::new(
        ArrayD::from_elem(ndarray::IxDyn(&[]), 9.0),
        ArrayD::from_elem(ndarray::IxDyn(&[]), 0.9),
    )
    .unwrap();
    u.set(&Key::Axis(2), &Operand::from(replacement)).unwrap();
    assert_eq!(u.value()[[2]], 9.0);
    assert_eq!(u.error()[[2]], 0.9);

    // exact operands may not overwrite uncertainty storage
    let exact = Operand::Exact(arr1(&[7.0]).into_dyn());
    assert!(matches!(
        u.set(&Key::Axis(0), &exact),
        Err(uncert_core::Error::TypeMismatch { .. })
    ));
}

#[test]
fn put_rejects_exact_values() {
    let mut u = array(&[1.0, 2.0, 3.0], &[0.1, 0.2, 0.3]);
    let exact = Operand::Exact(arr1(&[7.0]).into_dyn());
    assert!(u.put(&[0], &exact).is_err());

    let replacement = array(&[7.0], &[0.7]);
    u.put(&[0, 2], &Operand::from(replacement)).unwrap();
    assert_eq!(u.value()[[0]], 7.0);
    assert_eq!(u.error()[[2]], 0.7);
}

#[test]
fn reshape_and_transpose_apply_to_both_components() {
    let mut u = array(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[0.1; 6]);
    u.set_shape(&[2, 3]).unwrap();
    assert_eq!(u.shape(), &[2, 3]);

    let t = u.transposed();
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.value()[[2, 1]], 6.0);
    assert_eq!(t.error()[[2, 1]], 0.1);
}

#[test]
fn to_scalars_flattens_in_order() {
    let u = array(&[1.0, 2.0], &[0.1, 0.2]);
    let scalars = u.to_scalars().unwrap();
    assert_eq!(scalars.len(), 2);
    assert_eq!(scalars[0], scalar(1.0, 0.1));
    assert_eq!(*scalars[1].error(), 0.2);
}

#[test]
fn searchsorted_uses_nominal_only() {
    let u = array(&[1.0, 2.0, 2.0, 3.0], &[9.0, 9.0, 9.0, 9.0]);
    assert_eq!(u.searchsorted(2.0, Side::Left), 1);
    assert_eq!(u.searchsorted(2.0, Side::Right), 3);
}

#[test]
fn display_formats_nominal_and_error() {
    assert_eq!(scalar(3.0, 0.1).to_string(), "3 +/- 0.1");
}

proptest! {
    #[test]
    fn prop_addition_commutes(
        xa in -1e6f64..1e6, ea in 0f64..1e3,
        xb in -1e6f64..1e6, eb in 0f64..1e3,
    ) {
        let a = scalar(xa, ea);
        let b = scalar(xb, eb);
        let ab = &a + &b;
        let ba = &b + &a;
        prop_assert_eq!(ab.clone(), ba.clone());
        prop_assert!((ab.error() - ba.error()).abs() < 1e-9);
    }

    #[test]
    fn prop_scalar_multiple_is_exact(
        x in -1e6f64..1e6, e in 0f64..1e3, k in -1e3f64..1e3,
    ) {
        let u = scalar(x, e);
        let out = &u * k;
        prop_assert!((out.value() - x * k).abs() <= 1e-9 * (1.0 + (x * k).abs()));
        prop_assert!((out.error() - (e * k).abs()) <= 1e-9 * (1.0 + (e * k).abs()));
    }

    #[test]
    fn prop_errors_never_negative(
        xa in -1e6f64..1e6, ea in 0f64..1e3,
        xb in -1e6f64..1e6, eb in 0f64..1e3,
    ) {
        let a = scalar(xa, ea);
        let b = scalar(xb, eb);
        for out in [&a + &b, &a - &b, &a * &b] {
            prop_assert!(!(*out.error() < 0.0));
        }
    }
}
