//! End-to-end checks through the root re-exports: a measurement pipeline
//! built from operators, dispatch, indexing and aggregation together.

use approx::assert_relative_eq;
use ndarray::{arr1, ArrayD};
use uncert::prelude::*;

#[test]
fn measurement_pipeline() {
    // raw readings with per-sample errors
    let readings = Uncertainty::new(
        arr1(&[4.0, 9.0, 16.0]).into_dyn(),
        arr1(&[0.4, 0.9, 1.6]).into_dyn(),
    )
    .unwrap();

    // calibration: subtract an exact offset, scale by an exact gain
    let calibrated = (readings - <ArrayD<f64> as Magnitude>::splat(1.0)) * 2.0;
    assert_eq!(calibrated.value(), &arr1(&[6.0, 16.0, 30.0]).into_dyn());
    assert_relative_eq!(calibrated.error()[[0]], 0.8);

    // route a named operation through the dispatcher
    let registry = Registry::with_defaults();
    let dispatcher = Dispatcher::new(&registry);
    let halved = dispatcher
        .call(
            "divide",
            &[
                Operand::from(calibrated),
                Operand::scalar(2.0),
            ],
        )
        .unwrap();
    assert_eq!(halved.value(), &arr1(&[3.0, 8.0, 15.0]).into_dyn());

    // slice out one sample and compare by nominal value only
    let sample = halved.get(&Key::Axis(1)).unwrap();
    assert_eq!(sample.value().as_scalar(), Some(8.0));

    // aggregate scalar measurements back into an array value
    let scalars = halved.to_scalars().unwrap();
    let rebuilt = Uncertainty::from_sequence(scalars).unwrap();
    assert_eq!(rebuilt.value(), halved.value());
    assert_eq!(rebuilt.error(), halved.error());
}

#[test]
fn scalar_and_array_storage_share_laws() {
    let s = Uncertainty::new(1.0, 3.0).unwrap() + Uncertainty::new(2.0, 4.0).unwrap();
    assert_eq!(*s.error(), 5.0);

    let a = Uncertainty::new(arr1(&[1.0]).into_dyn(), arr1(&[3.0]).into_dyn()).unwrap()
        + Uncertainty::new(arr1(&[2.0]).into_dyn(), arr1(&[4.0]).into_dyn()).unwrap();
    assert_eq!(a.error()[[0]], 5.0);
}
