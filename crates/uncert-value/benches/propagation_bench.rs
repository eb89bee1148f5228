//! Benchmarks for the propagation hot path: scalar operator chains and
//! elementwise array combination.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::ArrayD;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use uncert_value::Uncertainty;

fn generate_array(n: usize, seed: u64) -> Uncertainty<ArrayD<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(10.0, 2.0).unwrap();
    let noms: Vec<f64> = (0..n).map(|_| normal.sample(&mut rng)).collect();
    let errs: Vec<f64> = (0..n).map(|_| normal.sample(&mut rng).abs() * 0.01).collect();
    Uncertainty::new(
        ArrayD::from_shape_vec(ndarray::IxDyn(&[n]), noms).unwrap(),
        ArrayD::from_shape_vec(ndarray::IxDyn(&[n]), errs).unwrap(),
    )
    .unwrap()
}

fn bench_scalar_chain(c: &mut Criterion) {
    let a = Uncertainty::new(2.0, 0.1).unwrap();
    let b = Uncertainty::new(3.0, 0.2).unwrap();

    c.bench_function("scalar_add_mul_div_chain", |bench| {
        bench.iter(|| {
            let sum = black_box(&a) + black_box(&b);
            let prod = &sum * black_box(&b);
            black_box(&prod / black_box(&a))
        })
    });
}

fn bench_array_elementwise(c: &mut Criterion) {
    let a = generate_array(4096, 42);
    let b = generate_array(4096, 43);

    c.bench_function("array_4096_multiply", |bench| {
        bench.iter(|| black_box(&a) * black_box(&b))
    });

    c.bench_function("array_4096_add_scalar", |bench| {
        bench.iter(|| black_box(a.clone()) + black_box(0.5))
    });
}

criterion_group!(benches, bench_scalar_chain, bench_array_elementwise);
criterion_main!(benches);
