use std::{f64::consts::TAU, hint::black_box};

use criterion::{BatchSize, Criterion, criterion_group};
use rand::Rng;
use ringclip::{
    ClipBoundary, Clipper, Tolerance,
    cartesian::{Extent, Polygon, Polyline, Ring},
    layer::{self, FeatureCollection},
};

const VERTICES: usize = 1000;

fn random_star() -> Polygon<f64> {
    let mut rng = rand::rng();

    (0..VERTICES)
        .map(|index| {
            let angle = TAU * index as f64 / VERTICES as f64;
            let radius = rng.random_range(50. ..100.);
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect::<Vec<_>>()
        .into()
}

fn random_polyline() -> Polyline<f64> {
    let mut rng = rand::rng();

    (0..VERTICES)
        .map(|_| [rng.random_range(-100. ..100.), rng.random_range(-100. ..100.)])
        .collect::<Vec<_>>()
        .into()
}

fn clipper(boundary: &ClipBoundary) -> Clipper<&ClipBoundary, Tolerance<f64>> {
    Clipper::default()
        .with_boundary(boundary)
        .with_tolerance(Tolerance::default())
}

pub fn large_geometries(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("large geometries");

    let rectangle: ClipBoundary = Extent::new(-40., -40., 40., 40.).into();
    let diamond: ClipBoundary = Ring::from(vec![[60., 0.], [0., 60.], [-60., 0.], [0., -60.]]).into();

    group.bench_function("polygon by rectangle", |b| {
        b.iter_batched(
            random_star,
            |polygon| clipper(&rectangle).polygon(black_box(&polygon)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("polygon by ring", |b| {
        b.iter_batched(
            random_star,
            |polygon| clipper(&diamond).polygon(black_box(&polygon)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("polyline by rectangle", |b| {
        b.iter_batched(
            random_polyline,
            |polyline| clipper(&rectangle).polyline(black_box(&polyline)),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

pub fn layers(criterion: &mut Criterion) {
    let rectangle: ClipBoundary = Extent::new(-40., -40., 40., 40.).into();

    let mut features = FeatureCollection::new(());
    (0..200).for_each(|row| features.push(random_star(), row));

    criterion.bench_function("layer of 200 polygons", |b| {
        b.iter(|| layer::clip(black_box(&features), &rectangle, Tolerance::default()))
    });
}

criterion_group!(benches, large_geometries, layers);
