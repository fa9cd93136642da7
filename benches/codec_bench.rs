use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use siteplan_map_annotator::core::geo::{self, LatLng};
use siteplan_map_annotator::core::polyline;
use std::hint::black_box;

fn build_synthetic_path(point_count: usize) -> Vec<LatLng> {
    (0..point_count)
        .map(|i| {
            let t = i as f64 * 0.001;
            LatLng::new(47.0 + t + (t * 13.0).sin() * 0.01, 8.0 + t * 1.7)
        })
        .collect()
}

fn bench_polyline_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("polyline_codec");

    for &point_count in &[100usize, 10_000usize] {
        let path = build_synthetic_path(point_count);
        let encoded = polyline::encode(&path);

        group.bench_with_input(
            BenchmarkId::new("encode", point_count),
            &path,
            |b, path| b.iter(|| black_box(polyline::encode(black_box(path)))),
        );
        group.bench_with_input(
            BenchmarkId::new("decode", point_count),
            &encoded,
            |b, encoded| b.iter(|| black_box(polyline::decode(black_box(encoded)))),
        );
    }

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let path = build_synthetic_path(10_000);

    c.bench_function("project_10k_points", |b| {
        b.iter(|| {
            let mut acc = 0.0f64;
            for p in &path {
                let (x, y) = geo::project(black_box(*p), 13.0);
                acc += x + y;
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_polyline_codec, bench_projection);
criterion_main!(benches);
