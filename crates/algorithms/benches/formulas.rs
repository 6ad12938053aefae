//! Benchmarks for per-segment calculation and segmentation

use coastcvi_algorithms::calculation::{calculate, CalculationParams, FormulaSelection};
use coastcvi_algorithms::vector::{segment_shoreline, SegmentationParams};
use coastcvi_core::segment::{SegmentProperties, ShorelineSegment};
use coastcvi_core::{ParameterValue, Registry};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geo::{Geometry, LineString};

fn create_segments(registry: &Registry, index_id: &str, count: usize) -> Vec<ShorelineSegment> {
    let parameters = registry.parameters_for_index(index_id).unwrap();
    (0..count)
        .map(|i| {
            let mut seg = ShorelineSegment::new(
                format!("segment-{:06}", i + 1),
                LineString::from(vec![(0.0, i as f64 * 1e-3), (1e-3, i as f64 * 1e-3)]),
                SegmentProperties::default(),
            );
            for (j, p) in parameters.iter().enumerate() {
                let v = ((i * 7 + j * 13) % 5 + 1) as f64;
                seg.set_parameter(&p.id, ParameterValue::Numerical {
                    value: v,
                    vulnerability: v,
                });
            }
            seg
        })
        .collect()
}

fn bench_calculate(c: &mut Criterion) {
    let registry = Registry::standard().unwrap();
    let mut group = c.benchmark_group("calculate");

    for index_id in ["cvi-thieler-1999", "ccvi-kantamaneni-2024", "gcvi"] {
        let parameters = registry.parameters_for_index(index_id).unwrap();
        let selection = FormulaSelection::Index(index_id.to_string());

        for size in [1_000, 10_000].iter() {
            let segments = create_segments(&registry, index_id, *size);
            group.bench_with_input(BenchmarkId::new(index_id, size), size, |b, _| {
                b.iter_batched(
                    || segments.clone(),
                    |mut segs| {
                        calculate(
                            &registry,
                            black_box(&mut segs),
                            &parameters,
                            &selection,
                            &CalculationParams::default(),
                        )
                        .unwrap()
                    },
                    criterion::BatchSize::LargeInput,
                )
            });
        }
    }

    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_shoreline");

    // Zig-zag coast of ~220 km
    let coords: Vec<(f64, f64)> = (0..200)
        .map(|i| (i as f64 * 0.01, if i % 2 == 0 { 0.0 } else { 0.005 }))
        .collect();
    let lines = vec![Geometry::LineString(LineString::from(coords))];

    for resolution in [1000.0, 100.0].iter() {
        let params = SegmentationParams {
            resolution: *resolution,
            confirmed: true,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(resolution), resolution, |b, _| {
            b.iter(|| segment_shoreline(black_box(&lines), &params).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_calculate, bench_segmentation);
criterion_main!(benches);
