//! Benchmarks for filter performance

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use face_anchor::constants::IDENTITY_MATRIX;
use face_anchor::filters::{FilterBank, OneEuroFilter};
use face_anchor::types::Point3;

fn benchmark_one_euro(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_euro");

    // Noisy samples simulating a single landmark coordinate at 60 fps
    let samples: Vec<(f64, f32)> = (0..100)
        .map(|i| {
            let t = i as f64 / 60.0;
            let value = (t.sin() * 0.1) as f32 + 0.01 * rand::random::<f32>();
            (t, value)
        })
        .collect();

    let mut filter = OneEuroFilter::new(1.0, 0.05);
    group.bench_with_input(
        BenchmarkId::new("single_update", "min_cutoff_1.0"),
        &samples[0],
        |b, &(t, v)| {
            b.iter(|| black_box(filter.filter(black_box(t), black_box(v))));
        },
    );

    group.bench_with_input(
        BenchmarkId::new("sequence_100", "min_cutoff_1.0"),
        &samples,
        |b, data| {
            b.iter(|| {
                filter.reset();
                for &(t, v) in data {
                    black_box(filter.filter(black_box(t), black_box(v)));
                }
            });
        },
    );

    group.finish();
}

fn benchmark_filter_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_bank");

    for &landmark_count in &[68usize, 468] {
        let landmarks: Vec<Point3> = (0..landmark_count)
            .map(|i| {
                Point3::new(
                    i as f32 * 0.001 + 0.001 * rand::random::<f32>(),
                    0.001 * rand::random::<f32>(),
                    -0.4,
                )
            })
            .collect();

        let mut bank = FilterBank::new(landmark_count, 1.0, 0.05);
        let mut frame = 0u64;
        group.bench_with_input(
            BenchmarkId::new("filter_estimate", landmark_count),
            &landmarks,
            |b, landmarks| {
                b.iter(|| {
                    frame += 1;
                    let t = frame as f64 / 60.0;
                    black_box(bank.filter_estimate(
                        black_box(t),
                        black_box(landmarks),
                        black_box(&IDENTITY_MATRIX),
                        black_box(1.0),
                    ))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_one_euro, benchmark_filter_bank);
criterion_main!(benches);
