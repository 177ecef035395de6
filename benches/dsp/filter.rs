//! Benchmarks for the Butterworth band-pass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stemfx::dsp::filter::{ButterworthBandpass, FilterSpec};

use crate::{test_signal, CLIP_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    group.bench_function("design_order_2", |b| {
        b.iter(|| {
            ButterworthBandpass::design(black_box(FilterSpec::new(500.0, 2_000.0, 2)), SAMPLE_RATE)
        })
    });

    for &size in CLIP_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();

        for order in [2, 4] {
            let mut filter =
                ButterworthBandpass::design(FilterSpec::new(500.0, 2_000.0, order), SAMPLE_RATE)
                    .expect("valid band");
            group.bench_with_input(
                BenchmarkId::new(format!("bandpass_order_{order}"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        filter.reset();
                        filter.render(black_box(&mut buffer));
                    })
                },
            );
        }
    }

    group.finish();
}
