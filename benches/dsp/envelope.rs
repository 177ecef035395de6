//! Benchmarks for breakpoint envelopes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stemfx::dsp::envelope::{apply_duck, shape_transient};
use stemfx::dsp::fade::apply_fade;

use crate::{test_signal, CLIP_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in CLIP_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();

        group.bench_with_input(BenchmarkId::new("transient", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                shape_transient(black_box(&mut buffer), SAMPLE_RATE, 0.005, 0.2, 0.6)
            })
        });

        group.bench_with_input(BenchmarkId::new("duck", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                apply_duck(black_box(&mut buffer), SAMPLE_RATE, 0.1, 0.1)
            })
        });

        group.bench_with_input(BenchmarkId::new("fade", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                apply_fade(black_box(&mut buffer), SAMPLE_RATE, 0.05);
            })
        });
    }

    group.finish();
}
