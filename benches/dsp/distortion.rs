//! Benchmarks for quantization.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stemfx::dsp::distortion::quantize_buffer;

use crate::{test_signal, CLIP_SIZES};

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in CLIP_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();

        group.bench_with_input(BenchmarkId::new("quantize", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                quantize_buffer(black_box(&mut buffer), black_box(0.1))
            })
        });
    }

    group.finish();
}
