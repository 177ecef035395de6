//! Benchmarks for stutter pattern rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stemfx::dsp::stutter::StutterPattern;

use crate::{test_signal, SAMPLE_RATE};

pub fn bench_stutter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/stutter");

    let chunk = test_signal(8_820);

    for slot_ms in [60usize, 120, 240] {
        let slot_len = slot_ms * SAMPLE_RATE as usize / 1000;
        let pattern = StutterPattern::new(slot_len, 4, 8);

        group.bench_with_input(BenchmarkId::new("render", slot_ms), &slot_ms, |b, _| {
            b.iter(|| pattern.render(black_box(&chunk)))
        });
    }

    group.finish();
}
