//! Benchmarks for the phase-vocoder pitch shifter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stemfx::dsp::pitch::PitchShifter;

use crate::{test_signal, CLIP_SIZES, SAMPLE_RATE};

pub fn bench_pitch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/pitch");
    group.sample_size(10);

    let shifter = PitchShifter::new(SAMPLE_RATE);

    for &size in CLIP_SIZES {
        let input = test_signal(size);

        group.bench_with_input(BenchmarkId::new("up_1.5_semitones", size), &size, |b, _| {
            b.iter(|| shifter.process(black_box(&input), black_box(1.5)))
        });
    }

    group.bench_function("plan_frame", |b| {
        b.iter(|| PitchShifter::new(black_box(SAMPLE_RATE)))
    });

    group.finish();
}
