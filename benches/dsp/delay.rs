//! Benchmarks for the feedback delay.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stemfx::dsp::delay::FeedbackDelay;

use crate::{test_signal, CLIP_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    let delay_times_ms: &[f32] = &[
        10.0,  // comb-like
        350.0, // riser default
    ];

    for &size in CLIP_SIZES {
        let input = test_signal(size);

        for &delay_ms in delay_times_ms {
            let delay = FeedbackDelay::from_millis(delay_ms, 0.6, SAMPLE_RATE)
                .expect("valid delay");
            group.bench_with_input(
                BenchmarkId::new(format!("render_{}ms", delay_ms as u32), size),
                &size,
                |b, _| b.iter(|| delay.render(black_box(&input), black_box(88_200))),
            );
        }
    }

    group.finish();
}
