//! Benchmarks for the riser, glitch and hit chains.

use std::hint::black_box;

use criterion::Criterion;
use stemfx::{
    render_stems, Effect, EffectConfig, GlitchEffect, HitEffect, RiserEffect, SampleBuffer,
};

use crate::{test_signal, SAMPLE_RATE};

/// 4 minutes covers every default marker.
const SOURCE_SECONDS: usize = 240;

pub fn bench_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("effects");
    group.sample_size(10);

    let source = SampleBuffer::new(test_signal(SOURCE_SECONDS * SAMPLE_RATE as usize), SAMPLE_RATE)
        .expect("valid source");

    let chains: Vec<Box<dyn Effect>> = vec![
        Box::new(RiserEffect::default()),
        Box::new(GlitchEffect::default()),
        Box::new(HitEffect::default()),
    ];

    for effect in &chains {
        group.bench_function(effect.name(), |b| b.iter(|| effect.render(black_box(&source))));
    }

    let config = EffectConfig::default();
    group.bench_function("all_stems", |b| {
        b.iter(|| render_stems(black_box(&source), &config))
    });

    group.finish();
}
