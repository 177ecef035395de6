//! Effect chains that turn a source recording into stems.
//!
//! Each effect cuts its own range out of the source and runs it through a
//! fixed chain of primitives from [`crate::dsp`]. Effects are independent:
//! none reads another's output, and the source is never mutated.

mod glitch;
mod hit;
mod riser;

pub use glitch::GlitchEffect;
pub use hit::HitEffect;
pub use riser::RiserEffect;

use tracing::info;

use crate::buffer::SampleBuffer;
use crate::config::EffectConfig;
use crate::error::Result;

/// Core trait for offline effect chains
///
/// An effect reads the source, builds a new buffer and reports any invalid
/// parameter before doing any work.
pub trait Effect: Send + Sync {
    /// File stem used for the rendered output (`<name>.wav`).
    fn name(&self) -> &'static str;

    fn render(&self, source: &SampleBuffer) -> Result<SampleBuffer>;
}

/// A rendered effect, ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct Stem {
    pub name: &'static str,
    pub buffer: SampleBuffer,
}

/// The three effects, built from `config`, in output order.
pub fn effects(config: &EffectConfig) -> Vec<Box<dyn Effect>> {
    vec![
        Box::new(RiserEffect::new(config.riser.clone())),
        Box::new(GlitchEffect::new(config.glitch.clone())),
        Box::new(HitEffect::new(config.hit.clone())),
    ]
}

/// Render every stem from `source`.
///
/// All parameters are validated before the first effect runs, so a bad
/// config fails without any partial output.
pub fn render_stems(source: &SampleBuffer, config: &EffectConfig) -> Result<Vec<Stem>> {
    config.validate(source.sample_rate())?;

    info!(
        source_seconds = source.duration_seconds(),
        sample_rate = source.sample_rate(),
        "rendering stems"
    );

    effects(config)
        .iter()
        .map(|effect| {
            Ok(Stem {
                name: effect.name(),
                buffer: effect.render(source)?,
            })
        })
        .collect()
}
