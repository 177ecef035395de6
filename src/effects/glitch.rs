use tracing::{debug, info};

use crate::buffer::{check_finite, seconds_to_samples, SampleBuffer};
use crate::config::GlitchConfig;
use crate::dsp::distortion::quantize_buffer;
use crate::dsp::fade::apply_fade;
use crate::dsp::filter::ButterworthBandpass;
use crate::dsp::stutter::StutterPattern;
use crate::effects::Effect;
use crate::error::Result;

/// Memory glitch: a short chunk stuttered, band-limited and bitcrushed.
///
/// ```text
/// slice → stutter grid → band-pass → quantize → fade
/// ```
#[derive(Debug, Clone, Default)]
pub struct GlitchEffect {
    config: GlitchConfig,
}

impl GlitchEffect {
    pub fn new(config: GlitchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GlitchConfig {
        &self.config
    }

    /// Stutter grid for `sample_rate`.
    pub fn pattern(&self, sample_rate: u32) -> StutterPattern {
        let slot_len = seconds_to_samples(f64::from(self.config.slot_seconds), sample_rate);
        StutterPattern::new(
            slot_len,
            self.config.gapped_repeats,
            self.config.gapless_repeats,
        )
    }
}

impl Effect for GlitchEffect {
    fn name(&self) -> &'static str {
        "memory_glitch"
    }

    fn render(&self, source: &SampleBuffer) -> Result<SampleBuffer> {
        let config = &self.config;
        let sample_rate = source.sample_rate();
        config.validate(sample_rate)?;

        info!(
            start_seconds = config.marker.start_seconds,
            low_hz = config.filter.low_hz,
            high_hz = config.filter.high_hz,
            "generating memory glitch"
        );

        let chunk = source.slice(config.marker);
        let pattern = self.pattern(sample_rate);
        let mut output = pattern.render(chunk.samples());

        let mut filter = ButterworthBandpass::design(config.filter, sample_rate)?;
        filter.render(&mut output);
        check_finite(&output, "glitch.bandpass")?;

        quantize_buffer(&mut output, config.quantize_step)?;
        apply_fade(&mut output, sample_rate, config.fade_seconds);

        debug!(
            chunk_len = chunk.len(),
            slot_len = pattern.slot_len,
            output_len = output.len(),
            "memory glitch rendered"
        );

        Ok(source.with_samples(output))
    }
}
