use tracing::{debug, info};

use crate::buffer::{check_finite, SampleBuffer};
use crate::config::HitConfig;
use crate::dsp::envelope::{apply_duck, shape_transient};
use crate::dsp::fade::apply_fade;
use crate::effects::Effect;
use crate::error::Result;

/// Crowd hit: the marked segment with a sharpened attack and a sidechain
/// style duck at the front.
///
/// ```text
/// slice → transient shape → duck → fade
/// ```
#[derive(Debug, Clone, Default)]
pub struct HitEffect {
    config: HitConfig,
}

impl HitEffect {
    pub fn new(config: HitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HitConfig {
        &self.config
    }
}

impl Effect for HitEffect {
    fn name(&self) -> &'static str {
        "crowd_hit"
    }

    fn render(&self, source: &SampleBuffer) -> Result<SampleBuffer> {
        let config = &self.config;
        let sample_rate = source.sample_rate();
        config.validate(sample_rate)?;

        info!(
            start_seconds = config.marker.start_seconds,
            "generating crowd hit"
        );

        let mut output = source.slice(config.marker).into_samples();

        shape_transient(
            &mut output,
            sample_rate,
            config.attack_seconds,
            config.decay_seconds,
            config.decay_target,
        )?;

        if !apply_duck(
            &mut output,
            sample_rate,
            config.duck_seconds,
            config.duck_start_gain,
        )? {
            debug!(
                segment_len = output.len(),
                duck_seconds = config.duck_seconds,
                "segment shorter than duck window, skipping duck"
            );
        }

        check_finite(&output, "hit.envelope")?;

        apply_fade(&mut output, sample_rate, config.fade_seconds);

        Ok(source.with_samples(output))
    }
}
