use tracing::{debug, info};

use crate::buffer::{check_finite, seconds_to_samples, SampleBuffer};
use crate::config::RiserConfig;
use crate::dsp::delay::FeedbackDelay;
use crate::dsp::fade::apply_fade;
use crate::dsp::pitch::pitch_shift;
use crate::effects::Effect;
use crate::error::Result;

/// Loop riser: the marked segment pitched up, then smeared by a feedback
/// delay that rings out past the end of the segment.
///
/// ```text
/// slice → pitch shift → feedback delay (+ tail) → fade
/// ```
#[derive(Debug, Clone, Default)]
pub struct RiserEffect {
    config: RiserConfig,
}

impl RiserEffect {
    pub fn new(config: RiserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiserConfig {
        &self.config
    }
}

impl Effect for RiserEffect {
    fn name(&self) -> &'static str {
        "loop_riser"
    }

    fn render(&self, source: &SampleBuffer) -> Result<SampleBuffer> {
        let config = &self.config;
        let sample_rate = source.sample_rate();
        config.validate(sample_rate)?;

        info!(
            start_seconds = config.marker.start_seconds,
            semitones = config.semitones,
            "generating loop riser"
        );

        let segment = source.slice(config.marker);
        let pitched = pitch_shift(segment.samples(), sample_rate, config.semitones)?;
        check_finite(&pitched, "riser.pitch")?;

        let delay = FeedbackDelay::from_millis(config.delay_ms, config.feedback, sample_rate)?;
        let tail = seconds_to_samples(f64::from(config.tail_seconds), sample_rate);
        let mut output = delay.render(&pitched, tail);
        check_finite(&output, "riser.delay")?;

        apply_fade(&mut output, sample_rate, config.fade_seconds);

        debug!(
            segment_len = segment.len(),
            output_len = output.len(),
            "loop riser rendered"
        );

        Ok(source.with_samples(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TimeMarker;
    use std::f32::consts::TAU;

    const SR: u32 = 44_100;

    fn tone_source(seconds: f32) -> SampleBuffer {
        let len = (seconds * SR as f32) as usize;
        let samples = (0..len)
            .map(|i| 0.5 * (TAU * 220.0 * i as f32 / SR as f32).sin())
            .collect();
        SampleBuffer::new(samples, SR).unwrap()
    }

    fn short_config() -> RiserConfig {
        RiserConfig {
            marker: TimeMarker::new(0.5, 1.0),
            ..RiserConfig::default()
        }
    }

    #[test]
    fn output_is_segment_plus_tail() {
        let source = tone_source(2.0);
        let stem = RiserEffect::new(short_config()).render(&source).unwrap();

        assert_eq!(stem.len(), 44_100 + 88_200);
        assert_eq!(stem.sample_rate(), SR);
        assert_eq!(stem.samples()[0], 0.0);
        assert_eq!(stem.samples()[stem.len() - 1], 0.0);
    }

    #[test]
    fn matches_primitives_chained_by_hand() {
        let source = tone_source(2.0);
        let config = short_config();
        let stem = RiserEffect::new(config.clone()).render(&source).unwrap();

        let segment = source.slice(config.marker);
        let pitched = pitch_shift(segment.samples(), SR, config.semitones).unwrap();
        let mut expected = FeedbackDelay::from_millis(config.delay_ms, config.feedback, SR)
            .unwrap()
            .render(&pitched, 88_200);
        apply_fade(&mut expected, SR, config.fade_seconds);

        assert_eq!(stem.samples(), expected.as_slice());
    }

    #[test]
    fn marker_past_end_still_renders_tail() {
        let source = tone_source(0.5);
        let stem = RiserEffect::default().render(&source).unwrap();

        assert_eq!(stem.len(), 88_200);
        assert!(stem.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn source_is_left_untouched() {
        let source = tone_source(2.0);
        let before = source.clone();
        RiserEffect::new(short_config()).render(&source).unwrap();
        assert_eq!(source, before);
    }
}
