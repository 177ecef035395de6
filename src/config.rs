//! Effect parameters.
//!
//! Each effect takes its own config value, so any of them can be rendered
//! with different markers or settings without touching the others. The
//! `Default` impls reproduce the stems cut from the reference recording.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::TimeMarker;
use crate::dsp::delay::{validate_feedback, FeedbackDelay};
use crate::dsp::distortion::validate_step;
use crate::dsp::fade::DEFAULT_FADE_SECONDS;
use crate::dsp::filter::FilterSpec;
use crate::error::{ensure_duration, ensure_finite, Result};

/// Rate the source is decoded at when the caller does not ask for another.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Pitch-shifted feedback-delay riser.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RiserConfig {
    pub marker: TimeMarker,
    pub semitones: f32,
    pub delay_ms: f32,
    pub feedback: f32,
    pub tail_seconds: f32,
    pub fade_seconds: f32,
}

impl Default for RiserConfig {
    fn default() -> Self {
        Self {
            // 3:38 to 3:55
            marker: TimeMarker::at(3, 38.0, 17.0),
            semitones: 1.5,
            // Roughly a quarter note at 170 BPM
            delay_ms: 350.0,
            feedback: 0.6,
            tail_seconds: 2.0,
            fade_seconds: DEFAULT_FADE_SECONDS,
        }
    }
}

impl RiserConfig {
    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        self.marker.validate()?;
        ensure_finite("semitones", self.semitones)?;
        validate_feedback(self.feedback)?;
        FeedbackDelay::from_millis(self.delay_ms, self.feedback, sample_rate)?;
        ensure_duration("tail_seconds", self.tail_seconds)?;
        ensure_duration("fade_seconds", self.fade_seconds)?;
        Ok(())
    }
}

/// Stutter, band-pass and bitcrush glitch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GlitchConfig {
    pub marker: TimeMarker,
    /// Length of every slot in the stutter grid.
    pub slot_seconds: f32,
    pub gapped_repeats: usize,
    pub gapless_repeats: usize,
    pub filter: FilterSpec,
    pub quantize_step: f32,
    pub fade_seconds: f32,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            // 3:45.5, a short vocal chunk
            marker: TimeMarker::at(3, 45.5, 0.2),
            slot_seconds: 0.12,
            gapped_repeats: 4,
            gapless_repeats: 8,
            filter: FilterSpec::new(500.0, 2_000.0, 2),
            quantize_step: 0.1,
            fade_seconds: DEFAULT_FADE_SECONDS,
        }
    }
}

impl GlitchConfig {
    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        self.marker.validate()?;
        ensure_duration("slot_seconds", self.slot_seconds)?;
        self.filter.validate(sample_rate)?;
        validate_step(self.quantize_step)?;
        ensure_duration("fade_seconds", self.fade_seconds)?;
        Ok(())
    }
}

/// Transient-shaped, ducked hit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct HitConfig {
    pub marker: TimeMarker,
    pub attack_seconds: f32,
    pub decay_seconds: f32,
    pub decay_target: f32,
    pub duck_seconds: f32,
    pub duck_start_gain: f32,
    pub fade_seconds: f32,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self {
            // 3:53, crowd reaction at the end of the loop
            marker: TimeMarker::at(3, 53.0, 1.0),
            attack_seconds: 0.005,
            decay_seconds: 0.2,
            decay_target: 0.6,
            duck_seconds: 0.1,
            duck_start_gain: 0.1,
            fade_seconds: DEFAULT_FADE_SECONDS,
        }
    }
}

impl HitConfig {
    pub fn validate(&self, _sample_rate: u32) -> Result<()> {
        self.marker.validate()?;
        ensure_duration("attack_seconds", self.attack_seconds)?;
        ensure_duration("decay_seconds", self.decay_seconds)?;
        ensure_finite("decay_target", self.decay_target)?;
        ensure_duration("duck_seconds", self.duck_seconds)?;
        ensure_finite("duck_start_gain", self.duck_start_gain)?;
        ensure_duration("fade_seconds", self.fade_seconds)?;
        Ok(())
    }
}

/// Settings for all three stems.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectConfig {
    pub riser: RiserConfig,
    pub glitch: GlitchConfig,
    pub hit: HitConfig,
}

impl EffectConfig {
    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        self.riser.validate(sample_rate)?;
        self.glitch.validate(sample_rate)?;
        self.hit.validate(sample_rate)?;
        Ok(())
    }
}
