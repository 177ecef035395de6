//! Bitcrush / Quantization
//!
//! Quantization distorts by throwing away amplitude resolution. Every sample
//! snaps to the nearest multiple of a fixed `step`:
//!
//!   output = round(input / step) × step
//!
//! # What It Sounds Like
//!
//! Quiet passages collapse to silence (anything under `step / 2` rounds to
//! zero) and louder material turns into a staircase waveform, which adds the
//! gritty, buzzy harmonics associated with low bit-depth samplers.
//!
//! # Step Sizes
//!
//!   0.001 = barely audible (roughly 10-bit)
//!   0.01  = light grit
//!   0.1   = heavy crush (about 20 levels across [-1, 1])
//!   0.25+ = mostly gated, only peaks survive
//!
//! Ties round to the nearest even multiple. Quantizing an already quantized
//! signal with the same step leaves it unchanged.

use crate::error::{Result, StemError};

/// Snap one sample to the nearest multiple of `step`.
#[inline]
pub fn quantize(sample: f32, step: f32) -> f32 {
    (sample / step).round_ties_even() * step
}

/// Quantize an entire buffer in place.
pub fn quantize_buffer(buffer: &mut [f32], step: f32) -> Result<()> {
    validate_step(step)?;
    for sample in buffer.iter_mut() {
        *sample = quantize(*sample, step);
    }
    Ok(())
}

pub(crate) fn validate_step(step: f32) -> Result<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(StemError::invalid(
            "quantize_step",
            format!("must be positive and finite, got {step}"),
        ));
    }
    Ok(())
}
