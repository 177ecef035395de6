//! Mono sample buffers and the time markers that select ranges from them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, StemError};

/// Convert a duration in seconds to a whole number of samples (rounded).
///
/// Negative and non-finite durations map to zero samples; callers validate
/// durations before they get here.
#[inline]
pub fn seconds_to_samples(seconds: f64, sample_rate: u32) -> usize {
    let samples = (seconds * f64::from(sample_rate)).round();
    if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    }
}

/// A fixed range of the source recording, in seconds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMarker {
    pub start_seconds: f64,
    pub duration_seconds: f64,
}

impl TimeMarker {
    pub const fn new(start_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            start_seconds,
            duration_seconds,
        }
    }

    /// Marker starting at `minutes:seconds` into the recording.
    pub fn at(minutes: u32, seconds: f64, duration_seconds: f64) -> Self {
        Self::new(f64::from(minutes) * 60.0 + seconds, duration_seconds)
    }

    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("marker.start_seconds", self.start_seconds),
            ("marker.duration_seconds", self.duration_seconds),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(StemError::invalid(
                    name,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Single-channel audio at a fixed sample rate.
///
/// Every effect owns the buffers it builds; nothing here is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(StemError::invalid("sample_rate", "must be positive"));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// `len` samples of silence.
    pub fn silent(len: usize, sample_rate: u32) -> Result<Self> {
        Self::new(vec![0.0; len], sample_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Same sample rate, new samples.
    pub(crate) fn with_samples(&self, samples: Vec<f32>) -> Self {
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    pub fn seconds_to_samples(&self, seconds: f64) -> usize {
        seconds_to_samples(seconds, self.sample_rate)
    }

    /// Copy out the range selected by `marker`.
    ///
    /// A marker reaching past the end is clamped to the samples that exist,
    /// which may leave an empty buffer.
    pub fn slice(&self, marker: TimeMarker) -> SampleBuffer {
        let len = self.samples.len();
        let start = self.seconds_to_samples(marker.start_seconds);
        let end = self.seconds_to_samples(marker.end_seconds());

        if end > len {
            warn!(
                start_seconds = marker.start_seconds,
                end_seconds = marker.end_seconds(),
                available_seconds = self.duration_seconds(),
                "time marker extends past the end of the source, clamping"
            );
        }

        let start = start.min(len);
        let end = end.clamp(start, len);
        self.with_samples(self.samples[start..end].to_vec())
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        peak(&self.samples)
    }

    /// Fail if any sample is NaN or infinite.
    pub fn ensure_finite(&self, stage: &'static str) -> Result<()> {
        check_finite(&self.samples, stage)
    }
}

pub(crate) fn check_finite(samples: &[f32], stage: &'static str) -> Result<()> {
    match samples.iter().position(|s| !s.is_finite()) {
        Some(index) => Err(StemError::NumericInstability { stage, index }),
        None => Ok(()),
    }
}

pub(crate) fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}
