//! Single-tap feedback delay rendered over a whole buffer.

/*
Feedback Delay
==============

Vocabulary
----------

  tap          The point `delay_samples` behind the current sample that gets
               read back and mixed in.

  feedback     Gain applied to the tapped sample before it is added. Because
               the tap reads OUTPUT (not input), every echo is itself echoed,
               each time quieter by another factor of `feedback`.

  tail         Silence appended after the input so the echoes have room to
               ring out.


The Recursion
-------------

    out[i] = in[i]                                   i <  D
    out[i] = in[i] + feedback × out[i - D]           i >= D

A unit impulse at sample 0 therefore comes back at 0, D, 2D, 3D, ... with
amplitudes 1, g, g², g³, ... (g = feedback).

    amp
    1.0 ┤█
    0.6 ┤█    █
    0.36┤█    █    █
    0.22┤█    █    █    █
        └┴────┴────┴────┴──→ samples
         0    D    2D   3D


Boundedness
-----------

With 0 <= g < 1 each sample is at most the input peak times the geometric
series 1 + g + g² + ... = 1 / (1 - g). At g = 0.6 that is 2.5x. At g >= 1 the
series diverges, so those gains are rejected up front.


Ordering
--------

out[i] reads out[i - D], which may itself have been written earlier in the
same pass. The loop must run in strictly increasing index order, one sample
at a time. Splitting it across threads or SIMD lanes that span more than D
samples would read echoes that have not been written yet.
*/

use tracing::debug;

use crate::error::{Result, StemError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackDelay {
    delay_samples: usize,
    feedback: f32,
}

impl FeedbackDelay {
    /// Delay with a tap `delay_samples` back and the given feedback gain.
    ///
    /// Rejects a zero delay and any feedback outside `[0, 1)`.
    pub fn new(delay_samples: usize, feedback: f32) -> Result<Self> {
        if delay_samples == 0 {
            return Err(StemError::invalid("delay_samples", "must be at least one sample"));
        }
        validate_feedback(feedback)?;
        Ok(Self {
            delay_samples,
            feedback,
        })
    }

    /// Delay time given in milliseconds, rounded to whole samples.
    pub fn from_millis(delay_ms: f32, feedback: f32, sample_rate: u32) -> Result<Self> {
        if !delay_ms.is_finite() || delay_ms <= 0.0 {
            return Err(StemError::invalid(
                "delay_ms",
                format!("must be positive, got {delay_ms}"),
            ));
        }
        let delay_samples = (f64::from(delay_ms) * f64::from(sample_rate) / 1000.0).round() as usize;
        Self::new(delay_samples, feedback)
    }

    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Render `signal` followed by `tail_samples` of echo tail.
    ///
    /// The output is `signal.len() + tail_samples` long.
    pub fn render(&self, signal: &[f32], tail_samples: usize) -> Vec<f32> {
        let mut output = vec![0.0f32; signal.len() + tail_samples];
        output[..signal.len()].copy_from_slice(signal);

        debug!(
            delay_samples = self.delay_samples,
            feedback = self.feedback,
            output_len = output.len(),
            "rendering feedback delay"
        );

        let d = self.delay_samples;
        let g = self.feedback;
        for i in d..output.len() {
            output[i] += output[i - d] * g;
        }

        output
    }
}

pub(crate) fn validate_feedback(feedback: f32) -> Result<()> {
    if !(0.0..1.0).contains(&feedback) {
        return Err(StemError::invalid(
            "feedback",
            format!("must be in [0, 1), got {feedback}"),
        ));
    }
    Ok(())
}

/// Feedback-delay `signal` and extend it by `tail_seconds` of echo tail.
pub fn apply_delay(
    signal: &[f32],
    delay_samples: usize,
    feedback: f32,
    tail_seconds: f32,
    sample_rate: u32,
) -> Result<Vec<f32>> {
    crate::error::ensure_duration("tail_seconds", tail_seconds)?;
    let delay = FeedbackDelay::new(delay_samples, feedback)?;
    let tail = crate::buffer::seconds_to_samples(f64::from(tail_seconds), sample_rate);
    Ok(delay.render(signal, tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(len: usize) -> Vec<f32> {
        let mut signal = vec![0.0; len];
        signal[0] = 1.0;
        signal
    }

    #[test]
    fn impulse_repeats_decay_geometrically() {
        let delay = FeedbackDelay::new(100, 0.6).unwrap();
        let output = delay.render(&impulse(1_000), 500);

        assert_eq!(output.len(), 1_500);
        for k in 0..15 {
            let expected = 0.6f32.powi(k as i32);
            let actual = output[k * 100];
            assert!(
                (actual - expected).abs() < 1e-5,
                "repeat {k}: expected {expected}, got {actual}"
            );
        }
        // Nothing between the taps
        assert!(output[1..100].iter().all(|&s| s == 0.0));
        assert!(output[101..200].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn tail_extends_output() {
        let output = apply_delay(&[0.5; 10], 3, 0.5, 0.01, 1_000).unwrap();
        assert_eq!(output.len(), 20);
    }

    #[test]
    fn zero_feedback_passes_signal_through() {
        let signal: Vec<f32> = (0..50).map(|i| (i as f32 * 0.3).sin()).collect();
        let output = FeedbackDelay::new(7, 0.0).unwrap().render(&signal, 20);
        assert_eq!(&output[..50], signal.as_slice());
        assert!(output[50..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn output_stays_under_geometric_bound() {
        let signal = vec![1.0f32; 2_000];
        let feedback = 0.9;
        let output = FeedbackDelay::new(13, feedback).unwrap().render(&signal, 4_000);
        let bound = 1.0 / (1.0 - feedback) + 1e-3;
        assert!(output.iter().all(|s| s.abs() <= bound));
    }

    #[test]
    fn unstable_feedback_is_rejected() {
        assert!(FeedbackDelay::new(10, 1.0).is_err());
        assert!(FeedbackDelay::new(10, 1.5).is_err());
        assert!(FeedbackDelay::new(10, -0.1).is_err());
        assert!(FeedbackDelay::new(10, f32::NAN).is_err());
        assert!(FeedbackDelay::new(0, 0.5).is_err());
    }

    #[test]
    fn millis_round_to_samples() {
        let delay = FeedbackDelay::from_millis(350.0, 0.6, 44_100).unwrap();
        assert_eq!(delay.delay_samples(), 15_435);
        assert!(FeedbackDelay::from_millis(0.0, 0.6, 44_100).is_err());
    }

    #[test]
    fn negative_tail_is_rejected() {
        assert!(apply_delay(&[1.0], 1, 0.5, -1.0, 1_000).is_err());
    }
}
