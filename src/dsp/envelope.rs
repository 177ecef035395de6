use crate::buffer::seconds_to_samples;
use crate::dsp::amplify::multiply_in_place;
use crate::error::{ensure_duration, ensure_finite, Result};
use tracing::trace;

/*
Breakpoint Envelopes
====================

Offline clips know their full length up front, so instead of a running
attack/decay state machine the envelope is a list of breakpoints that is
evaluated once per sample and multiplied into the clip.

Vocabulary
----------

  breakpoint  A (sample index, gain) pair. Breakpoint indices strictly
              increase along the curve.

  segment     The straight line between two neighbouring breakpoints. Sample
              i between breakpoints (i0, g0) and (i1, g1) gets

                  g0 + (g1 - g0) × (i - i0) / (i1 - i0)

  hold        Before the first breakpoint the curve holds its first gain;
              after the last it holds its last gain. An empty curve is unity.

  step        Two breakpoints on neighbouring indices with different gains.
              Nothing lies between them, so the gain jumps.


Transient Shaper
----------------

  gain
  1.0 ┤  ╱╲              ┌──────────────
      │ ╱  ╲             │
  0.6 ┤╱     ╲───────────┘  ← decay ends, gain steps back to unity
  0.0 ┼─────────────────────────────────→ samples
      attack  decay

The attack ramp (0 → 1) emphasises the onset, the decay ramp (1 → target)
pulls the body down, and the rest of the clip plays at unity.


Sidechain Duck
--------------

  gain
  1.0 ┤        ╱─────────────────────────
      │      ╱
      │    ╱
  0.1 ┤──╱
      └──────────────────────────────────→ samples
       duck

The clip starts pushed down (as if a kick just hit the compressor) and
recovers linearly to unity. If the clip is shorter than the duck window the
clip is returned untouched.
*/

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvelopeCurve {
    points: Vec<(usize, f32)>,
}

impl EnvelopeCurve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[(usize, f32)] {
        &self.points
    }

    /// Append a breakpoint.
    ///
    /// Breakpoints must arrive in index order. One on the same index as the
    /// last replaces its gain; one before the last is dropped, in debug and
    /// release builds alike, and the curve is left unchanged.
    pub fn push(&mut self, index: usize, gain: f32) {
        match self.points.last_mut() {
            Some(last) if last.0 == index => last.1 = gain,
            Some(last) if last.0 > index => {
                trace!(index, last = last.0, "dropping out-of-order breakpoint");
            }
            _ => self.points.push((index, gain)),
        }
    }

    /// Append an inclusive linear ramp of `len` samples starting at `start`.
    pub fn ramp(&mut self, start: usize, len: usize, from: f32, to: f32) {
        match len {
            0 => {}
            1 => self.push(start, from),
            _ => {
                self.push(start, from);
                self.push(start + len - 1, to);
            }
        }
    }

    /// Gain at sample `index`.
    pub fn gain_at(&self, index: usize) -> f32 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 1.0,
        };
        if index <= first.0 {
            return first.1;
        }
        if index >= last.0 {
            return last.1;
        }

        // First breakpoint strictly after `index`; both neighbours exist here
        let next = self.points.partition_point(|&(i, _)| i <= index);
        let (i0, g0) = self.points[next - 1];
        let (i1, g1) = self.points[next];
        let t = (index - i0) as f32 / (i1 - i0) as f32;
        g0 + (g1 - g0) * t
    }

    /// Write the curve's gains into `out`.
    pub fn render(&self, out: &mut [f32]) {
        for (i, gain) in out.iter_mut().enumerate() {
            *gain = self.gain_at(i);
        }
    }

    /// Multiply `buffer` by the curve.
    pub fn apply(&self, buffer: &mut [f32]) {
        if self.points.is_empty() {
            return;
        }
        let mut gains = vec![0.0f32; buffer.len()];
        self.render(&mut gains);
        multiply_in_place(buffer, &gains);
    }
}

/// Attack/decay envelope: ramp 0 → 1 over the attack, 1 → `decay_target`
/// over the decay, unity afterwards.
pub fn transient_curve(attack_len: usize, decay_len: usize, decay_target: f32) -> EnvelopeCurve {
    let mut curve = EnvelopeCurve::new();
    curve.ramp(0, attack_len, 0.0, 1.0);
    curve.push(attack_len, 1.0);
    curve.ramp(attack_len, decay_len, 1.0, decay_target);
    curve.push(attack_len + decay_len, 1.0);
    curve
}

/// Recovery curve from `start_gain` back to unity over `duck_len` samples.
pub fn duck_curve(duck_len: usize, start_gain: f32) -> EnvelopeCurve {
    let mut curve = EnvelopeCurve::new();
    curve.ramp(0, duck_len, start_gain, 1.0);
    curve.push(duck_len, 1.0);
    curve
}

/// Emphasise the attack of `segment` and pull its body down to
/// `decay_target`. Ramps running past the end of a short segment are cut off.
pub fn shape_transient(
    segment: &mut [f32],
    sample_rate: u32,
    attack_seconds: f32,
    decay_seconds: f32,
    decay_target: f32,
) -> Result<()> {
    ensure_duration("attack_seconds", attack_seconds)?;
    ensure_duration("decay_seconds", decay_seconds)?;
    ensure_finite("decay_target", decay_target)?;

    let attack_len = seconds_to_samples(f64::from(attack_seconds), sample_rate);
    let decay_len = seconds_to_samples(f64::from(decay_seconds), sample_rate);
    transient_curve(attack_len, decay_len, decay_target).apply(segment);
    Ok(())
}

/// Simulated sidechain: the first `duck_seconds` ramp from `start_gain` up
/// to unity. Returns `false` (and leaves `segment` untouched) when the
/// segment is shorter than the duck window.
pub fn apply_duck(
    segment: &mut [f32],
    sample_rate: u32,
    duck_seconds: f32,
    start_gain: f32,
) -> Result<bool> {
    ensure_duration("duck_seconds", duck_seconds)?;
    ensure_finite("duck_start_gain", start_gain)?;

    let duck_len = seconds_to_samples(f64::from(duck_seconds), sample_rate);
    if segment.len() < duck_len {
        return Ok(false);
    }
    duck_curve(duck_len, start_gain).apply(segment);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 1_000;

    #[test]
    fn empty_curve_is_unity() {
        let curve = EnvelopeCurve::new();
        assert_eq!(curve.gain_at(0), 1.0);
        assert_eq!(curve.gain_at(1_000), 1.0);

        let mut buffer = [0.3, -0.4];
        curve.apply(&mut buffer);
        assert_eq!(buffer, [0.3, -0.4]);
    }

    #[test]
    fn curve_interpolates_and_holds() {
        let mut curve = EnvelopeCurve::new();
        curve.push(10, 0.0);
        curve.push(20, 1.0);

        assert_eq!(curve.gain_at(0), 0.0);
        assert_eq!(curve.gain_at(10), 0.0);
        assert!((curve.gain_at(15) - 0.5).abs() < 1e-6);
        assert_eq!(curve.gain_at(20), 1.0);
        assert_eq!(curve.gain_at(500), 1.0);
    }

    #[test]
    fn repeated_index_replaces_gain() {
        let mut curve = EnvelopeCurve::new();
        curve.push(0, 0.0);
        curve.push(5, 0.5);
        curve.push(5, 1.0);
        assert_eq!(curve.points(), &[(0, 0.0), (5, 1.0)]);
    }

    #[test]
    fn out_of_order_breakpoint_is_dropped() {
        let mut curve = EnvelopeCurve::new();
        curve.push(0, 0.0);
        curve.push(10, 1.0);
        curve.push(4, 0.25);
        curve.ramp(2, 3, 0.5, 0.5);

        assert_eq!(curve.points(), &[(0, 0.0), (10, 1.0)]);
        assert!((curve.gain_at(5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn transient_envelope_shape() {
        // 5 ms attack, 20 ms decay at 1 kHz
        let mut segment = vec![1.0f32; 100];
        shape_transient(&mut segment, SR, 0.005, 0.02, 0.6).unwrap();

        assert_eq!(segment[0], 0.0);
        assert!((segment[2] - 0.5).abs() < 1e-6);
        assert_eq!(segment[4], 1.0);
        assert_eq!(segment[5], 1.0);
        assert!((segment[24] - 0.6).abs() < 1e-6);
        // Back to unity once the decay ends
        assert_eq!(segment[25], 1.0);
        assert!(segment[25..].iter().all(|&s| s == 1.0));
        // Decay ramp descends monotonically
        assert!(segment[5..25].windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn transient_on_short_segment_is_cut_off() {
        let mut segment = vec![1.0f32; 3];
        shape_transient(&mut segment, SR, 0.005, 0.02, 0.6).unwrap();
        assert_eq!(segment, vec![0.0, 0.25, 0.5]);
    }

    #[test]
    fn duck_ramps_up_then_leaves_rest() {
        let mut segment = vec![1.0f32; 200];
        let applied = apply_duck(&mut segment, SR, 0.1, 0.1).unwrap();

        assert!(applied);
        assert!((segment[0] - 0.1).abs() < 1e-6);
        assert!((segment[99] - 1.0).abs() < 1e-6);
        assert!(segment[..100].windows(2).all(|w| w[0] <= w[1]));
        assert!(segment[100..].iter().all(|&s| s == 1.0));
    }

    #[test]
    fn duck_skips_segment_shorter_than_window() {
        let original: Vec<f32> = (0..50).map(|i| i as f32 * 0.01).collect();
        let mut segment = original.clone();
        let applied = apply_duck(&mut segment, SR, 0.1, 0.1).unwrap();

        assert!(!applied);
        assert_eq!(segment, original);
    }

    #[test]
    fn duck_applies_at_exact_window_length() {
        let mut segment = vec![1.0f32; 100];
        assert!(apply_duck(&mut segment, SR, 0.1, 0.1).unwrap());
        assert!((segment[0] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn negative_durations_are_rejected() {
        let mut segment = vec![1.0f32; 10];
        assert!(shape_transient(&mut segment, SR, -0.1, 0.02, 0.6).is_err());
        assert!(apply_duck(&mut segment, SR, -0.1, 0.1).is_err());
        assert!(segment.iter().all(|&s| s == 1.0));
    }
}
