//! Gain ramps and signal multiplication.

/*
Gain Ramps
==========

Every envelope in this crate is built from one move: multiply a run of
samples by a gain that changes in a straight line.

Vocabulary
----------

  gain        A multiplier applied to amplitude.
                gain = 1.0  →  unchanged (unity)
                gain = 0.0  →  silence

  ramp        A run of `n` gains spaced evenly from `from` to `to`, with BOTH
              endpoints included. The first sample gets exactly `from` and the
              last sample gets exactly `to`.

  unity       Gain 1.0. Samples outside every ramp are left at unity.


The Math
--------

For a ramp of n samples, sample i (0-based) gets:

    gain[i] = from + (to - from) × i / (n - 1)        n > 1
    gain[0] = from                                     n = 1

Example: a 5-sample fade-in (from 0.0 to 1.0)

    i:     0     1     2     3     4
    gain:  0.0   0.25  0.5   0.75  1.0

Including both endpoints is what makes a faded clip start and end on an
exact zero, which is the point of a de-click fade.
*/

/// Gain of sample `index` within an inclusive ramp of `len` samples.
#[inline]
pub fn ramp_gain(index: usize, len: usize, from: f32, to: f32) -> f32 {
    if len <= 1 {
        return from;
    }
    let t = index as f32 / (len - 1) as f32;
    from + (to - from) * t
}

/// Multiply `signal` in place by an inclusive linear ramp spanning its length.
#[inline]
pub fn apply_ramp(signal: &mut [f32], from: f32, to: f32) {
    let len = signal.len();
    for (i, sample) in signal.iter_mut().enumerate() {
        *sample *= ramp_gain(i, len, from, to);
    }
}

/// Multiply a signal by a constant gain factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Multiply a signal by a modulator, writing result into signal buffer (in-place).
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    debug_assert_eq!(signal.len(), modulator.len());

    for (s, &m) in signal.iter_mut().zip(modulator.iter()) {
        *s *= m;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_includes_both_endpoints() {
        let mut signal = [1.0; 5];
        apply_ramp(&mut signal, 0.0, 1.0);
        assert_eq!(signal, [0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_descending_ramp() {
        let mut signal = [2.0; 3];
        apply_ramp(&mut signal, 1.0, 0.0);
        assert_eq!(signal, [2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_single_sample_ramp_uses_start_gain() {
        let mut signal = [0.8];
        apply_ramp(&mut signal, 0.0, 1.0);
        assert_eq!(signal, [0.0]);
        assert_eq!(ramp_gain(0, 1, 0.1, 1.0), 0.1);
    }

    #[test]
    fn test_apply_gain() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        apply_gain(&mut signal, 0.5);
        assert_eq!(signal, [0.5, 0.25, -0.25, -0.5]);
    }

    #[test]
    fn test_multiply_in_place() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        let modulator = [0.5, 0.5, 0.5, 0.0];
        multiply_in_place(&mut signal, &modulator);
        assert_eq!(signal, [0.5, 0.25, -0.25, 0.0]);
    }
}
