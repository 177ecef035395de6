//! De-click fades at clip boundaries.

use crate::buffer::seconds_to_samples;
use crate::dsp::amplify::apply_ramp;

/// Fade length used by every effect unless configured otherwise.
pub const DEFAULT_FADE_SECONDS: f32 = 0.05;

/// Number of samples each fade covers for a buffer of `len` samples.
///
/// Clamped to half the buffer so the fade-in and fade-out never overlap.
pub fn fade_len(len: usize, sample_rate: u32, fade_seconds: f32) -> usize {
    let fade = seconds_to_samples(f64::from(fade_seconds), sample_rate);
    if len < fade * 2 {
        len / 2
    } else {
        fade
    }
}

/// Linear fade-in over the first `fade_seconds` and fade-out over the last.
///
/// The first and last samples end up exactly zero. Buffers shorter than two
/// samples are left alone. Applying it twice tapers the edges further.
pub fn apply_fade(buffer: &mut [f32], sample_rate: u32, fade_seconds: f32) {
    let len = buffer.len();
    if len < 2 {
        return;
    }

    let fade = fade_len(len, sample_rate, fade_seconds);
    if fade == 0 {
        return;
    }

    apply_ramp(&mut buffer[..fade], 0.0, 1.0);
    apply_ramp(&mut buffer[len - fade..], 1.0, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 1_000;

    #[test]
    fn edges_are_zero_and_middle_untouched() {
        let mut buffer = vec![0.5f32; 1_000];
        apply_fade(&mut buffer, SR, 0.05);

        assert_eq!(buffer[0], 0.0);
        assert_eq!(buffer[999], 0.0);
        assert!(buffer[50..950].iter().all(|&s| s == 0.5));
        // Ramps rise monotonically into the untouched middle
        assert!(buffer[..50].windows(2).all(|w| w[0] <= w[1]));
        assert!(buffer[950..].windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(buffer[49], 0.5);
        assert_eq!(buffer[950], 0.5);
    }

    #[test]
    fn short_buffer_clamps_fade_to_half() {
        assert_eq!(fade_len(60, SR, 0.05), 30);
        assert_eq!(fade_len(100, SR, 0.05), 50);
        assert_eq!(fade_len(101, SR, 0.05), 50);

        let mut buffer = vec![1.0f32; 61];
        apply_fade(&mut buffer, SR, 0.05);
        assert_eq!(buffer[0], 0.0);
        assert_eq!(buffer[60], 0.0);
        // Odd length leaves the centre sample outside both ramps
        assert_eq!(buffer[30], 1.0);
    }

    #[test]
    fn degenerate_buffers_are_unchanged() {
        let mut empty: Vec<f32> = Vec::new();
        apply_fade(&mut empty, SR, 0.05);
        assert!(empty.is_empty());

        let mut single = vec![0.7f32];
        apply_fade(&mut single, SR, 0.05);
        assert_eq!(single, vec![0.7]);
    }

    #[test]
    fn zero_fade_is_a_no_op() {
        let mut buffer = vec![0.3f32; 10];
        apply_fade(&mut buffer, SR, 0.0);
        assert!(buffer.iter().all(|&s| s == 0.3));
    }

    #[test]
    fn second_fade_tapers_further() {
        let mut once = vec![1.0f32; 200];
        apply_fade(&mut once, SR, 0.05);
        let mut twice = once.clone();
        apply_fade(&mut twice, SR, 0.05);

        assert!(twice[10] < once[10]);
        assert_eq!(twice[100], once[100]);
    }
}
