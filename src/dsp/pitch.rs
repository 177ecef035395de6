//! Duration-preserving pitch shift.
//!
//! A phase vocoder: the segment is cut into overlapping Hann-windowed frames,
//! each frame's bins are moved up or down the frequency axis by
//! `2^(semitones / 12)`, and the frames are resynthesised with overlap-add.
//! Each bin's phase advance is used to estimate its true frequency, so the
//! shifted partials keep running phase from frame to frame instead of
//! smearing.
//!
//! Resampling would also change pitch, but it changes length with it. Here
//! the output is always exactly as long as the input.

use std::f32::consts::TAU;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use tracing::debug;

use crate::buffer::peak;
use crate::dsp::amplify::apply_gain;
use crate::error::{ensure_finite, Result};

/// Analysis frame length in seconds (2048 samples at 44.1 kHz).
const FRAME_SECONDS: f32 = 0.046;
/// Frames overlap by this factor (hop = frame / OVERLAP).
const OVERLAP: usize = 4;
const MIN_FRAME_LEN: usize = 64;

pub struct PitchShifter {
    frame_len: usize,
    hop: usize,
    window: Vec<f32>,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
}

impl PitchShifter {
    /// Shifter with a frame length chosen for `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        let target = (sample_rate as f32 * FRAME_SECONDS) as usize;
        Self::with_frame_len(target.next_power_of_two().max(MIN_FRAME_LEN))
    }

    /// Shifter with an explicit frame length (rounded up to a power of two).
    pub fn with_frame_len(frame_len: usize) -> Self {
        let frame_len = frame_len.next_power_of_two().max(MIN_FRAME_LEN);
        let mut planner = FftPlanner::new();

        // Periodic Hann: overlap-adds to a constant at hop = frame / 4
        let window = (0..frame_len)
            .map(|i| 0.5 * (1.0 - (TAU * i as f32 / frame_len as f32).cos()))
            .collect();

        Self {
            frame_len,
            hop: frame_len / OVERLAP,
            window,
            forward: planner.plan_fft_forward(frame_len),
            inverse: planner.plan_fft_inverse(frame_len),
        }
    }

    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Shift `segment` by `semitones`, keeping its length.
    ///
    /// The result is rescaled so its peak never exceeds the input peak.
    pub fn process(&self, segment: &[f32], semitones: f32) -> Vec<f32> {
        if segment.is_empty() {
            return Vec::new();
        }
        if semitones == 0.0 {
            return segment.to_vec();
        }

        let ratio = 2.0f32.powf(semitones / 12.0);
        let n = self.frame_len;
        let hop = self.hop;
        let half = n / 2;
        let bins = half + 1;

        // A full frame of silence either side so every input sample sees
        // the complete overlap
        let mut padded = vec![0.0f32; segment.len() + 2 * n];
        padded[n..n + segment.len()].copy_from_slice(segment);

        let mut output = vec![0.0f32; padded.len()];
        let mut window_sum = vec![0.0f32; padded.len()];

        let expected_advance: Vec<f32> = (0..bins)
            .map(|k| wrap_phase(TAU * hop as f32 * k as f32 / n as f32))
            .collect();
        let mut last_phase = vec![0.0f32; bins];
        let mut synth_phase = vec![0.0f32; bins];
        let mut synth_mag = vec![0.0f32; bins];
        let mut synth_freq = vec![0.0f32; bins];
        let mut spectrum = vec![Complex::new(0.0f32, 0.0); n];
        let mut scratch = vec![Complex::new(0.0f32, 0.0); self.forward.get_inplace_scratch_len()];
        let mut inverse_scratch =
            vec![Complex::new(0.0f32, 0.0); self.inverse.get_inplace_scratch_len()];

        let mut frames = 0usize;
        let mut start = 0usize;
        while start + n <= padded.len() {
            // Rotate by half a frame so the window is centred on index 0 and
            // a steady partial lands in its main-lobe bins with equal phase
            for (i, bin) in spectrum.iter_mut().enumerate() {
                let j = (i + half) % n;
                *bin = Complex::new(padded[start + j] * self.window[j], 0.0);
            }
            self.forward.process_with_scratch(&mut spectrum, &mut scratch);

            synth_mag.fill(0.0);
            synth_freq.fill(0.0);

            for k in 0..bins {
                let magnitude = spectrum[k].norm();
                let phase = spectrum[k].arg();

                // Deviation from the bin centre, wrapped to [-pi, pi]
                let deviation = wrap_phase(phase - last_phase[k] - expected_advance[k]);
                last_phase[k] = phase;

                // True frequency in bins
                let true_freq = k as f32 + deviation * n as f32 / (TAU * hop as f32);

                let target = (k as f32 * ratio).round() as usize;
                if target < bins {
                    synth_mag[target] += magnitude;
                    synth_freq[target] = true_freq * ratio;
                }
            }

            for k in 0..bins {
                synth_phase[k] =
                    wrap_phase(synth_phase[k] + TAU * hop as f32 * synth_freq[k] / n as f32);
                spectrum[k] = Complex::from_polar(synth_mag[k], synth_phase[k]);
            }
            // Hermitian mirror so the inverse transform is real
            for k in 1..n - bins + 1 {
                spectrum[n - k] = spectrum[k].conj();
            }

            self.inverse
                .process_with_scratch(&mut spectrum, &mut inverse_scratch);

            let scale = 1.0 / n as f32;
            for j in 0..n {
                let w = self.window[j];
                output[start + j] += spectrum[(j + half) % n].re * scale * w;
                window_sum[start + j] += w * w;
            }

            frames += 1;
            start += hop;
        }

        let mut shifted: Vec<f32> = output[n..n + segment.len()]
            .iter()
            .zip(&window_sum[n..n + segment.len()])
            .map(|(&s, &w)| if w > 1e-6 { s / w } else { 0.0 })
            .collect();

        let input_peak = peak(segment);
        let output_peak = peak(&shifted);
        if output_peak > input_peak && output_peak > 0.0 {
            apply_gain(&mut shifted, input_peak / output_peak);
        }

        debug!(
            semitones,
            ratio,
            frames,
            frame_len = n,
            input_peak,
            output_peak,
            "pitch shifted segment"
        );

        shifted
    }
}

/// Wrap a phase to [-pi, pi].
#[inline]
fn wrap_phase(phase: f32) -> f32 {
    phase - TAU * (phase / TAU).round()
}

/// Shift `segment` by `semitones` without changing its length.
pub fn pitch_shift(segment: &[f32], sample_rate: u32, semitones: f32) -> Result<Vec<f32>> {
    ensure_finite("semitones", semitones)?;
    if segment.is_empty() {
        return Ok(Vec::new());
    }
    Ok(PitchShifter::new(sample_rate).process(segment, semitones))
}
