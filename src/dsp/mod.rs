//! Low-level DSP primitives used by the effect chains.
//!
//! Every primitive works on whole in-memory buffers and knows nothing about
//! files, markers or which effect it belongs to. Stateful pieces (the delay,
//! the band-pass) are plain values rebuilt for every effect call.

/// Gain ramps and signal multiplication.
pub mod amplify;
/// Single-tap feedback delay with an echo tail.
pub mod delay;
/// Quantization ("bitcrush") distortion.
pub mod distortion;
/// Breakpoint envelopes, transient shaping and sidechain ducking.
pub mod envelope;
/// De-click fades.
pub mod fade;
/// Butterworth band-pass filter.
pub mod filter;
/// Phase-vocoder pitch shifting.
pub mod pitch;
/// Gapped and gapless stutter patterns.
pub mod stutter;

pub use delay::{apply_delay, FeedbackDelay};
pub use distortion::{quantize, quantize_buffer};
pub use envelope::{apply_duck, shape_transient, EnvelopeCurve};
pub use fade::{apply_fade, DEFAULT_FADE_SECONDS};
pub use filter::{bandpass, Biquad, ButterworthBandpass, FilterSpec};
pub use pitch::{pitch_shift, PitchShifter};
pub use stutter::{build_stutter_pattern, StutterPattern};
