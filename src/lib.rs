pub mod buffer; // Sample buffers and time markers
pub mod config;
pub mod dsp;
pub mod effects; // Riser, glitch and hit chains
pub mod error;
pub mod io;

pub use buffer::{SampleBuffer, TimeMarker};
pub use config::{EffectConfig, GlitchConfig, HitConfig, RiserConfig, DEFAULT_SAMPLE_RATE};
pub use effects::{render_stems, Effect, GlitchEffect, HitEffect, RiserEffect, Stem};
pub use error::{Result, StemError};
