//! Full effect chain benchmarks.
//!
//! Each effect renders from a synthetic source long enough to cover its
//! default marker, so the numbers match a real render.

mod effects;

pub use effects::bench_effects;
