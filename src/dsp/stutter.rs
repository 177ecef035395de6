//! Stutter patterns built from one short chunk.
//!
//! ```text
//!   gapped section                      gapless section
//!   [chunk][ gap ][chunk][ gap ] ...    [chunk][chunk][chunk] ...
//! ```
//!
//! Sparse repeats with silence between them tighten into a dense run of
//! back-to-back repeats. A chunk longer than `slot_len` is cut to fit. A
//! shorter chunk is repeated as-is, never padded; every gap is `slot_len`
//! samples of silence whatever the chunk length.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StutterPattern {
    pub slot_len: usize,
    pub gapped_repeats: usize,
    pub gapless_repeats: usize,
}

impl StutterPattern {
    pub fn new(slot_len: usize, gapped_repeats: usize, gapless_repeats: usize) -> Self {
        Self {
            slot_len,
            gapped_repeats,
            gapless_repeats,
        }
    }

    /// Exact length in samples of the pattern rendered from a chunk of
    /// `chunk_len` samples.
    ///
    /// With `chunk_len >= slot_len` this is `(2 * gapped + gapless) * slot_len`.
    pub fn output_len(&self, chunk_len: usize) -> usize {
        let chunk_len = chunk_len.min(self.slot_len);
        self.gapped_repeats * (chunk_len + self.slot_len) + self.gapless_repeats * chunk_len
    }

    pub fn render(&self, chunk: &[f32]) -> Vec<f32> {
        let chunk = &chunk[..chunk.len().min(self.slot_len)];
        let mut output = Vec::with_capacity(self.output_len(chunk.len()));

        debug!(
            slot_len = self.slot_len,
            chunk_len = chunk.len(),
            gapped = self.gapped_repeats,
            gapless = self.gapless_repeats,
            "rendering stutter pattern"
        );

        for _ in 0..self.gapped_repeats {
            output.extend_from_slice(chunk);
            output.resize(output.len() + self.slot_len, 0.0);
        }
        for _ in 0..self.gapless_repeats {
            output.extend_from_slice(chunk);
        }

        output
    }
}

/// Build `gapped_repeats` of `[chunk, silence(target_chunk_len)]` followed by
/// `gapless_repeats` of `[chunk]`, with `chunk` cut to `target_chunk_len`.
pub fn build_stutter_pattern(
    chunk: &[f32],
    target_chunk_len: usize,
    gapped_repeats: usize,
    gapless_repeats: usize,
) -> Vec<f32> {
    StutterPattern::new(target_chunk_len, gapped_repeats, gapless_repeats).render(chunk)
}
