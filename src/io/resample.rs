//! Offline sample-rate conversion with rubato.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

use crate::error::{Result, StemError};

const CHUNK_SIZE: usize = 1024;

fn sinc_params() -> SincInterpolationParameters {
    SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    }
}

fn resample_error(e: impl std::fmt::Display) -> StemError {
    StemError::Resample(e.to_string())
}

/// Convert mono `samples` from `from_rate` to `to_rate`.
///
/// The output is `round(len * to_rate / from_rate)` samples long and lined
/// up with the input (the resampler's own delay is trimmed off).
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == 0 || to_rate == 0 {
        return Err(StemError::invalid("sample_rate", "must be positive"));
    }
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = f64::from(to_rate) / f64::from(from_rate);
    let expected = (samples.len() as f64 * ratio).round() as usize;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, sinc_params(), CHUNK_SIZE, 1)
        .map_err(resample_error)?;
    let delay = resampler.output_delay();
    let mut output = Vec::with_capacity(expected + delay + CHUNK_SIZE);

    let mut pos = 0;
    while samples.len() - pos >= resampler.input_frames_next() {
        let frames = resampler.input_frames_next();
        let block_in = [&samples[pos..pos + frames]];
        let block = resampler
            .process(&block_in[..], None)
            .map_err(resample_error)?;
        output.extend_from_slice(&block[0]);
        pos += frames;
    }

    if pos < samples.len() {
        let block_in = [&samples[pos..]];
        let block = resampler
            .process_partial(Some(&block_in[..]), None)
            .map_err(resample_error)?;
        output.extend_from_slice(&block[0]);
    }

    // Flush the filter until the delayed tail is out
    while output.len() < delay + expected {
        let block = resampler
            .process_partial::<&[f32]>(None, None)
            .map_err(resample_error)?;
        if block[0].is_empty() {
            break;
        }
        output.extend_from_slice(&block[0]);
    }

    output.drain(..delay.min(output.len()));
    output.resize(expected, 0.0);

    debug!(
        from_rate,
        to_rate,
        input_len = samples.len(),
        output_len = output.len(),
        "resampled source"
    );

    Ok(output)
}
