//! WAV decoding and encoding with hound.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::{debug, info};

use crate::buffer::SampleBuffer;
use crate::effects::Stem;
use crate::error::{Result, StemError};
use crate::io::resample::resample;

/// Decode `path`, fold it to mono and convert it to `sample_rate`.
///
/// Integer formats are scaled to `[-1, 1)`; float files are taken as is.
pub fn read_mono(path: impl AsRef<Path>, sample_rate: u32) -> Result<SampleBuffer> {
    let path = path.as_ref();
    let reader = match WavReader::open(path) {
        Ok(reader) => reader,
        Err(hound::Error::IoError(e)) if e.kind() == ErrorKind::NotFound => {
            return Err(StemError::SourceNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, hound::Error>>()?,
        SampleFormat::Int => {
            let max_val = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_val))
                .collect::<std::result::Result<Vec<f32>, hound::Error>>()?
        }
    };

    let mono = downmix(&interleaved, channels);

    info!(
        path = %path.display(),
        channels,
        source_rate = spec.sample_rate,
        seconds = mono.len() as f64 / f64::from(spec.sample_rate.max(1)),
        "decoded source"
    );

    let samples = resample(&mono, spec.sample_rate, sample_rate)?;
    SampleBuffer::new(samples, sample_rate)
}

/// Average interleaved frames down to one channel.
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Write `buffer` as mono 16-bit PCM, clamping to full scale.
pub fn write_pcm16(path: impl AsRef<Path>, buffer: &SampleBuffer) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for &sample in buffer.samples() {
        writer.write_sample(to_pcm16(sample))?;
    }
    writer.finalize()?;

    debug!(
        path = %path.as_ref().display(),
        samples = buffer.len(),
        "wrote stem"
    );
    Ok(())
}

#[inline]
fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

/// Write every stem as `<out_dir>/<name>.wav`, creating the directory.
pub fn write_stems(out_dir: impl AsRef<Path>, stems: &[Stem]) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    stems
        .iter()
        .map(|stem| {
            let path = out_dir.join(format!("{}.wav", stem.name));
            write_pcm16(&path, &stem.buffer)?;
            info!(
                path = %path.display(),
                seconds = stem.buffer.duration_seconds(),
                "saved stem"
            );
            Ok(path)
        })
        .collect()
}
