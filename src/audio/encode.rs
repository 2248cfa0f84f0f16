//! WAV file writing.

use crate::audio::AudioAsset;
use crate::error::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs;
use std::path::Path;

/// Write an asset as integer PCM at its own sample rate.
///
/// Channels are interleaved and samples clamped to `[-1.0, 1.0]` before
/// quantisation. Parent directories are created as needed.
pub fn write_wav(path: &Path, asset: &AudioAsset, bits_per_sample: u16) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let channels =
        u16::try_from(asset.channel_count().max(1)).map_err(|_| Error::WavWriteFailed {
            path: path.to_path_buf(),
            source: hound::Error::Unsupported,
        })?;

    let spec = WavSpec {
        channels,
        sample_rate: asset.sample_rate,
        bits_per_sample,
        sample_format: SampleFormat::Int,
    };

    let wav_err = |e| Error::WavWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = WavWriter::create(path, spec).map_err(wav_err)?;

    #[allow(clippy::cast_precision_loss)]
    let scale = ((1i64 << (bits_per_sample - 1)) - 1) as f32;

    for frame in 0..asset.frames() {
        for channel in &asset.channels {
            let sample = channel.get(frame).copied().unwrap_or(0.0);
            if bits_per_sample == 16 {
                #[allow(clippy::cast_possible_truncation)]
                let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
                writer.write_sample(sample_i16).map_err(wav_err)?;
            } else {
                #[allow(clippy::cast_possible_truncation)]
                let sample_i32 = (f64::from(sample.clamp(-1.0, 1.0)) * f64::from(scale)) as i32;
                writer.write_sample(sample_i32).map_err(wav_err)?;
            }
        }
    }

    writer.finalize().map_err(wav_err)?;

    Ok(())
}
