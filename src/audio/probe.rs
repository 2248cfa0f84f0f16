//! Sample-rate extraction without decoding the sample data.
//!
//! Two independent readers are provided. [`WavHeaderReader`] only parses the
//! RIFF `fmt ` chunk and is the fast path for plain WAV files.
//! [`ContainerProbe`] goes through symphonia's format probe and handles any
//! container symphonia understands. [`read_sample_rate`] tries them in order.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Something that can report a file's sample rate.
pub trait RateReader {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Read the sample rate of `path` in Hz.
    fn read_rate(&self, path: &Path) -> std::result::Result<u32, String>;
}

/// Reads the rate straight from the WAV header via hound.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavHeaderReader;

impl RateReader for WavHeaderReader {
    fn name(&self) -> &'static str {
        "wav-header"
    }

    fn read_rate(&self, path: &Path) -> std::result::Result<u32, String> {
        let reader = hound::WavReader::open(path).map_err(|e| e.to_string())?;
        positive(reader.spec().sample_rate)
    }
}

/// Reads the rate from symphonia's probed codec parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerProbe;

impl RateReader for ContainerProbe {
    fn name(&self) -> &'static str {
        "container-probe"
    }

    fn read_rate(&self, path: &Path) -> std::result::Result<u32, String> {
        let file = File::open(path).map_err(|e| e.to_string())?;
        let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| e.to_string())?;

        let rate = probed
            .format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .and_then(|t| t.codec_params.sample_rate)
            .ok_or_else(|| "no audio track with a sample rate".to_string())?;

        positive(rate)
    }
}

fn positive(rate: u32) -> std::result::Result<u32, String> {
    if rate == 0 {
        Err("sample rate is zero".to_string())
    } else {
        Ok(rate)
    }
}

/// Read a file's sample rate, falling back from `fast` to `general`.
///
/// Fails only when both readers fail; the error carries both reasons.
pub fn read_sample_rate(
    path: &Path,
    fast: &dyn RateReader,
    general: &dyn RateReader,
) -> Result<u32> {
    match fast.read_rate(path) {
        Ok(rate) => Ok(rate),
        Err(fast_err) => {
            debug!(
                "{} failed for {} ({fast_err}), trying {}",
                fast.name(),
                path.display(),
                general.name()
            );
            general
                .read_rate(path)
                .map_err(|general_err| Error::ProbeFailed {
                    path: path.to_path_buf(),
                    fast: fast_err,
                    general: general_err,
                })
        }
    }
}
