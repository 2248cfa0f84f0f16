//! In-memory audio buffer.

use std::path::PathBuf;

/// A decoded audio file.
///
/// Samples are planar: one `Vec<f32>` per channel, each in `[-1.0, 1.0]`
/// and all of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioAsset {
    /// Path relative to the corpus root it was loaded from.
    pub path: PathBuf,
    /// Sample rate in Hz. Always positive.
    pub sample_rate: u32,
    /// Per-channel samples.
    pub channels: Vec<Vec<f32>>,
}

impl AudioAsset {
    /// Create an asset from planar channel data.
    pub fn new(path: impl Into<PathBuf>, sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        Self {
            path: path.into(),
            sample_rate,
            channels,
        }
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }
}
