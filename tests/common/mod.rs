//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Write a mono 16-bit sine tone of `frames` samples.
pub fn write_tone(path: &Path, sample_rate: u32, frames: u32) {
    write_tone_channels(path, sample_rate, frames, 1);
}

/// Write a 16-bit sine tone with `channels` identical channels.
pub fn write_tone_channels(path: &Path, sample_rate: u32, frames: u32, channels: u16) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let theta = i as f32 / sample_rate as f32 * 2.0 * std::f32::consts::PI * 440.0;
        #[allow(clippy::cast_possible_truncation)]
        let sample = (theta.sin() * f32::from(i16::MAX) * 0.5) as i16;
        for _ in 0..channels {
            writer.write_sample(sample).unwrap();
        }
    }
    writer.finalize().unwrap();
}
