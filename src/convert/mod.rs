//! Mirror a corpus tree into a destination tree at a uniform sample rate.
//!
//! Every audio file is decoded, resampled if its rate differs from the
//! target, and re-encoded as integer PCM of a fixed bit depth, even when no
//! resampling was needed.

use crate::audio::{decode_audio_file, resample_asset, write_wav};
use crate::config::{Config, ErrorPolicy, ResampleMethod};
use crate::error::{Error, Result};
use crate::output::progress::BatchProgress;
use crate::pipeline::{collect_audio_files, mirrored_path};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Settings for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Rate every output file is written at.
    pub target_rate: u32,
    /// Output PCM bit depth.
    pub bits_per_sample: u16,
    /// Resampling algorithm.
    pub method: ResampleMethod,
    /// Log a progress line every N files.
    pub progress_interval: usize,
    /// Per-file failure policy.
    pub on_error: ErrorPolicy,
    /// Show an interactive progress bar.
    pub show_progress: bool,
}

impl ConvertOptions {
    /// Options taken from configuration, without a progress bar.
    pub fn from_config(config: &Config) -> Self {
        Self {
            target_rate: config.audio.target_sample_rate,
            bits_per_sample: config.audio.bits_per_sample,
            method: config.audio.resample_method,
            progress_interval: config.convert.progress_interval,
            on_error: config.convert.on_error,
            show_progress: false,
        }
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Resampled to the target rate.
    Converted,
    /// Already at the target rate; re-encoded only.
    Unchanged,
}

/// Totals for a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertSummary {
    /// Audio files found under the source root.
    pub total: usize,
    /// Files that needed resampling.
    pub converted: usize,
    /// Files already at the target rate.
    pub unchanged: usize,
    /// Files that failed, with the reason. Only populated under keep-going.
    pub failed: Vec<(PathBuf, String)>,
    /// Destination root.
    pub output_root: PathBuf,
}

impl ConvertSummary {
    /// Files processed so far, successful or not.
    pub fn processed(&self) -> usize {
        self.converted + self.unchanged + self.failed.len()
    }
}

/// Convert one file from `source` to `destination`.
pub fn convert_file(
    source: &Path,
    relative: &Path,
    destination: &Path,
    options: &ConvertOptions,
) -> Result<FileOutcome> {
    let asset = decode_audio_file(source, relative)?;
    let original_rate = asset.sample_rate;

    let asset = resample_asset(asset, options.target_rate, options.method)?;
    write_wav(destination, &asset, options.bits_per_sample)?;

    if original_rate == options.target_rate {
        Ok(FileOutcome::Unchanged)
    } else {
        debug!(
            "{}: {original_rate} -> {} Hz",
            relative.display(),
            options.target_rate
        );
        Ok(FileOutcome::Converted)
    }
}

/// Convert every audio file under `src_root` into `dst_root`.
///
/// Under [`ErrorPolicy::FailFast`] the first failure aborts the run; files
/// already written stay on disk. Under [`ErrorPolicy::KeepGoing`] failures
/// are logged and listed in the summary.
pub fn convert_corpus(
    src_root: &Path,
    dst_root: &Path,
    options: &ConvertOptions,
) -> Result<ConvertSummary> {
    if options.target_rate == 0 {
        return Err(Error::InvalidSampleRate { value: 0 });
    }

    let files = collect_audio_files(src_root)?;
    let total = files.len();
    info!(
        "Converting {total} file(s) from {} to {} at {} Hz ({})",
        src_root.display(),
        dst_root.display(),
        options.target_rate,
        options.method
    );

    let mut summary = ConvertSummary {
        total,
        output_root: dst_root.to_path_buf(),
        ..ConvertSummary::default()
    };

    let progress = BatchProgress::new(total, options.progress_interval, options.show_progress);
    let mut written: HashSet<PathBuf> = HashSet::new();

    for (index, file) in files.iter().enumerate() {
        let (relative, destination) = mirrored_path(file, src_root, dst_root);
        progress.set_current(&relative);
        if !written.insert(destination.clone()) {
            warn!(
                "{} overwrites an earlier output at {}",
                file.display(),
                destination.display()
            );
        }

        match convert_file(file, &relative, &destination, options) {
            Ok(FileOutcome::Converted) => summary.converted += 1,
            Ok(FileOutcome::Unchanged) => summary.unchanged += 1,
            Err(e) => match options.on_error {
                ErrorPolicy::FailFast => {
                    progress.finish("Failed");
                    return Err(e);
                }
                ErrorPolicy::KeepGoing => {
                    error!("Failed to convert {}: {e}", file.display());
                    summary.failed.push((file.clone(), e.to_string()));
                }
            },
        }

        progress.tick(index + 1, summary.converted, summary.unchanged);
    }

    progress.finish("Done");

    if !summary.failed.is_empty() {
        warn!("{} file(s) failed to convert", summary.failed.len());
    }

    Ok(summary)
}
