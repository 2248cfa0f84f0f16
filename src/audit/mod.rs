//! Sample-rate audit of an audio tree.
//!
//! Walks a corpus, reads each file's rate from its header (falling back to
//! a container probe), and tallies a histogram plus the files that deviate
//! from the target rate. Nothing is written to disk.

mod report;

pub use report::{AuditReport, Mismatch, RateCount, Unreadable};

use crate::audio::{ContainerProbe, RateReader, WavHeaderReader, read_sample_rate};
use crate::error::Result;
use crate::pipeline::collect_audio_files;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Rate distribution and mismatches collected during one audit run.
#[derive(Debug, Clone, Default)]
pub struct SampleRateHistogram {
    target_rate: u32,
    counts: BTreeMap<u32, usize>,
    mismatches: Vec<(PathBuf, u32)>,
    unreadable: Vec<(PathBuf, String)>,
}

impl SampleRateHistogram {
    /// Empty histogram for `target_rate`.
    pub fn new(target_rate: u32) -> Self {
        Self {
            target_rate,
            ..Self::default()
        }
    }

    /// Record one file's rate.
    pub fn record(&mut self, path: PathBuf, rate: u32) {
        *self.counts.entry(rate).or_insert(0) += 1;
        if rate != self.target_rate {
            self.mismatches.push((path, rate));
        }
    }

    /// Record a file whose rate could not be read by any reader.
    pub fn record_unreadable(&mut self, path: PathBuf, reason: String) {
        self.unreadable.push((path, reason));
    }

    /// Target rate mismatches are measured against.
    pub fn target_rate(&self) -> u32 {
        self.target_rate
    }

    /// Number of files whose rate was read.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Rate/count pairs, most common first; equal counts by ascending rate.
    pub fn sorted_counts(&self) -> Vec<(u32, usize)> {
        let mut counts: Vec<(u32, usize)> = self.counts.iter().map(|(&r, &c)| (r, c)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }

    /// Files not at the target rate, in scan order.
    pub fn mismatches(&self) -> &[(PathBuf, u32)] {
        &self.mismatches
    }

    /// Files no reader could handle.
    pub fn unreadable(&self) -> &[(PathBuf, String)] {
        &self.unreadable
    }

    /// Build a bounded report listing at most `limit` mismatches.
    pub fn report(&self, root: &Path, limit: usize) -> AuditReport {
        AuditReport {
            root: root.to_path_buf(),
            target_rate: self.target_rate,
            total_files: self.total(),
            rates: self
                .sorted_counts()
                .into_iter()
                .map(|(sample_rate, count)| RateCount { sample_rate, count })
                .collect(),
            mismatches: self
                .mismatches
                .iter()
                .take(limit)
                .map(|(path, rate)| Mismatch {
                    path: path.clone(),
                    sample_rate: *rate,
                })
                .collect(),
            remaining_mismatches: self.mismatches.len().saturating_sub(limit),
            unreadable: self
                .unreadable
                .iter()
                .map(|(path, reason)| Unreadable {
                    path: path.clone(),
                    reason: reason.clone(),
                })
                .collect(),
        }
    }
}

/// Audit every audio file under `root` against `target_rate`.
pub fn audit_sample_rates(root: &Path, target_rate: u32) -> Result<SampleRateHistogram> {
    audit_with_readers(root, target_rate, &WavHeaderReader, &ContainerProbe)
}

/// Audit with explicit fast and general rate readers.
///
/// A file both readers reject is recorded as unreadable; the run continues.
pub fn audit_with_readers(
    root: &Path,
    target_rate: u32,
    fast: &dyn RateReader,
    general: &dyn RateReader,
) -> Result<SampleRateHistogram> {
    let files = collect_audio_files(root)?;
    info!("Auditing {} audio file(s) under {}", files.len(), root.display());

    let mut histogram = SampleRateHistogram::new(target_rate);
    for file in files {
        match read_sample_rate(&file, fast, general) {
            Ok(rate) => {
                debug!("{} -> {rate}", file.display());
                histogram.record(file, rate);
            }
            Err(e) => {
                warn!("{e}");
                histogram.record_unreadable(file, e.to_string());
            }
        }
    }

    Ok(histogram)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_sum_to_total() {
        let mut h = SampleRateHistogram::new(22050);
        h.record("a.wav".into(), 22050);
        h.record("b.wav".into(), 44100);
        h.record("c.wav".into(), 44100);
        h.record("d.wav".into(), 16000);

        assert_eq!(h.total(), 4);
        let sum: usize = h.sorted_counts().iter().map(|(_, c)| c).sum();
        assert_eq!(sum, h.total());
    }

    #[test]
    fn test_sorted_counts_descending_with_rate_tiebreak() {
        let mut h = SampleRateHistogram::new(22050);
        for (i, rate) in [48000, 16000, 44100, 44100, 48000, 44100].iter().enumerate() {
            h.record(format!("{i}.wav").into(), *rate);
        }
        assert_eq!(h.sorted_counts(), vec![(44100, 3), (48000, 2), (16000, 1)]);

        let mut tied = SampleRateHistogram::new(22050);
        tied.record("x.wav".into(), 48000);
        tied.record("y.wav".into(), 16000);
        assert_eq!(tied.sorted_counts(), vec![(16000, 1), (48000, 1)]);
    }

    #[test]
    fn test_mismatches_in_scan_order() {
        let mut h = SampleRateHistogram::new(22050);
        h.record("a.wav".into(), 44100);
        h.record("b.wav".into(), 22050);
        h.record("c.wav".into(), 16000);
        assert_eq!(
            h.mismatches(),
            &[
                (PathBuf::from("a.wav"), 44100),
                (PathBuf::from("c.wav"), 16000)
            ]
        );
    }

    #[test]
    fn test_report_truncates_mismatches() {
        let mut h = SampleRateHistogram::new(22050);
        for i in 0..25 {
            h.record(format!("{i}.wav").into(), 44100);
        }
        let report = h.report(Path::new("data"), 20);
        assert_eq!(report.total_files, 25);
        assert_eq!(report.mismatches.len(), 20);
        assert_eq!(report.remaining_mismatches, 5);
    }
}
