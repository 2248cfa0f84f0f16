//! Audit report rendering.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Bounded, printable result of an audit run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Root that was scanned.
    pub root: PathBuf,
    /// Rate the corpus is checked against.
    pub target_rate: u32,
    /// Files whose rate was read.
    pub total_files: usize,
    /// Rate histogram, most common first.
    pub rates: Vec<RateCount>,
    /// First mismatching files, in scan order.
    pub mismatches: Vec<Mismatch>,
    /// Mismatches left out of `mismatches`.
    pub remaining_mismatches: usize,
    /// Files no reader could handle.
    pub unreadable: Vec<Unreadable>,
}

/// One histogram bucket.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateCount {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of files at this rate.
    pub count: usize,
}

/// A file not at the target rate.
#[derive(Debug, Clone, Serialize)]
pub struct Mismatch {
    /// File path.
    pub path: PathBuf,
    /// Its sample rate.
    pub sample_rate: u32,
}

/// A file whose rate could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct Unreadable {
    /// File path.
    pub path: PathBuf,
    /// Combined failure reason.
    pub reason: String,
}

impl AuditReport {
    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::ReportSerialize { source: e })
    }

    /// True when at least one file was read and all of them are at the
    /// target rate.
    pub fn is_uniform(&self) -> bool {
        self.total_files > 0 && self.mismatches.is_empty()
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total audio files: {}", self.total_files)?;
        for bucket in &self.rates {
            writeln!(f, "SR {}: {}", bucket.sample_rate, bucket.count)?;
        }

        if self.total_files == 0 {
            writeln!(f, "\nNo readable audio files.")?;
        } else if self.mismatches.is_empty() {
            writeln!(f, "\nAll files at {} Hz.", self.target_rate)?;
        } else {
            writeln!(
                f,
                "\nFiles not at {} Hz (first {}):",
                self.target_rate,
                self.mismatches.len()
            )?;
            for m in &self.mismatches {
                writeln!(f, "{} -> {}", m.path.display(), m.sample_rate)?;
            }
            if self.remaining_mismatches > 0 {
                writeln!(f, "... and {} more files", self.remaining_mismatches)?;
            }
        }

        if !self.unreadable.is_empty() {
            writeln!(f, "\nUnreadable files: {}", self.unreadable.len())?;
            for u in &self.unreadable {
                writeln!(f, "{}: {}", u.path.display(), u.reason)?;
            }
        }

        Ok(())
    }
}
