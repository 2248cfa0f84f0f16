//! Best-effort repair of broken audio references.
//!
//! A reference that exists as given is left alone. Otherwise
//! `root/<file name>` and then `root/<reference>` are probed and the first
//! existing candidate replaces it. Records that cannot be repaired keep
//! their original reference and are listed in the report.

use crate::metadata::UtteranceRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Records that carried an audio reference.
    pub checked: usize,
    /// References that were rewritten.
    pub repaired: usize,
    /// Identifiers whose reference still does not resolve.
    pub unresolved: Vec<String>,
}

impl ReconcileReport {
    /// True when every checked reference now resolves.
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Point every record at `audio_dir/<id>.wav`.
pub fn attach_audio_dir(records: &mut [UtteranceRecord], audio_dir: &Path) {
    for record in records {
        record.audio = Some(audio_dir.join(format!("{}.wav", record.id)));
    }
}

/// Candidate locations for a broken reference, in probe order.
fn candidates(reference: &Path, root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::with_capacity(2);
    if let Some(name) = reference.file_name() {
        out.push(root.join(name));
    }
    out.push(root.join(reference));
    out
}

/// Validate and repair audio references against `root`.
pub fn reconcile_paths(records: &mut [UtteranceRecord], root: &Path) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for record in records.iter_mut() {
        let Some(reference) = record.audio.as_ref().filter(|p| !p.as_os_str().is_empty()) else {
            continue;
        };
        report.checked += 1;

        if reference.exists() {
            continue;
        }

        match candidates(reference, root).into_iter().find(|c| c.exists()) {
            Some(found) => {
                debug!(
                    "{}: {} -> {}",
                    record.id,
                    reference.display(),
                    found.display()
                );
                record.audio = Some(found);
                report.repaired += 1;
            }
            None => {
                debug!("{}: no candidate for {}", record.id, reference.display());
                report.unresolved.push(record.id.clone());
            }
        }
    }

    if !report.unresolved.is_empty() {
        warn!(
            "{} of {} audio reference(s) could not be resolved under {}",
            report.unresolved.len(),
            report.checked,
            root.display()
        );
    }

    report
}
