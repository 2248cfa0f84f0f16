//! Canonical `identifier|text` metadata files.
//!
//! One record per line, no header, UTF-8. The pipe inside transcript text
//! is not escaped, so a reader splits on the first pipe only.

use crate::constants::metadata::CANONICAL_DELIMITER;
use crate::error::{Error, Result};
use crate::metadata::UtteranceRecord;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Records loaded from a canonical file.
#[derive(Debug, Clone, Default)]
pub struct CanonicalFile {
    /// Records in file order, without audio references.
    pub records: Vec<UtteranceRecord>,
    /// Non-blank lines that had no pipe.
    pub skipped: usize,
}

/// Write records as canonical metadata, creating parent directories.
pub fn write_canonical(path: &Path, records: &[UtteranceRecord]) -> Result<()> {
    let write_err = |e| Error::MetadataWrite {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(write_err)?);
    let mut piped = 0usize;
    for record in records {
        if record.text.contains(CANONICAL_DELIMITER) {
            piped += 1;
        }
        writeln!(writer, "{}", record.canonical_line()).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;

    if piped > 0 {
        warn!(
            "{piped} transcript(s) written to {} contain '{CANONICAL_DELIMITER}'",
            path.display()
        );
    }
    debug!("Wrote {} record(s) to {}", records.len(), path.display());

    Ok(())
}

/// Read a canonical metadata file.
pub fn read_canonical(path: &Path) -> Result<CanonicalFile> {
    let content = fs::read_to_string(path).map_err(|e| Error::MetadataRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut file = CanonicalFile::default();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match line.split_once(CANONICAL_DELIMITER) {
            Some((id, text)) => file.records.push(UtteranceRecord::new(id, text)),
            None => file.skipped += 1,
        }
    }

    Ok(file)
}
