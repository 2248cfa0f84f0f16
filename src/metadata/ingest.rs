//! Raw transcript ingestion.

use crate::constants::metadata::{MIN_TEXT_CHARS, WAV_SUFFIX};
use crate::error::{Error, Result};
use crate::metadata::schema::{ColumnMapping, Layout, TranscriptSchema, detect_schema};
use crate::metadata::UtteranceRecord;
use std::path::Path;
use tracing::{debug, info};

/// Records extracted from a transcript plus diagnostics.
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Surviving records in encounter order.
    pub records: Vec<UtteranceRecord>,
    /// Rows skipped as malformed or too short.
    pub dropped: usize,
    /// Schema the rows were read with.
    pub schema: TranscriptSchema,
}

/// Read and parse a transcript file.
///
/// An empty file is a fatal error; malformed rows are skipped and counted.
pub fn ingest_file(path: &Path) -> Result<IngestReport> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::TranscriptRead {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let report = ingest_str(&content).ok_or_else(|| Error::EmptyTranscript {
        path: path.to_path_buf(),
    })?;

    info!(
        "Read {} record(s) from {} ({} dropped; {})",
        report.records.len(),
        path.display(),
        report.dropped,
        report.schema
    );

    Ok(report)
}

/// Parse transcript text. Returns `None` for empty input.
pub fn ingest_str(content: &str) -> Option<IngestReport> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let first_line = content.lines().next()?;
    let schema = detect_schema(first_line);
    Some(extract_records(content, &schema))
}

/// Extract records using an already-detected schema.
pub fn extract_records(content: &str, schema: &TranscriptSchema) -> IngestReport {
    let (records, dropped) = match &schema.layout {
        Layout::Header(mapping) => extract_table(content, schema.delimiter, mapping),
        Layout::Headerless => extract_lines(content, schema.delimiter),
    };

    IngestReport {
        records,
        dropped,
        schema: schema.clone(),
    }
}

fn extract_table(
    content: &str,
    delimiter: char,
    mapping: &ColumnMapping,
) -> (Vec<UtteranceRecord>, usize) {
    let mut records = Vec::new();
    let mut dropped = 0;

    let (Some(id_col), Some(text_col)) = (mapping.id_column, mapping.text_column) else {
        // Without both columns every data row is unusable
        let rows = content.lines().skip(1).filter(|l| !l.trim().is_empty()).count();
        debug!("Header lacks an id or text column; dropping {rows} row(s)");
        return (records, rows);
    };

    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    if let Ok(byte) = u8::try_from(delimiter) {
        builder.delimiter(byte);
    }
    let mut reader = builder.from_reader(content.as_bytes());

    for (row, result) in reader.records().enumerate() {
        let line = row + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!("line {line}: {e}");
                dropped += 1;
                continue;
            }
        };

        match (record.get(id_col), record.get(text_col)) {
            (Some(id), Some(text)) => match normalize(id, text) {
                Some(r) => records.push(r),
                None => {
                    debug!("line {line}: empty id or text shorter than {MIN_TEXT_CHARS}");
                    dropped += 1;
                }
            },
            _ => {
                debug!("line {line}: missing id or text field");
                dropped += 1;
            }
        }
    }

    (records, dropped)
}

fn extract_lines(content: &str, delimiter: char) -> (Vec<UtteranceRecord>, usize) {
    let mut records = Vec::new();
    let mut dropped = 0;

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let parts = line.split_once(delimiter).or_else(|| split_whitespace_once(line));
        match parts.and_then(|(id, text)| normalize(id, text)) {
            Some(r) => records.push(r),
            None => {
                debug!("line {}: unparseable or too short", idx + 1);
                dropped += 1;
            }
        }
    }

    (records, dropped)
}

/// Split on the first run of whitespace after the leading token.
fn split_whitespace_once(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    let idx = line.find(char::is_whitespace)?;
    let (head, tail) = line.split_at(idx);
    let tail = tail.trim_start();
    if tail.is_empty() {
        None
    } else {
        Some((head, tail))
    }
}

/// Trim both fields, strip a trailing `.wav` from the identifier, and
/// reject empty identifiers or transcripts shorter than three characters.
pub fn normalize(id: &str, text: &str) -> Option<UtteranceRecord> {
    let id = id.trim();
    let id = id.strip_suffix(WAV_SUFFIX).unwrap_or(id).trim_end();
    let text = text.trim();

    if id.is_empty() || text.chars().count() < MIN_TEXT_CHARS {
        return None;
    }

    Some(UtteranceRecord::new(id, text))
}
