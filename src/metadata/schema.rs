//! Transcript shape detection.
//!
//! Detection looks only at the first line and produces a declared
//! [`TranscriptSchema`]; row extraction never re-inspects column names.

use crate::constants::metadata::{
    DELIMITER_CANDIDATES, FALLBACK_DELIMITER, HEADER_KEYWORDS, ID_COLUMN, ID_KEYWORDS,
    TEXT_COLUMN, TEXT_KEYWORDS,
};
use serde::Serialize;
use std::fmt;

/// Which header columns hold the identifier and the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    /// Header names in file order.
    pub columns: Vec<String>,
    /// Index of the identifier column, if one was recognised.
    pub id_column: Option<usize>,
    /// Index of the transcript column, if one was recognised.
    pub text_column: Option<usize>,
}

impl ColumnMapping {
    /// Resolve the identifier and text columns from header names.
    pub fn from_header(columns: Vec<String>) -> Self {
        let id_column = find_column(&columns, ID_COLUMN, ID_KEYWORDS);
        let text_column = find_column(&columns, TEXT_COLUMN, TEXT_KEYWORDS);
        Self {
            columns,
            id_column,
            text_column,
        }
    }

    /// Both columns were found.
    pub fn is_complete(&self) -> bool {
        self.id_column.is_some() && self.text_column.is_some()
    }

    fn exact_matches(&self) -> usize {
        let exact = |idx: Option<usize>, key: &str| {
            idx.and_then(|i| self.columns.get(i))
                .is_some_and(|name| name == key)
        };
        usize::from(exact(self.id_column, ID_COLUMN)) + usize::from(exact(self.text_column, TEXT_COLUMN))
    }
}

/// Exact name first, then first column (in order) containing any keyword.
fn find_column(columns: &[String], exact: &str, keywords: &[&str]) -> Option<usize> {
    columns.iter().position(|c| c == exact).or_else(|| {
        columns.iter().position(|c| {
            let lower = c.to_lowercase();
            keywords.iter().any(|k| lower.contains(k))
        })
    })
}

/// Row layout of a transcript file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Layout {
    /// First line names the columns.
    Header(ColumnMapping),
    /// Every line is `identifier<delim>text`.
    Headerless,
}

/// Detected delimiter and layout, with a confidence score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptSchema {
    /// Field delimiter.
    pub delimiter: char,
    /// Row layout.
    pub layout: Layout,
    /// How sure detection is.
    ///
    /// Header layouts score 1.0 with both exact column names, 0.75 with
    /// both columns found by keyword, 0.25 with one, 0.0 with none.
    /// Headerless layouts score 0.75 when the delimiter occurs in the first
    /// line and 0.25 when it is the fallback.
    pub confidence: f32,
}

impl TranscriptSchema {
    /// True for header-bearing transcripts.
    pub fn has_header(&self) -> bool {
        matches!(self.layout, Layout::Header(_))
    }
}

impl fmt::Display for TranscriptSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delim = match self.delimiter {
            '\t' => "tab".to_string(),
            other => format!("'{other}'"),
        };
        match &self.layout {
            Layout::Header(mapping) => {
                let name = |idx: Option<usize>| {
                    idx.and_then(|i| mapping.columns.get(i))
                        .map_or("<none>", String::as_str)
                };
                write!(
                    f,
                    "header, delimiter {delim}, id column {}, text column {}, confidence {:.2}",
                    name(mapping.id_column),
                    name(mapping.text_column),
                    self.confidence
                )
            }
            Layout::Headerless => write!(
                f,
                "headerless, delimiter {delim}, confidence {:.2}",
                self.confidence
            ),
        }
    }
}

/// Pick the most frequent candidate delimiter in `line`.
///
/// Ties go to the earlier candidate (tab, semicolon, pipe, comma). If no
/// candidate occurs, returns the pipe.
pub fn detect_delimiter(line: &str) -> char {
    let mut best = FALLBACK_DELIMITER;
    let mut best_count = 0;
    for &candidate in DELIMITER_CANDIDATES {
        let count = line.matches(candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// Whether any token, lowercased, contains a header keyword.
pub fn is_header(line: &str, delimiter: char) -> bool {
    line.split(delimiter).any(|token| {
        let lower = token.trim().to_lowercase();
        HEADER_KEYWORDS.iter().any(|k| lower.contains(k))
    })
}

/// Header names tokenised the way the csv reader will tokenise data rows,
/// so quoted names containing the delimiter stay one column.
fn header_columns(line: &str, delimiter: char) -> Vec<String> {
    let parsed = u8::try_from(delimiter).ok().and_then(|byte| {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(byte)
            .from_reader(line.as_bytes())
            .records()
            .next()
            .and_then(std::result::Result::ok)
    });

    match parsed {
        Some(record) => record.iter().map(|c| c.trim().to_string()).collect(),
        None => line
            .split(delimiter)
            .map(|c| c.trim().to_string())
            .collect(),
    }
}

/// Detect the schema of a transcript from its first line.
pub fn detect_schema(first_line: &str) -> TranscriptSchema {
    let first_line = first_line.trim_end_matches(['\r', '\n']);
    let delimiter = detect_delimiter(first_line);

    if is_header(first_line, delimiter) {
        let columns = header_columns(first_line, delimiter);
        let mapping = ColumnMapping::from_header(columns);
        let confidence = match (mapping.is_complete(), mapping.exact_matches()) {
            (true, 2) => 1.0,
            (true, _) => 0.75,
            (false, _) if mapping.id_column.is_some() || mapping.text_column.is_some() => 0.25,
            _ => 0.0,
        };
        TranscriptSchema {
            delimiter,
            layout: Layout::Header(mapping),
            confidence,
        }
    } else {
        let confidence = if first_line.contains(delimiter) {
            0.75
        } else {
            0.25
        };
        TranscriptSchema {
            delimiter,
            layout: Layout::Headerless,
            confidence,
        }
    }
}
