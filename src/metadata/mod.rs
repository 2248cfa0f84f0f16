//! Utterance metadata: raw transcript ingestion and the canonical
//! `identifier|text` format.

mod canonical;
mod ingest;
mod record;
mod schema;

pub use canonical::{CanonicalFile, read_canonical, write_canonical};
pub use ingest::{IngestReport, extract_records, ingest_file, ingest_str, normalize};
pub use record::UtteranceRecord;
pub use schema::{
    ColumnMapping, Layout, TranscriptSchema, detect_delimiter, detect_schema, is_header,
};
