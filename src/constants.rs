//! Application-wide constants.
//!
//! Defaults here mirror the layout the downstream training job expects, so
//! changing one usually means changing that job's dataset config too.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "corpusprep";

/// Default target sample rate in Hz.
pub const DEFAULT_TARGET_SAMPLE_RATE: u32 = 22050;

/// Default output PCM bit depth.
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;

/// Bit depths accepted for integer PCM output.
pub const SUPPORTED_BIT_DEPTHS: &[u16] = &[16, 24, 32];

/// Default source directory for `audit` and `convert`.
pub const DEFAULT_SOURCE_DIR: &str = "data";

/// Default destination directory for `convert`.
pub const DEFAULT_DEST_DIR: &str = "data_22050";

/// Audio file extensions picked up when walking a corpus tree.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac"];

/// Extension of every file written by `convert`.
pub const OUTPUT_EXTENSION: &str = "wav";

/// Conversion progress is logged every this many files.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 500;

/// Number of mismatching files listed in an audit report.
pub const DEFAULT_MISMATCH_DISPLAY_LIMIT: usize = 20;

/// Corpus split defaults.
pub mod split {
    /// Fraction of the corpus reserved for validation.
    pub const VAL_FRACTION: f64 = 0.05;

    /// Lower bound on validation set size (capped by corpus size).
    pub const MIN_VAL_SIZE: usize = 500;

    /// Combined shuffled metadata filename.
    pub const COMBINED_FILE: &str = "ruslan_meta.txt";

    /// Training metadata filename.
    pub const TRAIN_FILE: &str = "metadata_train.txt";

    /// Validation metadata filename.
    pub const VAL_FILE: &str = "metadata_val.txt";
}

/// Metadata ingestion constants.
pub mod metadata {
    /// Candidate delimiters in preference order (earlier wins ties).
    pub const DELIMITER_CANDIDATES: &[char] = &['\t', ';', '|', ','];

    /// Delimiter used when no candidate occurs in the first line.
    pub const FALLBACK_DELIMITER: char = '|';

    /// Keywords marking a first line as a header.
    pub const HEADER_KEYWORDS: &[&str] = &["file", "id", "text", "transcript", "sentence"];

    /// Exact identifier column name.
    pub const ID_COLUMN: &str = "file_id";

    /// Substrings identifying an identifier column.
    pub const ID_KEYWORDS: &[&str] = &["file", "id"];

    /// Exact text column name.
    pub const TEXT_COLUMN: &str = "text";

    /// Substrings identifying a text column.
    pub const TEXT_KEYWORDS: &[&str] = &["text", "transcript", "sentence"];

    /// Minimum transcript length in characters after trimming.
    pub const MIN_TEXT_CHARS: usize = 3;

    /// Audio suffix stripped from identifiers.
    pub const WAV_SUFFIX: &str = ".wav";

    /// Canonical metadata field delimiter.
    pub const CANONICAL_DELIMITER: char = '|';
}

/// Default directory (under the dataset root) holding utterance audio.
///
/// The `ruslan` dataset formatter of the training job resolves
/// `<root>/RUSLAN/<id>.wav`.
pub const DEFAULT_AUDIO_SUBDIR: &str = "RUSLAN";

/// Polyphase resampler filter design.
pub mod polyphase {
    /// Filter half-length in multiples of `max(up, down)`.
    pub const HALF_LEN_FACTOR: usize = 10;

    /// Kaiser window shape parameter.
    pub const KAISER_BETA: f64 = 5.0;
}

/// FFT resampler chunk size.
pub const FFT_CHUNK_SIZE: usize = 1024;
