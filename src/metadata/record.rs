//! Normalized utterance record.

use std::path::{Path, PathBuf};

/// One training example: identifier, transcript and optional audio reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UtteranceRecord {
    /// Identifier without a `.wav` suffix. Never empty.
    pub id: String,
    /// Trimmed transcript.
    pub text: String,
    /// Audio file this utterance points at, if known.
    pub audio: Option<PathBuf>,
}

impl UtteranceRecord {
    /// Record without an audio reference.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            audio: None,
        }
    }

    /// Attach an audio reference.
    #[must_use]
    pub fn with_audio(mut self, audio: impl Into<PathBuf>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    /// Audio reference as a path, if set.
    pub fn audio_path(&self) -> Option<&Path> {
        self.audio.as_deref()
    }

    /// Canonical `identifier|text` line, without trailing newline.
    pub fn canonical_line(&self) -> String {
        format!("{}|{}", self.id, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_line() {
        let record = UtteranceRecord::new("0001", "Привет, мир");
        assert_eq!(record.canonical_line(), "0001|Привет, мир");
    }

    #[test]
    fn test_with_audio() {
        let record = UtteranceRecord::new("a", "abc").with_audio("wavs/a.wav");
        assert_eq!(record.audio_path(), Some(Path::new("wavs/a.wav")));
    }
}
