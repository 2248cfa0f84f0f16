//! Configuration type definitions.

use crate::constants::{
    DEFAULT_AUDIO_SUBDIR, DEFAULT_BITS_PER_SAMPLE, DEFAULT_MISMATCH_DISPLAY_LIMIT,
    DEFAULT_PROGRESS_INTERVAL, DEFAULT_TARGET_SAMPLE_RATE, split,
};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output audio settings.
    pub audio: AudioConfig,

    /// Corpus conversion settings.
    pub convert: ConvertConfig,

    /// Train/validation split settings.
    pub split: SplitConfig,

    /// Sample-rate audit settings.
    pub audit: AuditConfig,

    /// Audio reference reconciliation settings.
    pub reconcile: ReconcileConfig,
}

/// Output audio settings shared by audit and conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sample rate every converted file ends up at.
    pub target_sample_rate: u32,

    /// Integer PCM bit depth for written files.
    pub bits_per_sample: u16,

    /// Resampling algorithm.
    pub resample_method: ResampleMethod,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: DEFAULT_TARGET_SAMPLE_RATE,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
            resample_method: ResampleMethod::default(),
        }
    }
}

/// Corpus conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Log a progress line every N files.
    pub progress_interval: usize,

    /// What to do when a single file fails.
    pub on_error: ErrorPolicy,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            on_error: ErrorPolicy::default(),
        }
    }
}

/// Train/validation split settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of records reserved for validation.
    pub val_fraction: f64,

    /// Minimum validation size, capped by the corpus size.
    pub min_val_size: usize,

    /// Shuffle seed. `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Combined shuffled metadata filename.
    pub combined_file: String,

    /// Training metadata filename.
    pub train_file: String,

    /// Validation metadata filename.
    pub val_file: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            val_fraction: split::VAL_FRACTION,
            min_val_size: split::MIN_VAL_SIZE,
            seed: None,
            combined_file: split::COMBINED_FILE.to_string(),
            train_file: split::TRAIN_FILE.to_string(),
            val_file: split::VAL_FILE.to_string(),
        }
    }
}

/// Sample-rate audit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Mismatching files listed before truncating.
    pub mismatch_display_limit: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            mismatch_display_limit: DEFAULT_MISMATCH_DISPLAY_LIMIT,
        }
    }
}

/// Audio reference reconciliation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Directory under the dataset root where `<id>.wav` files live.
    pub audio_subdir: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            audio_subdir: DEFAULT_AUDIO_SUBDIR.to_string(),
        }
    }
}

/// Resampling algorithm.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ResampleMethod {
    /// Rational polyphase FIR filtering (up/down in lowest terms).
    #[default]
    Polyphase,
    /// FFT-based synchronous resampling via rubato.
    Fft,
}

impl std::fmt::Display for ResampleMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Polyphase => write!(f, "polyphase"),
            Self::Fft => write!(f, "fft"),
        }
    }
}

/// Per-file failure policy during conversion.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop the batch at the first failing file.
    #[default]
    FailFast,
    /// Record the failure and continue with the next file.
    KeepGoing,
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FailFast => write!(f, "fail-fast"),
            Self::KeepGoing => write!(f, "keep-going"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.audio.target_sample_rate, 22050);
        assert_eq!(config.audio.bits_per_sample, 16);
        assert_eq!(config.audio.resample_method, ResampleMethod::Polyphase);
        assert_eq!(config.convert.progress_interval, 500);
        assert_eq!(config.convert.on_error, ErrorPolicy::FailFast);
        assert_eq!(config.split.val_fraction, 0.05);
        assert_eq!(config.split.min_val_size, 500);
        assert!(config.split.seed.is_none());
        assert_eq!(config.audit.mismatch_display_limit, 20);
        assert_eq!(config.reconcile.audio_subdir, "RUSLAN");
    }

    #[test]
    fn test_error_policy_kebab_case() {
        let config: ConvertConfig = toml::from_str("on_error = \"keep-going\"").unwrap_or_default();
        assert_eq!(config.on_error, ErrorPolicy::KeepGoing);
    }

    #[test]
    fn test_display() {
        assert_eq!(ResampleMethod::Fft.to_string(), "fft");
        assert_eq!(ErrorPolicy::KeepGoing.to_string(), "keep-going");
    }
}
