//! Configuration validation.

use crate::config::Config;
use crate::constants::SUPPORTED_BIT_DEPTHS;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_audio(config)?;
    validate_split(config)?;

    if config.convert.progress_interval == 0 {
        return Err(Error::ConfigValidation {
            message: "progress_interval must be at least 1".to_string(),
        });
    }

    Ok(())
}

fn validate_audio(config: &Config) -> Result<()> {
    let audio = &config.audio;

    if audio.target_sample_rate == 0 {
        return Err(Error::InvalidSampleRate {
            value: audio.target_sample_rate,
        });
    }

    if !SUPPORTED_BIT_DEPTHS.contains(&audio.bits_per_sample) {
        return Err(Error::ConfigValidation {
            message: format!(
                "bits_per_sample must be one of {SUPPORTED_BIT_DEPTHS:?}, got {}",
                audio.bits_per_sample
            ),
        });
    }

    Ok(())
}

fn validate_split(config: &Config) -> Result<()> {
    let split = &config.split;

    if !(0.0..=1.0).contains(&split.val_fraction) {
        return Err(Error::ConfigValidation {
            message: format!(
                "val_fraction must be between 0.0 and 1.0, got {}",
                split.val_fraction
            ),
        });
    }

    for name in [&split.combined_file, &split.train_file, &split.val_file] {
        if name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "metadata filenames must not be empty".to_string(),
            });
        }
    }

    Ok(())
}
