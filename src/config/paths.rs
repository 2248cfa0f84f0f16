//! Configuration file location.

use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CORPUSPREP_CONFIG";

/// Per-user configuration directory (`~/.config/corpusprep/` on Linux).
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Config file path: `$CORPUSPREP_CONFIG` if set, else `<config_dir>/config.toml`.
pub fn config_file_path() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(config_dir()?.join("config.toml")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_names_app() {
        let path = config_dir().unwrap();
        assert!(path.to_string_lossy().contains(APP_NAME));
    }

    #[test]
    fn test_config_file_is_toml() {
        if std::env::var_os(CONFIG_ENV).is_some() {
            return;
        }
        let path = config_file_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "config.toml");
    }
}
