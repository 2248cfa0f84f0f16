//! Reading and writing the TOML config file.

use crate::config::{Config, validate_config};
use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Parse and validate a config file. A missing file yields defaults.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(Error::ConfigRead {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let config: Config = toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate_config(&config)?;

    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load the config from an explicit path, or from the default location.
///
/// An explicit path must exist; the default location may be absent.
pub fn load_default_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(Error::ConfigRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }
        return load_config_file(path);
    }

    match super::config_file_path() {
        Ok(path) => load_config_file(&path),
        Err(_) => Ok(Config::default()),
    }
}

/// Write `config` as pretty TOML, creating parent directories.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let write_err = |e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;
    std::fs::write(path, contents).map_err(write_err)
}
