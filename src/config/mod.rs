//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config_file, load_default_config, save_config};
pub use paths::{CONFIG_ENV, config_dir, config_file_path};
pub use types::{
    AudioConfig, AuditConfig, Config, ConvertConfig, ErrorPolicy, ReconcileConfig,
    ResampleMethod, SplitConfig,
};
pub use validate::validate_config;
