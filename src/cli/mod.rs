//! CLI argument parsing.

mod args;
mod validators;

pub use args::{
    AuditArgs, Cli, Command, ConfigAction, ConvertArgs, GlobalArgs, PrepareArgs, ReconcileArgs,
};
pub use validators::{parse_fraction, parse_sample_rate};
