//! CLI argument definitions.

use crate::cli::validators::{parse_fraction, parse_sample_rate};
use crate::config::{ErrorPolicy, ResampleMethod};
use crate::constants::{DEFAULT_DEST_DIR, DEFAULT_SOURCE_DIR};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Prepare a raw speech corpus for TTS training.
#[derive(Debug, Parser)]
#[command(name = "corpusprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by all subcommands.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by all subcommands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Suppress progress output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable the progress bar.
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Use this config file instead of the per-user one.
    #[arg(long, global = true, env = "CORPUSPREP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report the sample-rate distribution of an audio tree.
    Audit(AuditArgs),
    /// Resample an audio tree into a mirrored output tree.
    Convert(ConvertArgs),
    /// Parse a raw transcript and write train/validation metadata.
    Prepare(PrepareArgs),
    /// Check audio references in canonical metadata files.
    Reconcile(ReconcileArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for `audit`.
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Root directory to scan.
    #[arg(default_value = DEFAULT_SOURCE_DIR)]
    pub root: PathBuf,

    /// Expected sample rate (default: from config).
    #[arg(long, value_parser = parse_sample_rate, env = "CORPUSPREP_SR")]
    pub sr: Option<u32>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `convert`.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Directory with source audio.
    #[arg(long, default_value = DEFAULT_SOURCE_DIR)]
    pub src: PathBuf,

    /// Directory for resampled output.
    #[arg(long, default_value = DEFAULT_DEST_DIR)]
    pub dst: PathBuf,

    /// Target sample rate (default: from config).
    #[arg(long, value_parser = parse_sample_rate, env = "CORPUSPREP_SR")]
    pub sr: Option<u32>,

    /// Resampling algorithm.
    #[arg(long, value_enum)]
    pub method: Option<ResampleMethod>,

    /// Stop at the first file that fails.
    #[arg(long, conflicts_with = "keep_going")]
    pub fail_fast: bool,

    /// Record failing files and continue.
    #[arg(long, conflicts_with = "fail_fast")]
    pub keep_going: bool,
}

impl ConvertArgs {
    /// Error policy requested on the command line, if any.
    pub fn error_policy(&self) -> Option<ErrorPolicy> {
        if self.keep_going {
            Some(ErrorPolicy::KeepGoing)
        } else if self.fail_fast {
            Some(ErrorPolicy::FailFast)
        } else {
            None
        }
    }
}

/// Arguments for `prepare`.
#[derive(Debug, Args)]
pub struct PrepareArgs {
    /// Raw transcript file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory (default: the transcript's directory).
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Shuffle seed (default: from config, else random).
    #[arg(long, env = "CORPUSPREP_SEED")]
    pub seed: Option<u64>,

    /// Fraction of records used for validation.
    #[arg(long, value_parser = parse_fraction)]
    pub val_fraction: Option<f64>,

    /// Minimum validation set size.
    #[arg(long)]
    pub min_val: Option<usize>,

    /// Name of the combined metadata file.
    #[arg(long)]
    pub combined_name: Option<String>,
}

/// Arguments for `reconcile`.
#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Dataset root.
    #[arg(long)]
    pub root: PathBuf,

    /// Canonical metadata files (default: train and val files under root).
    #[arg(short, long)]
    pub metadata: Vec<PathBuf>,

    /// Audio directory under root (default: from config).
    #[arg(long)]
    pub audio_subdir: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_defaults() {
        let cli = Cli::try_parse_from(["corpusprep", "convert"]).unwrap();
        match cli.command {
            Command::Convert(args) => {
                assert_eq!(args.src, PathBuf::from("data"));
                assert_eq!(args.dst, PathBuf::from("data_22050"));
                assert!(args.method.is_none());
                assert!(args.error_policy().is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_convert_flags() {
        let cli = Cli::try_parse_from([
            "corpusprep",
            "convert",
            "--src",
            "raw",
            "--sr",
            "16000",
            "--method",
            "fft",
            "--keep-going",
        ])
        .unwrap();
        match cli.command {
            Command::Convert(args) => {
                assert_eq!(args.sr, Some(16000));
                assert_eq!(args.method, Some(ResampleMethod::Fft));
                assert_eq!(args.error_policy(), Some(ErrorPolicy::KeepGoing));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_convert_policy_conflict() {
        let result =
            Cli::try_parse_from(["corpusprep", "convert", "--fail-fast", "--keep-going"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_audit_default_root() {
        let cli = Cli::try_parse_from(["corpusprep", "audit"]).unwrap();
        match cli.command {
            Command::Audit(args) => assert_eq!(args.root, PathBuf::from("data")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["corpusprep", "audit", "corpus", "-vv"]).unwrap();
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn test_rejects_zero_rate() {
        assert!(Cli::try_parse_from(["corpusprep", "convert", "--sr", "0"]).is_err());
    }
}
