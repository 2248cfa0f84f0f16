//! Corpusprep - speech corpus normalization for TTS training.
//!
//! Audits and resamples an audio tree to a uniform rate, turns a raw
//! transcript of unknown shape into canonical `identifier|text` metadata
//! with a reproducible train/validation split, and repairs audio
//! references when the corpus is loaded.

#![warn(missing_docs)]

pub mod audio;
pub mod audit;
pub mod cli;
pub mod config;
pub mod constants;
pub mod convert;
pub mod error;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod reconcile;
pub mod split;

use clap::Parser;
use cli::{AuditArgs, Cli, Command, ConvertArgs, GlobalArgs, PrepareArgs, ReconcileArgs};
use config::{Config, config_file_path, load_default_config, save_config};
use convert::ConvertOptions;
use rand::SeedableRng;
use rand::rngs::StdRng;
use split::SplitPolicy;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the corpusprep CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet);

    let config = match &cli.command {
        Command::Config {
            action: cli::ConfigAction::Init,
        } => Config::default(),
        _ => load_default_config(cli.global.config.as_deref())?,
    };

    match cli.command {
        Command::Audit(args) => handle_audit(&args, &config),
        Command::Convert(args) => handle_convert(&args, &cli.global, &config),
        Command::Prepare(args) => handle_prepare(&args, &config),
        Command::Reconcile(args) => handle_reconcile(&args, &config),
        Command::Config { action } => {
            handle_config_command(action, cli.global.config.as_deref(), &config)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn require_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        })
    }
}

fn handle_audit(args: &AuditArgs, config: &Config) -> Result<()> {
    require_exists(&args.root)?;
    let target_rate = args.sr.unwrap_or(config.audio.target_sample_rate);

    let histogram = audit::audit_sample_rates(&args.root, target_rate)?;
    let report = histogram.report(&args.root, config.audit.mismatch_display_limit);

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }

    Ok(())
}

fn handle_convert(args: &ConvertArgs, global: &GlobalArgs, config: &Config) -> Result<()> {
    require_exists(&args.src)?;

    let mut options = ConvertOptions::from_config(config);
    if let Some(sr) = args.sr {
        options.target_rate = sr;
    }
    if let Some(method) = args.method {
        options.method = method;
    }
    if let Some(policy) = args.error_policy() {
        options.on_error = policy;
    }
    options.show_progress = !global.quiet && !global.no_progress;

    let summary = convert::convert_corpus(&args.src, &args.dst, &options)?;

    println!(
        "\nTotal: {}, converted: {}, unchanged: {}, failed: {}.",
        summary.total,
        summary.converted,
        summary.unchanged,
        summary.failed.len()
    );
    for (path, reason) in &summary.failed {
        println!("  {}: {reason}", path.display());
    }
    println!("Output: {}", summary.output_root.display());

    Ok(())
}

fn handle_prepare(args: &PrepareArgs, config: &Config) -> Result<()> {
    require_exists(&args.input)?;

    let mut names = config.split.clone();
    if let Some(name) = &args.combined_name {
        names.combined_file.clone_from(name);
    }
    let mut policy = SplitPolicy::from_config(&config.split);
    if let Some(fraction) = args.val_fraction {
        policy.val_fraction = fraction;
    }
    if let Some(min_val) = args.min_val {
        policy.min_val_size = min_val;
    }

    let report = metadata::ingest_file(&args.input)?;
    println!(
        "Records after filtering: {} ({} dropped)",
        report.records.len(),
        report.dropped
    );
    if report.schema.confidence < 0.5 {
        warn!("Low-confidence transcript layout: {}", report.schema);
    }

    let mut rng = match args.seed.or(config.split.seed) {
        Some(seed) => {
            info!("Shuffling with seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let corpus = split::split_corpus(report.records, &policy, &mut rng);

    let out_dir = args.out_dir.clone().unwrap_or_else(|| {
        args.input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    });
    let files = split::write_split(&corpus, &out_dir, &names)?;

    println!(
        "Train: {}, validation: {}",
        corpus.train.len(),
        corpus.validation.len()
    );
    println!("Written:");
    println!(" - {}", files.combined.display());
    println!(" - {}", files.train.display());
    println!(" - {}", files.validation.display());

    Ok(())
}

fn handle_reconcile(args: &ReconcileArgs, config: &Config) -> Result<()> {
    require_exists(&args.root)?;

    let metadata_files = if args.metadata.is_empty() {
        vec![
            args.root.join(&config.split.train_file),
            args.root.join(&config.split.val_file),
        ]
    } else {
        args.metadata.clone()
    };
    let audio_subdir = args
        .audio_subdir
        .as_deref()
        .unwrap_or(&config.reconcile.audio_subdir);
    let audio_dir = args.root.join(audio_subdir);
    let limit = config.audit.mismatch_display_limit;

    for path in &metadata_files {
        let mut file = metadata::read_canonical(path)?;
        if file.skipped > 0 {
            warn!("{}: skipped {} line(s) without '|'", path.display(), file.skipped);
        }

        reconcile::attach_audio_dir(&mut file.records, &audio_dir);
        let report = reconcile::reconcile_paths(&mut file.records, &args.root);

        println!(
            "{}: checked={} repaired={} unresolved={}",
            path.display(),
            report.checked,
            report.repaired,
            report.unresolved.len()
        );
        for id in report.unresolved.iter().take(limit) {
            println!("  {id}");
        }
        if report.unresolved.len() > limit {
            println!("  ... and {} more", report.unresolved.len() - limit);
        }
    }

    Ok(())
}

fn handle_config_command(
    action: cli::ConfigAction,
    explicit: Option<&Path>,
    config: &Config,
) -> Result<()> {
    use cli::ConfigAction;

    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
        }
        ConfigAction::Show => println!("{config:#?}"),
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}
