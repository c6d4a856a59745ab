//! traj-ingest - Convert .plt trajectory logs into newline-delimited JSON
//!
//! Walks a dataset directory and writes one JSON record per trajectory file.

use anyhow::Context;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use traj_ingest::app::cli::{Cli, Commands, ConfigAction};
use traj_ingest::app::config::Config;
use traj_ingest::app::run_conversion;

fn main() -> anyhow::Result<ExitCode> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Logs go to stderr; stdout carries only the run summary
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = if let Some(path) = &cli.config {
        Config::load(path).with_context(|| format!("failed to load config {}", path.display()))?
    } else {
        Config::load_default()?
    };
    cli.apply_overrides(&mut config);

    match &cli.command {
        Some(Commands::Config { action }) => {
            run_config(action, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        None => run_convert(&config),
    }
}

fn run_convert(config: &Config) -> anyhow::Result<ExitCode> {
    info!("Converting trajectories under {}", config.input.root.display());

    let summary = run_conversion(config)
        .with_context(|| format!("failed to convert into {}", config.output.path.display()))?;

    let report = &summary.report;
    println!("Conversion finished");
    println!("  Files matched: {}", report.files_matched);
    println!("  Trajectories: {}", summary.sink.written);
    println!("  Points: {}", report.points_emitted);
    if report.rows_skipped > 0 {
        println!("  Rows skipped: {}", report.rows_skipped);
    }
    if summary.sink.dropped > 0 {
        println!("  Records dropped: {}", summary.sink.dropped);
    }
    println!("  Output: {}", summary.output.display());

    if !report.is_clean() {
        println!("  Failures: {}", report.failure_count());
        for failure in &report.failures {
            println!("    - {}", failure);
        }
    }

    if summary.should_fail(config.output.strict) {
        warn!("{} files could not be converted", report.failure_count());
        return Ok(ExitCode::from(2));
    }

    Ok(ExitCode::SUCCESS)
}

fn run_config(action: &ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("Configuration ({}):\n", Config::default_path().display());
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            Config::default().save(&config_path)?;
            println!("Created config at {}", config_path.display());
        }
    }

    Ok(())
}
