//! Clicktally - click detection and activity timelines for field recordings.
//!
//! The crate turns long recordings into per-trial click activity:
//! an onset detector writes event timestamps per audio file, events are
//! counted in fixed windows, segment timelines are stitched per trial, and
//! model timelines are paired with reference timelines for comparison.

#![warn(missing_docs)]

pub mod aggregation;
pub mod audio;
pub mod cli;
pub mod compare;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod output;
pub mod pipeline;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, GlobalArgs};
use config::{Config, load_runtime_config, resolve_config_path, save_config};
use pipeline::{
    DetectOptions, DetectionSource, aggregate_source, compare_sources, detect_experiment,
    join_source, run_pipeline,
};
use std::path::Path;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the clicktally CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet);

    if let Command::Config { action } = cli.command {
        return handle_config_command(action, cli.global.config.as_deref());
    }

    let mut config = load_runtime_config(cli.global.config.as_deref());
    if let Some(root) = &cli.global.metadata_root {
        config.paths.metadata_root.clone_from(root);
    }

    handle_command(cli.command, &cli.global, &config)
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

fn handle_command(command: Command, global: &GlobalArgs, config: &Config) -> Result<()> {
    let metadata_root = config.paths.metadata_root.as_path();
    let progress = !global.quiet && !global.no_progress;

    match command {
        Command::Detect { experiment, jobs } => {
            let options = DetectOptions {
                output_root: DetectionSource::Model.root(metadata_root),
                jobs,
                progress,
            };
            let summary = detect_experiment(&experiment, config, &options)?;
            info!(
                "Results saved to {}",
                options
                    .output_root
                    .join(experiment.file_name().unwrap_or_default())
                    .display()
            );
            if summary.processed == 0 {
                warn!("No file was processed successfully");
            }
            Ok(())
        }
        Command::Aggregate {
            source,
            window_size,
        } => {
            let window_size = window_size.unwrap_or(config.aggregation.window_size);
            aggregate_source(metadata_root, source, window_size).map(|_| ())
        }
        Command::Join {
            source,
            window_size,
        } => {
            let window_size = window_size.unwrap_or(config.aggregation.window_size);
            let summary = join_source(metadata_root, source, window_size)?;
            info!("Joined {} trial(s) for {source}", summary.trials);
            Ok(())
        }
        Command::Compare { smoothing_window } => {
            let taps = smoothing_window.unwrap_or(config.compare.smoothing_window);
            let summary = compare_sources(metadata_root, taps)?;
            info!(
                "Comparison complete: {} compared, {} unmatched, {} errors",
                summary.compared, summary.unmatched, summary.failed
            );
            Ok(())
        }
        Command::Run { experiment, jobs } => {
            let summary = run_pipeline(&experiment, config, jobs, progress)?;
            info!(
                "Pipeline complete: {} file(s) detected, {} event(s)",
                summary.detection.processed, summary.detection.total_events
            );
            Ok(())
        }
        Command::Config { action } => handle_config_command(action, global.config.as_deref()),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = resolve_config_path(explicit)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_runtime_config(explicit);
            let contents = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = resolve_config_path(explicit)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
