//! CLI argument definitions.

use crate::cli::validators::{parse_positive_count, parse_positive_float};
use crate::pipeline::DetectionSource;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Shrimp click detection and activity comparison for field recordings.
#[derive(Debug, Parser)]
#[command(name = "clicktally")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "CLICKTALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root of the detection metadata tree (overrides config).
    #[arg(long, global = true, env = "CLICKTALLY_METADATA_ROOT")]
    pub metadata_root: Option<PathBuf>,

    /// Only log warnings and errors; no progress output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable progress bars.
    #[arg(long, global = true)]
    pub no_progress: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Detect clicks in every `<trial>/*.wav` of an experiment.
    Detect {
        /// Experiment directory containing one folder per trial.
        experiment: PathBuf,

        /// Worker threads (default: one per CPU core).
        #[arg(short, long, value_parser = parse_positive_count, env = "CLICKTALLY_JOBS")]
        jobs: Option<usize>,
    },
    /// Count events per time window for a detection source.
    Aggregate {
        /// Detection source to aggregate.
        #[arg(value_enum)]
        source: DetectionSource,

        /// Window size in seconds (overrides config).
        #[arg(long, value_parser = parse_positive_float)]
        window_size: Option<f64>,
    },
    /// Concatenate each trial's segments into one continuous timeline.
    Join {
        /// Detection source to join.
        #[arg(value_enum)]
        source: DetectionSource,

        /// Window size in seconds (overrides config).
        #[arg(long, value_parser = parse_positive_float)]
        window_size: Option<f64>,
    },
    /// Pair reference and model timelines into comparison tables.
    Compare {
        /// Taps of the moving-average filter (overrides config).
        #[arg(long, value_parser = parse_positive_count)]
        smoothing_window: Option<usize>,
    },
    /// Run detect, aggregate, join and compare in sequence.
    Run {
        /// Experiment directory containing one folder per trial.
        experiment: PathBuf,

        /// Worker threads for detection (default: one per CPU core).
        #[arg(short, long, value_parser = parse_positive_count, env = "CLICKTALLY_JOBS")]
        jobs: Option<usize>,
    },
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
