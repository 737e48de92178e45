//! qrand CLI - Scrambled Halton Sampling from the Command Line
//!
//! Operational entry point for the qrand_core library.
//!
//! # Commands
//!
//! - `qrand sample --kind uniform --points 100` - Draw quasi-random points
//! - `qrand state --dimension 4 --seed 7 --advance 1000` - Print a checkpoint
//! - `qrand resume --state <TEXT> --points 100` - Continue from a checkpoint
//! - `qrand check` - Validate configuration
//!
//! Logs go to stderr; sampled data goes to stdout.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::sample::{SampleKind, SampleOptions};
use config::{CliArgs, CliConfig, DEFAULT_CONFIG_FILE};

/// Scrambled Halton quasi-random sequence CLI
#[derive(Parser)]
#[command(name = "qrand")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw quasi-random points
    Sample {
        /// Distribution (uniform, integer, gaussian)
        #[arg(short, long, default_value = "uniform")]
        kind: String,

        /// Number of points
        #[arg(short, long)]
        points: usize,

        /// Point dimensionality
        #[arg(short, long)]
        dimension: Option<usize>,

        /// Scrambling seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Lower bound (uniform, integer)
        #[arg(long, allow_negative_numbers = true)]
        min: Option<String>,

        /// Upper bound (uniform, integer)
        #[arg(long, allow_negative_numbers = true)]
        max: Option<String>,

        /// Output format (table, csv, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Resume from this checkpoint instead of seeding
        #[arg(long)]
        state_in: Option<String>,

        /// Print the checkpoint after the points
        #[arg(long)]
        print_state: bool,
    },

    /// Print the checkpoint of a seeded sequence
    State {
        /// Point dimensionality
        #[arg(short, long)]
        dimension: Option<usize>,

        /// Scrambling seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Points to advance before checkpointing
        #[arg(short, long, default_value = "0")]
        advance: u64,
    },

    /// Continue sampling from a checkpoint
    Resume {
        /// Checkpoint text
        #[arg(long)]
        state: String,

        /// Distribution (uniform, integer, gaussian)
        #[arg(short, long, default_value = "uniform")]
        kind: String,

        /// Number of points
        #[arg(short, long)]
        points: usize,

        /// Lower bound (uniform, integer)
        #[arg(long, allow_negative_numbers = true)]
        min: Option<String>,

        /// Upper bound (uniform, integer)
        #[arg(long, allow_negative_numbers = true)]
        max: Option<String>,

        /// Output format (table, csv, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Print the checkpoint after the points
        #[arg(long)]
        print_state: bool,
    },

    /// Check system configuration
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: Some(PathBuf::from(&self.config)),
            verbose: self.verbose,
            ..Default::default()
        };
        match &self.command {
            Commands::Sample {
                dimension,
                seed,
                format,
                ..
            } => {
                args.dimension = *dimension;
                args.seed = *seed;
                args.format = format.clone();
            }
            Commands::State { dimension, seed, .. } => {
                args.dimension = *dimension;
                args.seed = *seed;
            }
            Commands::Resume { format, .. } => args.format = format.clone(),
            Commands::Check => {}
        }
        args
    }
}

fn init_tracing(config: &CliConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::build_config(&cli.config_args())
        .with_context(|| format!("loading configuration from {}", cli.config))?;
    init_tracing(&config);
    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Sample {
            kind,
            points,
            dimension,
            seed,
            min,
            max,
            state_in,
            print_state,
            ..
        } => {
            let options = SampleOptions {
                kind: SampleKind::from_str(&kind)?,
                points,
                min,
                max,
                print_state,
            };
            commands::sample::run(&config, &options, state_in.as_deref(), dimension, seed)?
        }
        Commands::State { advance, .. } => commands::state::run(&config, advance)?,
        Commands::Resume {
            state,
            kind,
            points,
            min,
            max,
            print_state,
            ..
        } => {
            let options = SampleOptions {
                kind: SampleKind::from_str(&kind)?,
                points,
                min,
                max,
                print_state,
            };
            commands::resume::run(&config, &state, &options)?
        }
        Commands::Check => commands::check::run(&config)?,
    }
    Ok(())
}
