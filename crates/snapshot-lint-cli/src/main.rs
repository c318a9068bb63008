//! snapshot-lint CLI tool.
//!
//! Usage:
//! ```bash
//! snapshot-lint check [OPTIONS] [PATH]
//! snapshot-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_lookup;

/// Finds SNAPSHOT couplings in a project's dependencies and parent chain
#[derive(Parser)]
#[command(name = "snapshot-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    debug: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a project for SNAPSHOT couplings
    Check {
        /// Project descriptor, or a directory containing project.toml
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Print the full inheritance path of every finding
        #[arg(short, long)]
        verbose: bool,

        /// Stop at the first SNAPSHOT coupling
        #[arg(long)]
        fail_early: bool,

        /// Only report these groups (can be specified multiple times)
        #[arg(short, long = "group-id")]
        group_id: Vec<String>,

        /// Local repository root
        #[arg(long, env = "SNAPSHOT_LINT_LOCAL_REPO")]
        local: Option<PathBuf>,

        /// Additional repository roots (can be specified multiple times)
        #[arg(short, long)]
        repository: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary; the report itself goes to the error log.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One line per finding.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            verbose,
            fail_early,
            group_id,
            local,
            repository,
            format,
        } => {
            let source = config_lookup::ConfigSource::locate(&path, cli.config.as_deref());
            let args = commands::check::CheckArgs {
                path,
                verbose,
                fail_early,
                group_ids: group_id,
                local,
                repositories: repository,
                format,
            };
            commands::check::run(args, &source)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
