//! jdoc-lint CLI tool.
//!
//! Usage:
//! ```bash
//! jdoc-lint check [OPTIONS] [PATH]
//! jdoc-lint tree [--metadata] FILE
//! jdoc-lint list-rules [--kinds]
//! jdoc-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Linter for Javadoc-style documentation comments
#[derive(Parser)]
#[command(name = "jdoc-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific checks (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Preset to run when --rules is not given
        #[arg(long)]
        preset: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Print the comment trees of one file
    Tree {
        /// Source file to parse
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: TreeFormat,

        /// Also print summary, description and block tags
        #[arg(short, long)]
        metadata: bool,
    },

    /// List available checks
    ListRules {
        /// List node kind names usable in `javadoc_tokens` instead
        #[arg(long)]
        kinds: bool,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Output format for the `tree` command.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum TreeFormat {
    /// Indented node listing.
    #[default]
    Text,
    /// Nested JSON objects.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            preset,
            exclude,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let options = commands::check::CheckOptions {
                format,
                rules,
                preset,
                exclude,
            };
            commands::check::run(&path, &options, &source)
        }
        Commands::Tree {
            file,
            format,
            metadata,
        } => commands::tree::run(&file, format, metadata),
        Commands::ListRules { kinds } => {
            if kinds {
                commands::list_rules::run_kinds();
            } else {
                commands::list_rules::run();
            }
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
