//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file instead of the standard locations
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::LineId;

/// cqline - Automated quality checks for delimitation line submissions
#[derive(Parser, Debug)]
#[command(name = "cqline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the standard locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every quality check on one line submission
    #[command(
        name = "check",
        long_about = "Run every quality check on one line submission.\n\n\
            Reads the submission folder <upload_dir>/<LINE_ID>, validates its layers and \
            tables, and prints the report. Findings are reported as error entries; the \
            run itself only fails when the submission cannot be checked at all.",
        after_help = "\
EXIT STATUS:
    0   the line was checked and no errors were found
    2   the line was checked and the report contains errors
    1   the line could not be checked

WORKFLOW EXAMPLES:
    # Check line 42 with the configured directories
    cqline check 42

    # Machine-readable report
    cqline check 42 --json

    # Override directories and keep a text log
    cqline check 42 --upload-dir ./upload --reference-dir ./sidm3 --report-dir ./reports"
    )]
    Check {
        /// Line identifier (numeric)
        line_id: LineId,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the text log into this directory
        #[arg(long, value_name = "DIR")]
        report_dir: Option<PathBuf>,

        /// Root holding one submission folder per line
        #[arg(long, value_name = "DIR")]
        upload_dir: Option<PathBuf>,

        /// Root for locks and scratch workspaces
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,

        /// Directory with tram_linia_mem.json and fita_mem.json
        #[arg(long, value_name = "DIR")]
        reference_dir: Option<PathBuf>,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "View or modify cqline configuration.\n\n\
            Configuration is stored in ~/.cqline/config.toml unless CQLINE_CONFIG or \
            --config names another file.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List all configuration values
    cqline config list

    # Get a specific value
    cqline config get upload_dir

    # Set a value
    cqline config set check.time_budget_secs 300"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    cqline completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    cqline completion zsh >> ~/.zshrc"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
