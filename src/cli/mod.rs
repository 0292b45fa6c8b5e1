//! cli
//!
//! Command-line interface layer for cqline.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the diagnostic log subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It resolves configuration, builds the
//! collaborators, and hands the line to [`crate::engine::Pipeline`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Settings derived from global CLI flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Explicit config file (`--config`).
    pub config_path: Option<PathBuf>,
    pub verbosity: Verbosity,
}

impl Context {
    /// Load configuration, honoring `--config`.
    ///
    /// An explicit path that does not exist yet yields defaults, so that
    /// `config set` can create it.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config_path {
            Some(path) if path.exists() => Config::load_from(path)
                .with_context(|| format!("Failed to load config from '{}'", path.display())),
            Some(_) => Ok(Config::default()),
            None => Config::load().context("Failed to load config"),
        }
    }

    /// Where `config set` writes.
    pub fn config_write_path(&self, config: &Config) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => config
                .write_path()
                .context("Failed to resolve config location"),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let ctx = Context {
        config_path: cli.config.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    commands::dispatch(cli.command, &ctx)
}

/// Diagnostics go to stderr: `RUST_LOG` if set, else `warn`; `--debug`
/// forces `debug` for this crate.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("cqline=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
