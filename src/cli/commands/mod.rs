//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves configuration and command-specific arguments
//! 2. Calls the engine or the config layer
//! 3. Formats and displays output
//!
//! Handlers return the process exit code; only `check` uses anything
//! other than success.

mod check;
mod completion;
mod config_cmd;

pub use check::{check, exit_code, CheckArgs};
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};

use std::process::ExitCode;

use anyhow::Result;

use super::Context;
use crate::cli::args::{Command, ConfigAction};

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Check {
            line_id,
            json,
            report_dir,
            upload_dir,
            work_dir,
            reference_dir,
        } => check::check(
            ctx,
            CheckArgs {
                line_id,
                json,
                report_dir,
                upload_dir,
                work_dir,
                reference_dir,
            },
        ),
        Command::Config { action } => {
            match action {
                ConfigAction::Get { key } => config_cmd::get(ctx, &key)?,
                ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value)?,
                ConfigAction::List => config_cmd::list(ctx)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Completion { shell } => {
            completion::completion(shell)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
