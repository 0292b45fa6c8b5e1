//! check command - Run the QA pipeline on one line

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::types::LineId;
use crate::engine::{Pipeline, RunPolicy, RunResult};
use crate::ingest::DirectoryIngest;
use crate::reference::JsonReferenceStore;
use crate::ui::output;

/// Arguments of `cqline check`. Directory flags override the config.
#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub line_id: LineId,
    pub json: bool,
    pub report_dir: Option<PathBuf>,
    pub upload_dir: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub reference_dir: Option<PathBuf>,
}

/// Check a line and print its report.
pub fn check(ctx: &Context, args: CheckArgs) -> Result<ExitCode> {
    let config = ctx.load_config()?;

    let upload_dir = match args.upload_dir {
        Some(dir) => dir,
        None => config.upload_dir()?.to_path_buf(),
    };
    let reference_dir = match args.reference_dir {
        Some(dir) => dir,
        None => config.reference_dir()?.to_path_buf(),
    };
    let work_dir = args.work_dir.unwrap_or_else(|| config.work_dir());
    let report_dir = args
        .report_dir
        .or_else(|| config.report_dir().map(|d| d.to_path_buf()));

    output::debug(
        format!(
            "upload: {}, work: {}, reference: {}",
            upload_dir.display(),
            work_dir.display(),
            reference_dir.display()
        ),
        ctx.verbosity,
    );

    let ingest = DirectoryIngest::new(upload_dir, work_dir)
        .with_photo_extensions(config.photo_extensions());
    let reference = JsonReferenceStore::new(reference_dir);
    let policy = RunPolicy {
        time_budget: config.time_budget(),
    };

    let result = Pipeline::new(&ingest, &reference)
        .with_policy(policy)
        .run(args.line_id);

    if let Some(dir) = report_dir {
        let path = result
            .write_log(&dir)
            .with_context(|| format!("Failed to write report into '{}'", dir.display()))?;
        output::debug(format!("report written to {}", path.display()), ctx.verbosity);
    }

    if args.json {
        println!("{}", result.to_json().context("Failed to serialize report")?);
    } else {
        output::render(&result, ctx.verbosity);
    }

    Ok(ExitCode::from(exit_code(&result)))
}

/// 0: checked and clean. 2: checked with errors. 1: not checked.
pub fn exit_code(result: &RunResult) -> u8 {
    if !result.is_ok() {
        1
    } else if result.has_findings() {
        2
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Report;

    fn line() -> LineId {
        LineId::new(3).unwrap()
    }

    #[test]
    fn exit_codes_follow_status_and_findings() {
        let mut clean = Report::new();
        clean.info("fine");
        assert_eq!(exit_code(&RunResult::completed(line(), None, clean)), 0);

        let mut findings = Report::new();
        findings.error("bad");
        assert_eq!(exit_code(&RunResult::completed(line(), None, findings)), 2);

        assert_eq!(exit_code(&RunResult::gated(line(), "no folder")), 1);
    }
}
