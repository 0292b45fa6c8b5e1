use std::process::ExitCode;

fn main() -> ExitCode {
    match cqline::cli::run() {
        Ok(code) => code,
        Err(err) => {
            cqline::ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
