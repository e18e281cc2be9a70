use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::sync::Arc;

use applicant_form::{
    config::{self, FormPolicy},
    error::FormResult,
    models::applicant::{validators::application_validator, ApplicationForm},
    services::submission_service::{handle_submit, LogView},
    utils::{
        dates::SystemClock,
        logger::{init_logging, LogFormat},
    },
};

/// Reads one JSON application (from the path given as the first argument,
/// or stdin), prints the validation result as JSON and exits with 0 when the
/// application is valid, 1 when it is not, 2 on any other failure.
fn main() -> ExitCode {
    config::load_dotenv();
    init_logging(LogFormat::from_env_or_default());

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> FormResult<bool> {
    let policy = FormPolicy::from_env()?;

    let raw = match env::args().nth(1) {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let form: ApplicationForm = serde_json::from_str(&raw)?;

    let validator = application_validator(&policy, Arc::new(SystemClock));
    let report = handle_submit(&validator, &form, &mut LogView::default());

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.is_valid())
}
