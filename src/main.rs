use std::process::ExitCode;

use tailrouter::cli::run_cli;
use tailrouter::logging::{init_logging, LogConfig};

fn main() -> ExitCode {
    if let Err(err) = init_logging(&LogConfig::from_env()) {
        eprintln!("warning: {err:#}");
    }

    match run_cli() {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
