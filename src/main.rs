//! Repostat CLI entrypoint for repository activity statistics.

use std::io::{self, Write};
use std::process::ExitCode;

use repostat::telemetry::{DEFAULT_LOG_FILTER, init_logging};

mod cli;

fn main() -> ExitCode {
    init_logging(DEFAULT_LOG_FILTER);

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _reported = writeln!(io::stderr().lock(), "{error}").is_ok();
            ExitCode::FAILURE
        }
    }
}
