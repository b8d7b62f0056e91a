//! Parallel sum benchmark.
//!
//! `sum` runs the serial baseline; `sum <critical|omp|local|opt_local> <num_threads>`
//! runs one parallel strategy on a pool of that many workers.

use std::io::Write;
use std::process::ExitCode;

use service_cli::commands::sum::{self, SumArgs, SumConfig};
use service_cli::{init_tracing, CliError};
use tracing::error;

fn main() -> ExitCode {
    init_tracing();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = SumArgs::from_args(std::env::args_os())
        .and_then(|args| sum::run(&args, &SumConfig::default(), &mut out));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            if let CliError::Reduce(_) | CliError::Io(_) = err {
                error!(error = %err, "sum benchmark failed");
            }
            let _ = sum::report_error(&err, &mut out);
            let _ = out.flush();
            if err.is_informational() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
