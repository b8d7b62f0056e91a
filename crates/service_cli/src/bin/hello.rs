//! Fork-join hello world.
//!
//! `hello [num_threads]` prints one greeting from every worker (default 4).

use std::process::ExitCode;

use service_cli::commands::hello::{self, HelloArgs};
use service_cli::{init_tracing, CliError};

fn main() -> ExitCode {
    init_tracing();

    let result = HelloArgs::from_args(std::env::args_os())
        .and_then(|args| hello::run(&args, &mut std::io::stdout()));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(CliError::Usage) => {
            println!("{}", hello::USAGE);
            ExitCode::FAILURE
        }
        Err(err) if err.is_informational() => {
            print!("{}", err);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
