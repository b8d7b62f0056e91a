//! Parallel Reduction CLIs - Command Line Drivers for the Sum Benchmarks
//!
//! Two binaries share this library:
//!
//! - `sum` - run the serial baseline, or `sum <critical|omp|local|opt_local> <num_threads>`
//! - `hello [num_threads]` - greet once from every worker of a fork-join pool
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate only parses arguments, prints
//! results and maps errors to exit codes. All kernels, the worker pool and
//! the timing harness live in `reduce_core`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod commands;
mod error;

pub use error::{CliError, Result};

/// Initialise tracing.
///
/// Logs go to stderr and are filtered by `RUST_LOG`; with the variable
/// unset only errors are shown, leaving stdout to the benchmark output.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
}
