//! Error types for the benchmark CLIs.

use thiserror::Error;

use reduce_core::ReduceError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Arguments have the wrong shape; the usage text should be shown.
    #[error("Invalid arguments")]
    Usage,

    /// Help or version output requested from clap.
    #[error("{0}")]
    Clap(#[from] clap::Error),

    /// Benchmark name not recognised.
    #[error("No benchmark named: {0}")]
    UnknownBenchmark(String),

    /// Kernel or harness failure
    #[error(transparent)]
    Reduce(#[from] ReduceError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns whether the command should still exit successfully.
    ///
    /// Only clap's `--help` and `--version` displays qualify.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::Clap(err) if err.exit_code() == 0)
    }
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
