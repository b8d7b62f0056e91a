//! Hello command implementation
//!
//! Every worker of a fixed-size pool greets once from inside a single
//! parallel region. The order of the lines is whatever the scheduler makes
//! of it.

use std::ffi::OsString;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use clap::Parser;
use tracing::debug;

use reduce_core::WorkerPool;

use super::sum::{classify_clap_error, parse_thread_count};
use crate::Result;

/// Worker count used when none is given.
pub const DEFAULT_THREADS: usize = 4;

/// Usage text printed for malformed arguments.
pub const USAGE: &str = "Usage: ./<binary> [num_threads]";

/// Fork-join hello world
#[derive(Debug, Parser)]
#[command(name = "hello")]
#[command(version, about, long_about = None)]
pub struct HelloArgs {
    /// Number of worker threads [default: 4]
    pub threads: Option<String>,
}

impl HelloArgs {
    /// Parses a full argument list, program name first.
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(classify_clap_error)
    }

    /// Returns the requested worker count.
    pub fn thread_count(&self) -> Result<usize> {
        self.threads
            .as_deref()
            .map_or(Ok(DEFAULT_THREADS), parse_thread_count)
    }
}

/// Run the hello command
///
/// Returns the worker indices that greeted, ordered by index.
pub fn run<W: Write + Send>(args: &HelloArgs, out: &mut W) -> Result<Vec<usize>> {
    let threads = args.thread_count()?;
    let pool = WorkerPool::new(threads)?;
    debug!(threads, "entering hello region");

    let out = Mutex::new(out);
    let greeted = pool.parallel_region(|worker| -> std::io::Result<usize> {
        let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "Hello World from Thread {}!", worker)?;
        Ok(worker)
    });

    Ok(greeted.into_iter().collect::<std::io::Result<Vec<_>>>()?)
}
