//! Warm-up and timing harness for the sum kernels.
//!
//! A benchmark run is one or more untimed warm-up invocations followed by one
//! or more timed invocations measured with [`Instant`], the monotonic clock.
//! Every result passes through [`black_box`] and both the warm-up and the
//! measured sums are kept in the report, so the optimiser cannot discard the
//! work being timed.
//!
//! # Usage
//!
//! ```rust
//! use reduce_core::harness::{BenchmarkConfig, BenchmarkRunner};
//!
//! let input = vec![1.0, 2.0, 3.0, 4.0];
//! let runner = BenchmarkRunner::new(BenchmarkConfig::default());
//! let report = runner
//!     .run("serial", None, || input.iter().sum::<f64>())
//!     .unwrap();
//!
//! assert_eq!(report.run_sum, 10.0);
//! assert_eq!(report.warmup_sum, Some(10.0));
//! ```

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::{ReduceError, Result};

// =============================================================================
// Benchmark Configuration
// =============================================================================

/// Configuration for benchmark execution.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `warmup` | 1 | Untimed invocations before measuring |
/// | `iterations` | 1 | Timed invocations |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Number of warm-up invocations (default: 1).
    pub warmup: usize,

    /// Number of timed invocations (default: 1).
    pub iterations: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            warmup: 1,
            iterations: 1,
        }
    }
}

impl BenchmarkConfig {
    /// Creates a new benchmark configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of warm-up invocations.
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Sets the number of timed invocations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(ReduceError::InvalidConfig(
                "iterations must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Timing Statistics
// =============================================================================

/// Per-invocation timings of the timed phase.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingStats {
    /// Mean time in nanoseconds.
    pub mean_ns: f64,

    /// Fastest invocation in nanoseconds.
    pub min_ns: u64,

    /// Number of timed invocations.
    pub sample_count: usize,
}

impl TimingStats {
    /// Summarises timing samples in nanoseconds. Empty input gives zeros.
    pub fn from_samples(samples: &[u64]) -> Self {
        let Some(&min_ns) = samples.iter().min() else {
            return Self::default();
        };
        let total: u128 = samples.iter().map(|&ns| u128::from(ns)).sum();

        Self {
            mean_ns: total as f64 / samples.len() as f64,
            min_ns,
            sample_count: samples.len(),
        }
    }
}

// =============================================================================
// Benchmark Report
// =============================================================================

/// Outcome of one benchmark run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkReport {
    /// Benchmark name.
    pub name: String,

    /// Worker count, `None` for the serial baseline.
    pub threads: Option<usize>,

    /// Result of the last warm-up invocation, if any ran.
    pub warmup_sum: Option<f64>,

    /// Result of the last timed invocation.
    pub run_sum: f64,

    /// Mean wall-clock time of a timed invocation.
    pub elapsed: Duration,

    /// Per-invocation timing statistics.
    pub samples: TimingStats,
}

impl BenchmarkReport {
    /// Returns the elapsed time in seconds.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use results to avoid compiler optimizations. warmup: ")?;
        match self.warmup_sum {
            Some(sum) => write!(f, "{}", sum)?,
            None => write!(f, "-")?,
        }
        writeln!(f, " run: {}", self.run_sum)?;
        write!(f, "{} execution time (s): {}", self.name, self.elapsed_secs())
    }
}

// =============================================================================
// Benchmark Runner
// =============================================================================

/// Runs kernels under a [`BenchmarkConfig`].
#[derive(Clone, Debug, Default)]
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    /// Creates a runner.
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// Warms up and times `kernel`.
    ///
    /// `kernel` is called exactly `warmup + iterations` times.
    pub fn run<F>(
        &self,
        name: &str,
        threads: Option<usize>,
        mut kernel: F,
    ) -> Result<BenchmarkReport>
    where
        F: FnMut() -> f64,
    {
        self.config.validate()?;

        let mut warmup_sum = None;
        for _ in 0..self.config.warmup {
            warmup_sum = Some(black_box(kernel()));
        }
        debug!(name, warmup = self.config.warmup, "warm-up finished");

        let mut run_sum = 0.0;
        let mut samples = Vec::with_capacity(self.config.iterations);
        for _ in 0..self.config.iterations {
            let start = Instant::now();
            run_sum = black_box(kernel());
            samples.push(start.elapsed().as_nanos() as u64);
        }

        let samples = TimingStats::from_samples(&samples);
        let elapsed = Duration::from_nanos(samples.mean_ns.round() as u64);

        info!(
            name,
            threads = ?threads,
            elapsed_s = elapsed.as_secs_f64(),
            fastest_s = Duration::from_nanos(samples.min_ns).as_secs_f64(),
            "benchmark finished"
        );

        Ok(BenchmarkReport {
            name: name.to_string(),
            threads,
            warmup_sum,
            run_sum,
            elapsed,
            samples,
        })
    }
}
