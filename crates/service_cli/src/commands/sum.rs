//! Sum command implementation
//!
//! Runs one sum strategy under the warm-up/timing harness and prints the
//! results.
//!
//! ```text
//! sum                                              serial baseline
//! sum <critical|omp|local|opt_local> <num_threads> parallel strategy
//! ```

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;

use reduce_core::kernels::{ReductionKernel, SerialSum};
use reduce_core::{
    generate_input, BenchmarkConfig, BenchmarkReport, BenchmarkRunner, Strategy, WorkerPool,
    DEFAULT_INPUT_SIZE, DEFAULT_SEED,
};

use crate::{CliError, Result};

/// Usage text printed for malformed arguments.
pub const USAGE: &str = "\
Program can be run in serial or in parallel.
Sum serial: ./<binary>
Sum parallel: ./<binary> <critical|omp|local|opt_local> <num_threads>

Serial execution differs from parallel execution on one thread.
./<binary> is not equal to ./<binary> omp 1.";

/// Parallel sum benchmark
#[derive(Debug, Parser)]
#[command(name = "sum")]
#[command(version, about, long_about = None)]
pub struct SumArgs {
    /// Benchmark to run (critical, omp, local, opt_local); omit for serial
    pub benchmark: Option<String>,

    /// Number of worker threads
    pub threads: Option<String>,
}

/// A validated benchmark selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchmarkPlan {
    /// Strategy to run.
    pub strategy: Strategy,
    /// Worker count, `None` for the serial baseline.
    pub threads: Option<usize>,
}

impl SumArgs {
    /// Parses a full argument list, program name first.
    ///
    /// Anything clap rejects other than `--help`/`--version` becomes
    /// [`CliError::Usage`].
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(classify_clap_error)
    }

    /// Resolves the arguments into a plan.
    ///
    /// The thread count is checked before the benchmark name, so a malformed
    /// count yields [`CliError::Usage`] even when the name is also unknown.
    pub fn plan(&self) -> Result<BenchmarkPlan> {
        match (self.benchmark.as_deref(), self.threads.as_deref()) {
            (None, None) => Ok(BenchmarkPlan {
                strategy: Strategy::Serial,
                threads: None,
            }),
            (Some(name), Some(threads)) => {
                let threads = parse_thread_count(threads)?;
                match name.parse::<Strategy>() {
                    Ok(strategy) if strategy.is_parallel() => Ok(BenchmarkPlan {
                        strategy,
                        threads: Some(threads),
                    }),
                    _ => Err(CliError::UnknownBenchmark(name.to_string())),
                }
            }
            _ => Err(CliError::Usage),
        }
    }
}

pub(crate) fn classify_clap_error(err: clap::Error) -> CliError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => CliError::Clap(err),
        _ => CliError::Usage,
    }
}

/// Parses a strictly positive thread count written as plain decimal digits.
pub(crate) fn parse_thread_count(raw: &str) -> Result<usize> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CliError::Usage);
    }
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CliError::Usage),
    }
}

/// Input and harness settings for the sum command.
#[derive(Clone, Debug)]
pub struct SumConfig {
    /// Number of doubles to sum.
    pub input_size: usize,
    /// Seed for input generation.
    pub seed: u64,
    /// Warm-up and timing settings.
    pub benchmark: BenchmarkConfig,
}

impl Default for SumConfig {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            seed: DEFAULT_SEED,
            benchmark: BenchmarkConfig::default(),
        }
    }
}

impl SumConfig {
    /// Sets the input size.
    pub fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    /// Sets the input seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Run the sum command
///
/// Validates `args` before any input is generated, so rejected arguments
/// never reach the timed section.
pub fn run<W: Write>(args: &SumArgs, config: &SumConfig, out: &mut W) -> Result<BenchmarkReport> {
    let plan = args.plan()?;
    config.benchmark.validate()?;

    let input = generate_input(config.input_size, config.seed);
    info!(
        strategy = %plan.strategy,
        threads = ?plan.threads,
        input_size = input.len(),
        "starting sum benchmark"
    );

    let runner = BenchmarkRunner::new(config.benchmark.clone());
    let name = plan.strategy.name();

    let report = match plan.threads {
        None => {
            writeln!(out, "Running benchmark: {}", name)?;
            runner.run(name, None, || SerialSum.sum(&input))?
        }
        Some(threads) => {
            writeln!(out, "Running benchmark: {} on {} threads.", name, threads)?;
            let pool = WorkerPool::new(threads)?;
            runner.run(name, Some(threads), || plan.strategy.run(&pool, &input))?
        }
    };

    writeln!(out, "{}", report)?;
    Ok(report)
}

/// Prints the user-facing message for a failed run.
pub fn report_error<W: Write>(err: &CliError, out: &mut W) -> std::io::Result<()> {
    match err {
        CliError::Usage => writeln!(out, "{}", USAGE),
        CliError::UnknownBenchmark(name) => writeln!(out, "Error: No benchmark named: {}", name),
        CliError::Clap(err) => write!(out, "{}", err.render()),
        other => writeln!(out, "Error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(benchmark: Option<&str>, threads: Option<&str>) -> SumArgs {
        SumArgs {
            benchmark: benchmark.map(str::to_string),
            threads: threads.map(str::to_string),
        }
    }

    #[test]
    fn test_from_args_shapes() {
        let parsed = SumArgs::from_args(["sum"]).unwrap();
        assert_eq!(parsed.plan().unwrap().strategy, Strategy::Serial);

        let parsed = SumArgs::from_args(["sum", "omp", "4"]).unwrap();
        assert_eq!(parsed.plan().unwrap().threads, Some(4));

        let parsed = SumArgs::from_args(["sum", "local"]).unwrap();
        assert!(matches!(parsed.plan(), Err(CliError::Usage)));

        let err = SumArgs::from_args(["sum", "omp", "4", "extra"]).unwrap_err();
        assert!(matches!(err, CliError::Usage));
    }

    #[test]
    fn test_from_args_help_is_informational() {
        let err = SumArgs::from_args(["sum", "--help"]).unwrap_err();
        assert!(err.is_informational());
    }

    #[test]
    fn test_plan_serial() {
        let plan = args(None, None).plan().unwrap();
        assert_eq!(plan.strategy, Strategy::Serial);
        assert_eq!(plan.threads, None);
    }

    #[test]
    fn test_plan_parallel() {
        for (name, strategy) in [
            ("critical", Strategy::Critical),
            ("omp", Strategy::Omp),
            ("local", Strategy::Local),
            ("opt_local", Strategy::OptLocal),
        ] {
            let plan = args(Some(name), Some("3")).plan().unwrap();
            assert_eq!(plan.strategy, strategy);
            assert_eq!(plan.threads, Some(3));
        }
    }

    #[test]
    fn test_plan_unknown_benchmark() {
        let err = args(Some("atomic"), Some("2")).plan().unwrap_err();
        assert!(matches!(err, CliError::UnknownBenchmark(name) if name == "atomic"));
    }

    #[test]
    fn test_plan_serial_name_with_threads_is_unknown() {
        let err = args(Some("serial"), Some("2")).plan().unwrap_err();
        assert!(matches!(err, CliError::UnknownBenchmark(_)));
    }

    #[test]
    fn test_plan_malformed() {
        assert!(matches!(args(Some("omp"), None).plan(), Err(CliError::Usage)));
        assert!(matches!(args(Some("omp"), Some("x4")).plan(), Err(CliError::Usage)));
        assert!(matches!(args(Some("omp"), Some("0")).plan(), Err(CliError::Usage)));
        assert!(matches!(args(Some("omp"), Some("-2")).plan(), Err(CliError::Usage)));
        assert!(matches!(args(Some("atomic"), Some("x")).plan(), Err(CliError::Usage)));
    }

    #[test]
    fn test_thread_count_digits_only() {
        assert_eq!(parse_thread_count("12").unwrap(), 12);
        for raw in ["+4", " 4", "4 ", "", "0x4", "٤"] {
            assert!(matches!(parse_thread_count(raw), Err(CliError::Usage)), "{:?}", raw);
        }
        assert!(matches!(args(Some("omp"), Some("+4")).plan(), Err(CliError::Usage)));
    }

    #[test]
    fn test_report_error_messages() {
        let mut out = Vec::new();
        report_error(&CliError::UnknownBenchmark("foo".to_string()), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Error: No benchmark named: foo\n");

        let mut out = Vec::new();
        report_error(&CliError::Usage, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Program can be run in serial or in parallel."));
        assert!(text.contains("<critical|omp|local|opt_local> <num_threads>"));
    }
}
