//! # Reduction Core
//!
//! Shared-memory parallel sum kernels and the harness that times them.
//!
//! The crate sums one immutable slice of doubles five ways, each with a
//! different synchronisation discipline:
//!
//! - `serial`: plain sequential loop
//! - `omp`: static partials combined by rayon's parallel reduction
//! - `critical`: every addition behind one mutex
//! - `local`: one accumulator slot per worker, slots packed together
//! - `opt_local`: one accumulator slot per worker, slots padded apart
//!
//! ## Layout
//!
//! - [`input`]: seeded uniform input generation
//! - [`pool`]: fixed-size fork-join worker pool and static partitioning
//! - [`kernels`]: the five kernels behind [`kernels::ReductionKernel`]
//! - [`strategy`]: selection of a kernel by benchmark name
//! - [`harness`]: warm-up, timing and reporting
//!
//! ## Usage Example
//!
//! ```rust
//! use reduce_core::{Strategy, WorkerPool};
//!
//! let pool = WorkerPool::new(2).unwrap();
//! let input = [1.0, 2.0, 3.0, 4.0];
//!
//! for strategy in Strategy::ALL {
//!     assert_eq!(strategy.run(&pool, &input), 10.0);
//! }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod harness;
pub mod input;
pub mod kernels;
pub mod pool;
pub mod strategy;

pub use error::{ReduceError, Result};
pub use harness::{BenchmarkConfig, BenchmarkReport, BenchmarkRunner, TimingStats};
pub use input::{generate_input, InputRng, DEFAULT_INPUT_SIZE, DEFAULT_SEED};
pub use pool::{StaticPartition, WorkerPool};
pub use strategy::Strategy;
