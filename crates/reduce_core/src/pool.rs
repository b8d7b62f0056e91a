//! Fixed-size fork-join worker pool.
//!
//! Every parallel kernel runs inside a [`WorkerPool`]: a dedicated rayon
//! thread pool sized once at launch. Two execution shapes are provided:
//!
//! 1. **Parallel region** ([`WorkerPool::parallel_region`]): the closure runs
//!    exactly once on every worker and the call returns only after all
//!    workers finish. Each invocation receives its worker index, so kernels
//!    can address per-worker state directly.
//!
//! 2. **Installed computation** ([`WorkerPool::install`]): ordinary rayon
//!    parallel iterators executed on this pool instead of the global one.
//!
//! [`StaticPartition`] splits an index range into contiguous equal chunks,
//! one per worker, assigned in advance with no load balancing.
//!
//! # Example
//!
//! ```rust
//! use reduce_core::pool::{StaticPartition, WorkerPool};
//!
//! let pool = WorkerPool::new(4).unwrap();
//! let data: Vec<f64> = (0..100).map(f64::from).collect();
//! let partition = StaticPartition::new(data.len(), pool.num_threads());
//!
//! let partials = pool.parallel_region(|worker| {
//!     data[partition.chunk(worker)].iter().sum::<f64>()
//! });
//!
//! assert_eq!(partials.len(), 4);
//! assert_eq!(partials.iter().sum::<f64>(), 4950.0);
//! ```

use std::ops::Range;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use crate::error::{ReduceError, Result};

/// A fixed-size pool of worker threads.
pub struct WorkerPool {
    inner: ThreadPool,
    num_threads: usize,
}

impl WorkerPool {
    /// Builds a pool of exactly `num_threads` workers.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::InvalidThreadCount`] for zero threads or more
    /// than [`rayon::max_num_threads`], and [`ReduceError::ThreadPool`] if
    /// rayon fails to spawn the workers.
    pub fn new(num_threads: usize) -> Result<Self> {
        // rayon silently caps larger pools, which would leave chunks unowned.
        if num_threads == 0 || num_threads > rayon::max_num_threads() {
            return Err(ReduceError::InvalidThreadCount(num_threads));
        }

        let cores = num_cpus::get();
        if num_threads > cores {
            warn!(num_threads, cores, "more workers than logical cores");
        }

        let inner = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|index| format!("reduce-worker-{}", index))
            .build()?;

        let num_threads = inner.current_num_threads();
        debug!(num_threads, "worker pool started");
        Ok(Self { inner, num_threads })
    }

    /// Returns the number of workers actually running.
    #[inline]
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Runs `region` once on every worker and waits for all of them.
    ///
    /// The closure receives the worker index in `0..num_threads()`. Results
    /// are returned ordered by worker index.
    pub fn parallel_region<F, R>(&self, region: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync,
        R: Send,
    {
        self.inner.broadcast(|ctx| region(ctx.index()))
    }

    /// Executes `op` inside this pool, so rayon parallel iterators it uses
    /// are scheduled on these workers.
    pub fn install<F, R>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.inner.install(op)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_threads", &self.num_threads)
            .finish()
    }
}

/// Static partition of `0..len` into `parts` contiguous chunks.
///
/// Chunks hold `ceil(len / parts)` elements; the last non-empty chunk may be
/// shorter and surplus parts receive empty ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticPartition {
    len: usize,
    chunk_size: usize,
}

impl StaticPartition {
    /// Creates a partition of `len` elements over `parts` workers.
    ///
    /// `parts` is clamped to at least 1.
    pub fn new(len: usize, parts: usize) -> Self {
        Self {
            len,
            chunk_size: len.div_ceil(parts.max(1)),
        }
    }

    /// Returns the length of a full chunk.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the index range owned by part `index`.
    #[inline]
    pub fn chunk(&self, index: usize) -> Range<usize> {
        let start = (index * self.chunk_size).min(self.len);
        let end = (start + self.chunk_size).min(self.len);
        start..end
    }
}
