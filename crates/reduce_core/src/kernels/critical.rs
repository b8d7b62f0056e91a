//! Critical-section accumulation.

use std::sync::{Mutex, PoisonError};

use super::ReductionKernel;
use crate::pool::{StaticPartition, WorkerPool};

/// Every addition goes through one mutex-guarded accumulator.
///
/// Correct for any pool size, but all additions are serialised and each one
/// pays for a lock round-trip, so this is expected to be the slowest kernel.
#[derive(Clone, Copy, Debug)]
pub struct CriticalSum<'a> {
    pool: &'a WorkerPool,
}

impl<'a> CriticalSum<'a> {
    /// Creates the kernel over `pool`.
    pub fn new(pool: &'a WorkerPool) -> Self {
        Self { pool }
    }
}

impl ReductionKernel for CriticalSum<'_> {
    fn name(&self) -> &'static str {
        "critical"
    }

    fn sum(&self, input: &[f64]) -> f64 {
        let total = Mutex::new(0.0_f64);
        let partition = StaticPartition::new(input.len(), self.pool.num_threads());

        self.pool.parallel_region(|worker| {
            for &x in &input[partition.chunk(worker)] {
                // A panicking worker cannot leave the f64 half-written.
                let mut guard = total.lock().unwrap_or_else(PoisonError::into_inner);
                *guard += x;
            }
        });

        total.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
