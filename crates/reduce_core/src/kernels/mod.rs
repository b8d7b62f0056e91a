//! Parallel sum kernels.
//!
//! Five ways to add up the same slice of doubles. They differ only in how
//! workers synchronise:
//!
//! | Kernel | Name | Synchronisation |
//! |--------|------|-----------------|
//! | [`SerialSum`] | `serial` | none, single thread |
//! | [`ReductionSum`] | `omp` | rayon's parallel `sum` combines partials |
//! | [`CriticalSum`] | `critical` | one mutex-guarded accumulator, locked per element |
//! | [`LocalSum`] | `local` | one slot per worker in a dense array |
//! | [`PaddedLocalSum`] | `opt_local` | one cache-line-padded slot per worker |
//!
//! Parallel results match the serial sum up to floating-point reassociation.
//! `local` and `opt_local` visit elements in the same order and are
//! bit-identical for the same pool size.

mod critical;
mod local;
mod reduction;
mod serial;

pub use critical::CriticalSum;
pub use local::{AccumulatorSlot, LocalSum, PaddedLocalSum, PaddedSlot, SharedSlot};
pub use reduction::ReductionSum;
pub use serial::SerialSum;

/// A strategy for summing a slice of doubles.
pub trait ReductionKernel {
    /// Benchmark name of the kernel.
    fn name(&self) -> &'static str;

    /// Returns the arithmetic sum of `input`.
    fn sum(&self, input: &[f64]) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::WorkerPool;
    use approx::assert_relative_eq;

    fn all_kernels(pool: &WorkerPool) -> Vec<Box<dyn ReductionKernel + '_>> {
        vec![
            Box::new(SerialSum),
            Box::new(ReductionSum::new(pool)),
            Box::new(CriticalSum::new(pool)),
            Box::new(LocalSum::new(pool)),
            Box::new(PaddedLocalSum::new(pool)),
        ]
    }

    #[test]
    fn test_small_example_all_kernels() {
        let pool = WorkerPool::new(2).unwrap();
        let input = [1.0, 2.0, 3.0, 4.0];

        for kernel in all_kernels(&pool) {
            assert_eq!(kernel.sum(&input), 10.0, "kernel {}", kernel.name());
        }
    }

    #[test]
    fn test_empty_input_all_kernels() {
        let pool = WorkerPool::new(3).unwrap();

        for kernel in all_kernels(&pool) {
            assert_eq!(kernel.sum(&[]), 0.0, "kernel {}", kernel.name());
        }
    }

    #[test]
    fn test_more_threads_than_elements() {
        let pool = WorkerPool::new(8).unwrap();
        let input = [0.5, 0.25, 0.125];

        for kernel in all_kernels(&pool) {
            assert_relative_eq!(kernel.sum(&input), 0.875, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_kernel_names() {
        let pool = WorkerPool::new(1).unwrap();
        let names: Vec<_> = all_kernels(&pool).iter().map(|k| k.name()).collect();
        assert_eq!(names, ["serial", "omp", "critical", "local", "opt_local"]);
    }
}
