//! Runtime-assisted reduction.

use rayon::prelude::*;

use super::ReductionKernel;
use crate::pool::{StaticPartition, WorkerPool};

/// Statically chunked partial sums combined by rayon's `sum` reduction.
///
/// Each chunk is summed sequentially; the order in which partials are
/// combined is up to rayon.
#[derive(Clone, Copy, Debug)]
pub struct ReductionSum<'a> {
    pool: &'a WorkerPool,
}

impl<'a> ReductionSum<'a> {
    /// Creates the kernel over `pool`.
    pub fn new(pool: &'a WorkerPool) -> Self {
        Self { pool }
    }
}

impl ReductionKernel for ReductionSum<'_> {
    fn name(&self) -> &'static str {
        "omp"
    }

    fn sum(&self, input: &[f64]) -> f64 {
        let chunk_size = StaticPartition::new(input.len(), self.pool.num_threads())
            .chunk_size()
            .max(1);

        self.pool.install(|| {
            input
                .par_chunks(chunk_size)
                .map(|chunk| chunk.iter().sum::<f64>())
                .sum()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reduction_sum_matches_closed_form() {
        let pool = WorkerPool::new(4).unwrap();
        let input: Vec<f64> = (1..=1000).map(f64::from).collect();
        assert_relative_eq!(ReductionSum::new(&pool).sum(&input), 500_500.0);
    }

    #[test]
    fn test_reduction_sum_single_thread() {
        let pool = WorkerPool::new(1).unwrap();
        assert_eq!(ReductionSum::new(&pool).sum(&[2.0, 3.0]), 5.0);
    }
}
