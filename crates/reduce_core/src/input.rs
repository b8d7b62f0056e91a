//! Benchmark input generation.
//!
//! Every benchmark sums the same kind of input: a fixed-size sequence of
//! independent uniform `[0, 1)` doubles, generated once from a seeded PRNG
//! and never mutated afterwards. All kernels only read it.
//!
//! # Examples
//!
//! ```rust
//! use reduce_core::input::{generate_input, InputRng};
//!
//! let a = generate_input(1_000, 7);
//! let b = generate_input(1_000, 7);
//! assert_eq!(a, b);
//!
//! let mut rng = InputRng::from_seed(7);
//! let mut buffer = vec![0.0; 16];
//! rng.fill_uniform(&mut buffer);
//! assert!(buffer.iter().all(|&x| (0.0..1.0).contains(&x)));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Number of elements summed by the `sum` benchmark.
pub const DEFAULT_INPUT_SIZE: usize = 10_000_000;

/// Seed used when the caller does not choose one.
pub const DEFAULT_SEED: u64 = 42;

/// Seeded uniform generator for benchmark input.
///
/// The same seed always produces the same sequence, so repeated runs of a
/// benchmark sum identical data.
pub struct InputRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation.
    seed: u64,
}

impl InputRng {
    /// Creates a new generator initialised with the given seed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reduce_core::input::InputRng;
    ///
    /// let (mut a, mut b) = ([0.0; 8], [0.0; 8]);
    /// InputRng::from_seed(12345).fill_uniform(&mut a);
    /// InputRng::from_seed(12345).fill_uniform(&mut b);
    /// assert_eq!(a, b);
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fills the buffer with uniform values in `[0, 1)`.
    ///
    /// Empty buffers are a no-op.
    #[inline]
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.inner.gen();
        }
    }
}

/// Allocates `size` doubles and fills them from a generator seeded with `seed`.
pub fn generate_input(size: usize, seed: u64) -> Vec<f64> {
    debug!(size, seed, "generating benchmark input");
    let mut input = vec![0.0; size];
    InputRng::from_seed(seed).fill_uniform(&mut input);
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_retained() {
        let rng = InputRng::from_seed(99);
        assert_eq!(rng.seed(), 99);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        assert_eq!(generate_input(256, 3), generate_input(256, 3));
    }

    #[test]
    fn test_different_seed_different_sequence() {
        assert_ne!(generate_input(256, 3), generate_input(256, 4));
    }

    #[test]
    fn test_values_in_unit_interval() {
        let input = generate_input(10_000, DEFAULT_SEED);
        assert!(input.iter().all(|&x| (0.0..1.0).contains(&x)));
    }

    #[test]
    fn test_empty_input() {
        assert!(generate_input(0, DEFAULT_SEED).is_empty());

        let mut rng = InputRng::from_seed(1);
        rng.fill_uniform(&mut []);
    }

    #[test]
    fn test_mean_near_half() {
        let input = generate_input(100_000, DEFAULT_SEED);
        let mean = input.iter().sum::<f64>() / input.len() as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean = {}", mean);
    }
}
