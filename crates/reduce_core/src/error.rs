//! Error types for the reduction kernels and benchmark harness.

use thiserror::Error;

/// Reduction error.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// Strategy name not recognised.
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    /// Worker count outside what a pool can run.
    #[error("Invalid thread count {0}: must be between 1 and rayon::max_num_threads()")]
    InvalidThreadCount(usize),

    /// The underlying rayon pool could not be built.
    #[error("Thread pool construction failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Invalid benchmark configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for reduction operations.
pub type Result<T> = std::result::Result<T, ReduceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReduceError::UnknownStrategy("atomic".to_string());
        assert!(err.to_string().contains("atomic"));

        let err = ReduceError::InvalidThreadCount(0);
        assert!(err.to_string().contains("Invalid thread count 0"));

        let err = ReduceError::InvalidConfig("iterations must be greater than 0".to_string());
        assert!(err.to_string().contains("iterations"));
    }
}
