//! Strategy selection by benchmark name.

use std::fmt;
use std::str::FromStr;

use crate::error::ReduceError;
use crate::kernels::{
    CriticalSum, LocalSum, PaddedLocalSum, ReductionKernel, ReductionSum, SerialSum,
};
use crate::pool::WorkerPool;

/// Summation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Sequential accumulation on the calling thread.
    Serial,

    /// One mutex-guarded accumulator, locked for every element.
    Critical,

    /// Static partials combined by the runtime's reduction.
    Omp,

    /// Per-worker slots in a dense array.
    Local,

    /// Per-worker slots padded to separate cache lines.
    OptLocal,
}

impl Strategy {
    /// Every strategy, serial first.
    pub const ALL: [Strategy; 5] = [
        Strategy::Serial,
        Strategy::Critical,
        Strategy::Omp,
        Strategy::Local,
        Strategy::OptLocal,
    ];

    /// Strategies selectable with a thread count.
    pub const PARALLEL: [Strategy; 4] = [
        Strategy::Critical,
        Strategy::Omp,
        Strategy::Local,
        Strategy::OptLocal,
    ];

    /// Returns the benchmark name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::Critical => "critical",
            Self::Omp => "omp",
            Self::Local => "local",
            Self::OptLocal => "opt_local",
        }
    }

    /// Returns whether this strategy runs on a worker pool.
    #[inline]
    pub fn is_parallel(&self) -> bool {
        !matches!(self, Self::Serial)
    }

    /// Sums `input` with this strategy. `Serial` ignores `pool`.
    pub fn run(&self, pool: &WorkerPool, input: &[f64]) -> f64 {
        match self {
            Self::Serial => SerialSum.sum(input),
            Self::Critical => CriticalSum::new(pool).sum(input),
            Self::Omp => ReductionSum::new(pool).sum(input),
            Self::Local => LocalSum::new(pool).sum(input),
            Self::OptLocal => PaddedLocalSum::new(pool).sum(input),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ReduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| ReduceError::UnknownStrategy(s.to_string()))
    }
}
