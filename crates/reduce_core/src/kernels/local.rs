//! Per-worker accumulation into a shared slot array.
//!
//! Both kernels give every worker its own accumulator slot, let each worker
//! add its static chunk into that slot, and finish with a sequential pass
//! over the slots in worker order.
//!
//! The only difference is slot layout. [`SharedSlot`] is eight bytes, so
//! neighbouring workers' slots sit in the same cache line and every store
//! invalidates the line in the other cores (false sharing). [`PaddedSlot`]
//! aligns each slot to 128 bytes, which keeps each slot on a line of its own
//! (and off the adjacent line pulled in by spatial prefetchers).
//!
//! Slots are written with relaxed atomic load/store pairs. Each slot has a
//! single writer, so no read-modify-write is needed, but unlike a `&mut f64`
//! the stores cannot be kept in a register, which keeps the memory traffic
//! the benchmark is meant to show.

use std::sync::atomic::{AtomicU64, Ordering};

use super::ReductionKernel;
use crate::pool::{StaticPartition, WorkerPool};

/// An `f64` accumulator owned by one worker and readable by the caller.
pub trait AccumulatorSlot: Default + Sync {
    /// Adds `value` to the slot. Only the owning worker may call this.
    fn add(&self, value: f64);

    /// Returns the accumulated value.
    fn value(&self) -> f64;
}

/// Dense eight-byte accumulator slot.
#[derive(Debug)]
#[repr(transparent)]
pub struct SharedSlot(AtomicU64);

impl Default for SharedSlot {
    fn default() -> Self {
        Self(AtomicU64::new(0.0_f64.to_bits()))
    }
}

impl AccumulatorSlot for SharedSlot {
    #[inline]
    fn add(&self, value: f64) {
        let current = f64::from_bits(self.0.load(Ordering::Relaxed));
        self.0.store((current + value).to_bits(), Ordering::Relaxed);
    }

    #[inline]
    fn value(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// Accumulator slot padded out to 128 bytes.
#[derive(Debug, Default)]
#[repr(C, align(128))]
pub struct PaddedSlot {
    slot: SharedSlot,
}

const _: () = assert!(std::mem::size_of::<PaddedSlot>() >= 128);

impl AccumulatorSlot for PaddedSlot {
    #[inline]
    fn add(&self, value: f64) {
        self.slot.add(value);
    }

    #[inline]
    fn value(&self) -> f64 {
        self.slot.value()
    }
}

fn slot_sum<S: AccumulatorSlot>(pool: &WorkerPool, input: &[f64]) -> f64 {
    let slots: Vec<S> = (0..pool.num_threads()).map(|_| S::default()).collect();
    let partition = StaticPartition::new(input.len(), pool.num_threads());

    pool.parallel_region(|worker| {
        let slot = &slots[worker];
        for &x in &input[partition.chunk(worker)] {
            slot.add(x);
        }
    });

    slots.iter().fold(0.0, |acc, slot| acc + slot.value())
}

/// Per-worker accumulation into adjacent slots (false sharing).
#[derive(Clone, Copy, Debug)]
pub struct LocalSum<'a> {
    pool: &'a WorkerPool,
}

impl<'a> LocalSum<'a> {
    /// Creates the kernel over `pool`.
    pub fn new(pool: &'a WorkerPool) -> Self {
        Self { pool }
    }
}

impl ReductionKernel for LocalSum<'_> {
    fn name(&self) -> &'static str {
        "local"
    }

    fn sum(&self, input: &[f64]) -> f64 {
        slot_sum::<SharedSlot>(self.pool, input)
    }
}

/// Per-worker accumulation into cache-line-padded slots.
///
/// Memory-hungry but free of false sharing.
#[derive(Clone, Copy, Debug)]
pub struct PaddedLocalSum<'a> {
    pool: &'a WorkerPool,
}

impl<'a> PaddedLocalSum<'a> {
    /// Creates the kernel over `pool`.
    pub fn new(pool: &'a WorkerPool) -> Self {
        Self { pool }
    }
}

impl ReductionKernel for PaddedLocalSum<'_> {
    fn name(&self) -> &'static str {
        "opt_local"
    }

    fn sum(&self, input: &[f64]) -> f64 {
        slot_sum::<PaddedSlot>(self.pool, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::generate_input;

    #[test]
    fn test_slot_layout() {
        assert_eq!(std::mem::size_of::<SharedSlot>(), 8);
        assert_eq!(std::mem::align_of::<PaddedSlot>(), 128);

        let slots: Vec<PaddedSlot> = (0..2).map(|_| PaddedSlot::default()).collect();
        let a = &slots[0] as *const PaddedSlot as usize;
        let b = &slots[1] as *const PaddedSlot as usize;
        assert!(b - a >= 128);
    }

    #[test]
    fn test_slot_accumulates() {
        let slot = SharedSlot::default();
        assert_eq!(slot.value(), 0.0);
        slot.add(1.5);
        slot.add(2.5);
        assert_eq!(slot.value(), 4.0);

        let padded = PaddedSlot::default();
        padded.add(-3.0);
        assert_eq!(padded.value(), -3.0);
    }

    #[test]
    fn test_local_and_padded_identical() {
        let input = generate_input(100_003, 11);

        for threads in [1, 2, 5] {
            let pool = WorkerPool::new(threads).unwrap();
            let local = LocalSum::new(&pool).sum(&input);
            let padded = PaddedLocalSum::new(&pool).sum(&input);
            assert_eq!(local.to_bits(), padded.to_bits(), "threads = {}", threads);
        }
    }

    #[test]
    fn test_local_single_thread_matches_serial() {
        let pool = WorkerPool::new(1).unwrap();
        let input = generate_input(1_000, 5);
        let serial = input.iter().fold(0.0, |acc, &x| acc + x);
        assert_eq!(LocalSum::new(&pool).sum(&input), serial);
    }
}
