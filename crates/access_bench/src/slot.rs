// Per-worker partial accumulators, with and without cache line padding.

use std::mem::{align_of, size_of};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{BenchError, Result};

/// Cache line size assumed for padding (bytes).
pub const CACHE_LINE_SIZE: usize = 64;

/// Memory layout of the accumulator array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// One slot per cache line; workers never touch each other's lines.
    Padded,
    /// Slots packed back to back, eight to a cache line (false sharing).
    Packed,
}

impl Padding {
    pub fn slot_size(self) -> usize {
        match self {
            Padding::Padded => size_of::<PaddedSlot>(),
            Padding::Packed => size_of::<PackedSlot>(),
        }
    }
}

/// A worker's private partial result.
///
/// A slot has exactly one writer during the parallel phase, so `add` is a
/// plain load followed by a store. It still goes through memory on every call,
/// which is what makes the packed layout slow.
pub trait AccumulatorSlot: Send + Sync {
    fn new() -> Self;

    fn add(&self, value: u64);

    fn value(&self) -> u64;
}

/// Accumulator that owns a whole cache line.
#[repr(C, align(64))]
#[derive(Debug)]
pub struct PaddedSlot {
    value: AtomicU64,
    _padding: [u8; CACHE_LINE_SIZE - size_of::<AtomicU64>()],
}

const _: () = assert!(size_of::<PaddedSlot>() >= CACHE_LINE_SIZE);
const _: () = assert!(align_of::<PaddedSlot>() >= CACHE_LINE_SIZE);

impl AccumulatorSlot for PaddedSlot {
    fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
            _padding: [0; CACHE_LINE_SIZE - size_of::<AtomicU64>()],
        }
    }

    #[inline]
    fn add(&self, value: u64) {
        let current = self.value.load(Ordering::Relaxed);
        self.value.store(current.wrapping_add(value), Ordering::Relaxed);
    }

    fn value(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Bare accumulator; neighbouring slots share a cache line.
#[repr(transparent)]
#[derive(Debug)]
pub struct PackedSlot {
    value: AtomicU64,
}

const _: () = assert!(size_of::<PackedSlot>() == size_of::<u64>());

impl AccumulatorSlot for PackedSlot {
    fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    #[inline]
    fn add(&self, value: u64) {
        let current = self.value.load(Ordering::Relaxed);
        self.value.store(current.wrapping_add(value), Ordering::Relaxed);
    }

    fn value(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Allocate `count` zeroed slots.
pub fn allocate_slots<S: AccumulatorSlot>(count: usize) -> Result<Vec<S>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(count)
        .map_err(|_| BenchError::Allocation {
            what: "partial accumulators",
            elements: count,
        })?;
    slots.extend((0..count).map(|_| S::new()));
    Ok(slots)
}

/// Serial aggregation of the partial results.
pub fn total<S: AccumulatorSlot>(slots: &[S]) -> u64 {
    slots
        .iter()
        .fold(0u64, |acc, slot| acc.wrapping_add(slot.value()))
}
