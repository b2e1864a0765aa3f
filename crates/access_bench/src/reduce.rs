// Partitioned parallel reduction: one worker per pool thread, each adding
// into its own accumulator slot, followed by a serial sum of the slots.

use std::time::{Duration, Instant};

use rayon::{ThreadPool, prelude::*};

use crate::access::{self, IndexPlan, StrideWarning};
use crate::error::{BenchError, Result};
use crate::partition::Partition;
use crate::slot::{self, AccumulatorSlot, PackedSlot, PaddedSlot, Padding};

/// What each visited position contributes to the result.
#[derive(Debug, Clone, Copy)]
pub enum Workload<'a> {
    /// Add `data[i]`.
    Sum(&'a [u64]),
    /// Count positions where the two inputs differ.
    Compare(&'a [u64], &'a [u64]),
}

impl<'a> Workload<'a> {
    pub fn compare(left: &'a [u64], right: &'a [u64]) -> Result<Self> {
        if left.len() != right.len() {
            return Err(BenchError::LengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }
        Ok(Workload::Compare(left, right))
    }

    pub fn len(&self) -> usize {
        match self {
            Workload::Sum(data) => data.len(),
            Workload::Compare(left, _) => left.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one timed reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReductionOutcome {
    pub total: u64,
    pub elapsed: Duration,
    pub warning: Option<StrideWarning>,
}

impl ReductionOutcome {
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Run `workload` over every pool thread with the given slot layout.
///
/// The timer covers the parallel region and the aggregation, not the slot
/// allocation.
///
/// __Arguments:__
///
/// + `pool` - one worker runs on each of its threads; worker `t` owns the
///   `t`th range of a [`Partition`] of the input
///
/// + `workload` - the input(s) and what each visited position contributes
///
/// + `plan` - maps a worker's logical indices to input positions
///
/// + `padding` - whether the partial results get a cache line each or are
///   packed together (false sharing)
///
pub fn reduce(
    pool: &ThreadPool,
    workload: Workload<'_>,
    plan: IndexPlan<'_>,
    padding: Padding,
) -> Result<ReductionOutcome> {
    match padding {
        Padding::Padded => reduce_with::<PaddedSlot>(pool, workload, plan),
        Padding::Packed => reduce_with::<PackedSlot>(pool, workload, plan),
    }
}

pub fn reduce_with<S: AccumulatorSlot>(
    pool: &ThreadPool,
    workload: Workload<'_>,
    plan: IndexPlan<'_>,
) -> Result<ReductionOutcome> {
    let workers = pool.current_num_threads();
    let partition = Partition::new(workload.len(), workers)?;
    let slots = slot::allocate_slots::<S>(workers)?;

    if let IndexPlan::Random(permutation) = plan {
        if permutation.len() != workload.len() {
            return Err(BenchError::LengthMismatch {
                left: workload.len(),
                right: permutation.len(),
            });
        }
    }

    let start = Instant::now();

    // every pool thread runs exactly one worker; broadcast returns after all of them
    pool.broadcast(|ctx| {
        let worker = ctx.index();
        let slot = &slots[worker];
        let range = partition.range(worker);

        match workload {
            Workload::Sum(data) => plan.for_each(range, |i| slot.add(data[i])),
            Workload::Compare(left, right) => plan.for_each(range, |i| {
                if left[i] != right[i] {
                    slot.add(1);
                }
            }),
        }
    });

    let total = slot::total(&slots);
    let elapsed = start.elapsed();

    let warning = match plan {
        IndexPlan::Strided { stride, len } => access::stride_coverage(stride, len),
        _ => None,
    };
    if let Some(warning) = &warning {
        log::warn!("{warning}");
    }

    Ok(ReductionOutcome {
        total,
        elapsed,
        warning,
    })
}

/// Read-modify-write pass: increment every element, summing the new values.
pub fn increment_and_sum(pool: &ThreadPool, data: &mut [u64]) -> Result<ReductionOutcome> {
    let partition = Partition::new(data.len(), pool.current_num_threads())?;
    let pieces = partition.split_mut(data);

    let start = Instant::now();

    let partials: Vec<u64> = pool.install(|| {
        pieces
            .into_par_iter()
            .map(|(_, piece)| {
                let mut sum = 0u64;
                for value in piece.iter_mut() {
                    *value = value.wrapping_add(1);
                    sum = sum.wrapping_add(*value);
                }
                sum
            })
            .collect()
    });
    let total = partials.iter().fold(0u64, |acc, &p| acc.wrapping_add(p));
    let elapsed = start.elapsed();

    Ok(ReductionOutcome {
        total,
        elapsed,
        warning: None,
    })
}
