// Access patterns: how a worker turns its logical index range into the
// buffer positions it actually reads.

use std::fmt;
use std::ops::Range;

use crate::error::{BenchError, Result};

/// Which positions a worker reads for the logical indices it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPattern {
    /// Position `i`.
    Linear,
    /// Position `(i * stride) mod len`. Only a permutation when `stride` and
    /// `len` are co-prime.
    Strided { stride: usize },
    /// Positions `i` with `i mod step == 0`; every other index is skipped.
    Stepped { step: usize },
    /// Position `permutation[i]` for a shuffled index permutation.
    Random,
}

impl AccessPattern {
    pub fn validate(self) -> Result<Self> {
        match self {
            AccessPattern::Strided { stride: 0 } => Err(BenchError::InvalidArgument(
                "Stride must be a positive integer.".to_string(),
            )),
            AccessPattern::Stepped { step: 0 } => Err(BenchError::InvalidArgument(
                "Step must be a positive integer.".to_string(),
            )),
            pattern => Ok(pattern),
        }
    }

    pub fn needs_permutation(self) -> bool {
        matches!(self, AccessPattern::Random)
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessPattern::Linear => write!(f, "linear"),
            AccessPattern::Strided { stride } => write!(f, "strided (stride {stride})"),
            AccessPattern::Stepped { step } => write!(f, "stepped (step {step})"),
            AccessPattern::Random => write!(f, "random"),
        }
    }
}

/// A strided walk that does not reach every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrideWarning {
    pub stride: usize,
    pub len: usize,
    pub gcd: usize,
}

impl fmt::Display for StrideWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stride={} and size={} are not co-prime. Sum will not include all elements.",
            self.stride, self.len
        )
    }
}

pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let rem = a % b;
        a = b;
        b = rem;
    }
    a
}

/// `Some` when a strided walk of `len` elements misses some of them.
pub fn stride_coverage(stride: usize, len: usize) -> Option<StrideWarning> {
    let divisor = gcd(stride, len);
    (divisor != 1).then_some(StrideWarning {
        stride,
        len,
        gcd: divisor,
    })
}

/// An access pattern bound to its input length (and permutation, if random).
#[derive(Debug, Clone, Copy)]
pub enum IndexPlan<'a> {
    Linear,
    Strided { stride: usize, len: usize },
    Stepped { step: usize },
    Random(&'a [usize]),
}

impl IndexPlan<'_> {
    /// Call `visit` with every buffer position read for the logical `range`.
    #[inline]
    pub fn for_each(&self, range: Range<usize>, mut visit: impl FnMut(usize)) {
        match *self {
            IndexPlan::Linear => range.for_each(visit),
            IndexPlan::Strided { stride, len } => {
                let stride = (stride % len.max(1)) as u128;
                let len = len as u128;
                for i in range {
                    visit(((i as u128 * stride) % len) as usize);
                }
            }
            IndexPlan::Stepped { step } => {
                let first = range.start.div_ceil(step) * step;
                (first..range.end).step_by(step).for_each(visit);
            }
            IndexPlan::Random(permutation) => {
                for &index in &permutation[range] {
                    visit(index);
                }
            }
        }
    }
}
