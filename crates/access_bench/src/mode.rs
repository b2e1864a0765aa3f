// Benchmark modes as named on the command line.

use std::fmt;
use std::str::FromStr;

use crate::error::BenchError;
use crate::init::InitOrder;
use crate::slot::Padding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Sequential access, padded accumulators.
    Good,
    /// Sequential access, packed accumulators (false sharing).
    BadFs,
    /// Cache-unfriendly access, padded accumulators.
    BadMa,
    /// Single-threaded programs: cache-unfriendly access.
    Bad,
}

/// Modes of the multi-threaded programs.
pub const PARALLEL_MODES: &[Mode] = &[Mode::Good, Mode::BadFs, Mode::BadMa];

/// Modes of the single-threaded program.
pub const SERIAL_MODES: &[Mode] = &[Mode::Good, Mode::Bad];

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Good => "good",
            Mode::BadFs => "bad-fs",
            Mode::BadMa => "bad-ma",
            Mode::Bad => "bad",
        }
    }

    /// Accumulator layout used by this mode.
    pub fn padding(self) -> Padding {
        match self {
            Mode::BadFs => Padding::Packed,
            _ => Padding::Padded,
        }
    }

    /// Whether this mode swaps in the cache-unfriendly access pattern.
    pub fn bad_access(self) -> bool {
        matches!(self, Mode::BadMa | Mode::Bad)
    }

    pub fn init_order(self) -> InitOrder {
        match self {
            Mode::Good => InitOrder::RowMajor,
            Mode::BadFs => InitOrder::ThreadInterleaved,
            Mode::BadMa | Mode::Bad => InitOrder::ColumnMajor,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Mode::Good),
            "bad-fs" => Ok(Mode::BadFs),
            "bad-ma" => Ok(Mode::BadMa),
            "bad" => Ok(Mode::Bad),
            _ => Err(BenchError::InvalidArgument(format!("Invalid mode: {s}"))),
        }
    }
}

/// Parse `s` as one of `allowed`. Matching is exact and case-sensitive.
pub fn parse_mode(s: &str, allowed: &[Mode]) -> Result<Mode, BenchError> {
    match s.parse::<Mode>() {
        Ok(mode) if allowed.contains(&mode) => Ok(mode),
        _ => Err(BenchError::InvalidArgument(format!("Invalid mode: {s}"))),
    }
}

/// "good, bad-fs, bad-ma"
pub fn describe(modes: &[Mode]) -> String {
    modes
        .iter()
        .map(|mode| mode.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
