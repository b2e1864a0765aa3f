// Matrix initialization benchmark: the same fill, written in three orders.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use ndarray::{ArrayViewMut2, Axis};
use rayon::ThreadPool;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::partition::Partition;

/// Value written by every initialization order.
pub const FILL_VALUE: i32 = 17;

/// Row and column of the cell reported after a run.
pub const PROBE: (usize, usize) = (17, 17);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOrder {
    /// Rows split across threads, each row written front to back.
    RowMajor,
    /// Columns split across threads; worker `t` writes `FILL_VALUE + t`
    /// into rows `t, t + T, t + 2T, ...` of each column it owns, so
    /// threads interleave their writes within the same cache lines.
    ThreadInterleaved,
    /// Columns split across threads, each column written top to bottom.
    ColumnMajor,
}

impl InitOrder {
    fn split_axis(self) -> Axis {
        match self {
            InitOrder::RowMajor => Axis(0),
            InitOrder::ThreadInterleaved | InitOrder::ColumnMajor => Axis(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOutcome {
    /// Value of the cell at [`PROBE`], if the matrix is large enough.
    pub probe: Option<i32>,
    pub elapsed: Duration,
}

/// Fill `matrix` in the given order using every thread of `pool`.
///
/// Worker `t` of the pool always gets the `t`th contiguous block of rows
/// (or columns) of a [`Partition`], so the result does not depend on
/// scheduling.
pub fn initialize(
    matrix: &mut Matrix<i32>,
    order: InitOrder,
    pool: &ThreadPool,
) -> Result<InitOutcome> {
    let n = matrix.side();
    let threads = pool.current_num_threads();
    let partition = Partition::new(n, threads)?;

    let blocks: Vec<Mutex<ArrayViewMut2<'_, i32>>> =
        split_blocks(matrix.array_mut().view_mut(), order.split_axis(), &partition)
            .into_iter()
            .map(Mutex::new)
            .collect();

    let start = Instant::now();

    pool.broadcast(|ctx| {
        let tid = ctx.index();
        // each worker locks only its own block
        let mut block = blocks[tid].lock().unwrap_or_else(PoisonError::into_inner);

        match order {
            InitOrder::RowMajor => block.fill(FILL_VALUE),
            InitOrder::ColumnMajor => {
                for mut col in block.columns_mut() {
                    for value in col.iter_mut() {
                        *value = FILL_VALUE;
                    }
                }
            }
            InitOrder::ThreadInterleaved => {
                for mut col in block.columns_mut() {
                    for row in (tid..n).step_by(threads) {
                        col[row] = FILL_VALUE + tid as i32;
                    }
                }
            }
        }
    });

    let elapsed = start.elapsed();
    drop(blocks);

    Ok(InitOutcome {
        probe: matrix.get(PROBE.0, PROBE.1),
        elapsed,
    })
}

/// Cut `view` along `axis` into one block per worker of `partition`.
fn split_blocks<'a>(
    mut view: ArrayViewMut2<'a, i32>,
    axis: Axis,
    partition: &Partition,
) -> Vec<ArrayViewMut2<'a, i32>> {
    let mut blocks = Vec::with_capacity(partition.workers());
    for range in partition.ranges() {
        let (head, tail) = view.split_at(axis, range.len());
        blocks.push(head);
        view = tail;
    }
    blocks
}
