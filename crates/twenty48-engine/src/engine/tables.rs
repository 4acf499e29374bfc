use std::sync::OnceLock;

use super::ops;
use super::state::{Move, Score};

/// Precomputed lookup tables for all possible 4-tile lines (16-bit packed).
///
/// Shifting/merging a row or column depends only on its 4 nibbles, and
/// there are 2^16 possible 16-bit values. We precompute the result of
/// shifting each line left/right/up/down plus the score delta its merges
/// produce. This keeps moves branch-light at runtime.
///
/// Layout:
/// - `shift_left/right[i]`: replacement row-packed line after the move.
/// - `shift_up/down[i]`: replacement column-packed line after the move.
/// - `merge_score[i]`: sum of merged result values for the line. Greedy
///   pairing merges the same pairs from either end of a line, so one table
///   serves all four directions.
///
/// Access is via `stores()`, which lazily builds a single global `Stores`
/// on first use; `engine::new()` forces the build early.
pub(crate) struct Stores {
    pub(crate) shift_left: Box<[u64]>,
    pub(crate) shift_right: Box<[u64]>,
    pub(crate) shift_up: Box<[u64]>,
    pub(crate) shift_down: Box<[u64]>,
    pub(crate) merge_score: Box<[Score]>,
}

const LINE_TABLE_SIZE: usize = 0x1_0000; // 65,536 possible 16-bit lines

static STORES: OnceLock<Stores> = OnceLock::new();

/// Force table construction.
pub(crate) fn init() {
    let _ = stores();
}

#[inline(always)]
pub(crate) fn stores() -> &'static Stores {
    STORES.get_or_init(create_stores)
}

fn create_stores() -> Stores {
    // Allocate on the heap to keep stack frames small during init.
    let mut shift_left = vec![0u64; LINE_TABLE_SIZE];
    let mut shift_right = vec![0u64; LINE_TABLE_SIZE];
    let mut shift_up = vec![0u64; LINE_TABLE_SIZE];
    let mut shift_down = vec![0u64; LINE_TABLE_SIZE];
    let mut merge_score = vec![0u64; LINE_TABLE_SIZE];

    for val in 0..LINE_TABLE_SIZE {
        let line = val as u64;
        let (left, delta) = ops::shift_line(line, Move::Left);
        shift_left[val] = left;
        shift_right[val] = ops::shift_line(line, Move::Right).0;
        shift_up[val] = ops::shift_line(line, Move::Up).0;
        shift_down[val] = ops::shift_line(line, Move::Down).0;
        merge_score[val] = delta;
    }

    Stores {
        shift_left: shift_left.into_boxed_slice(),
        shift_right: shift_right.into_boxed_slice(),
        shift_up: shift_up.into_boxed_slice(),
        shift_down: shift_down.into_boxed_slice(),
        merge_score: merge_score.into_boxed_slice(),
    }
}

#[inline(always)]
pub(crate) fn get_line_entry(table: &[u64], idx: u16) -> u64 {
    debug_assert!((idx as usize) < LINE_TABLE_SIZE);
    unsafe { *table.get_unchecked(idx as usize) }
}

#[inline(always)]
pub(crate) fn get_merge_score(idx: u16) -> Score {
    debug_assert!((idx as usize) < LINE_TABLE_SIZE);
    let table = &stores().merge_score;
    unsafe { *table.get_unchecked(idx as usize) }
}
