//! Engine module: compact 2048 board, shift/merge ops with per-move score
//! deltas, and precomputed lookup tables.
//!
//! - `Board` is the packed 4x4 state with value-returning methods.
//! - Internals (tables and the line algorithm) live in submodules.

mod ops;
pub mod state;
mod tables;

pub use state::{Board, Move, Score};

/// Build the precomputed line tables up front.
/// Safe to call multiple times; tables otherwise build lazily on first shift.
pub fn new() {
    tables::init();
}
