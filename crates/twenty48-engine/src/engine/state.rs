use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ops;

// Internal type aliases for the packed representation
pub(crate) type BoardRaw = u64;
pub(crate) type Line = u64;

/// Cumulative or per-move score. Merges contribute the merged result value.
pub type Score = u64;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// Packed 4x4 2048 board as 16 4-bit exponent nibbles in a `u64`.
///
/// Nibble `e` encodes the cell value `2^e`; 0 encodes an empty cell.
/// Cells are row-major with the top-left cell in the most significant
/// nibble. `Board` is `Copy` and every operation returns a new value, so
/// callers can hold the previous board for comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(pub(crate) BoardRaw);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board(0);

    /// Construct a `Board` from its raw packed representation.
    #[inline]
    pub fn from_raw(raw: BoardRaw) -> Self {
        Board(raw)
    }

    /// Consume this `Board`, returning the raw packed `u64`.
    #[inline]
    pub fn into_raw(self) -> BoardRaw {
        self.0
    }

    /// Borrow the raw packed `u64` for this `Board`.
    #[inline]
    pub fn raw(&self) -> BoardRaw {
        self.0
    }

    /// Construct a `Board` from a grid of cell values (0 or a power of two).
    ///
    /// ```
    /// use twenty48_engine::engine::Board;
    /// let b = Board::from_cells([[2, 0, 0, 0], [0, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
    /// assert_eq!(b.count_empty(), 14);
    /// assert_eq!(b.to_cells()[1][1], 4);
    /// ```
    pub fn from_cells(cells: [[u32; 4]; 4]) -> Self {
        let mut raw: BoardRaw = 0;
        for (r, row) in cells.iter().enumerate() {
            for (c, &val) in row.iter().enumerate() {
                let exp = if val == 0 {
                    0
                } else {
                    debug_assert!(val.is_power_of_two(), "cell value must be a power of two");
                    val.trailing_zeros() as u64
                };
                debug_assert!(exp <= 0xf, "cell value too large for a nibble");
                raw |= exp << (60 - 4 * (4 * r + c));
            }
        }
        Board(raw)
    }

    /// Expand the packed board into a grid of actual cell values.
    pub fn to_cells(self) -> [[u32; 4]; 4] {
        let mut cells = [[0u32; 4]; 4];
        for (idx, exp) in self.tiles().enumerate() {
            if exp != 0 {
                cells[idx / 4][idx % 4] = 1 << exp;
            }
        }
        cells
    }

    /// Return the board resulting from sliding/merging tiles in `dir`.
    /// No randomness; the merge score delta is discarded.
    ///
    /// ```
    /// use twenty48_engine::engine::{Board, Move};
    /// assert_eq!(Board::EMPTY.shift(Move::Left), Board::EMPTY);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self {
        ops::shift_scored(self, dir).0
    }

    /// Like `shift`, but also returns the score delta its merges produced.
    ///
    /// ```
    /// use twenty48_engine::engine::{Board, Move};
    /// let b = Board::from_cells([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// let (shifted, delta) = b.shift_scored(Move::Left);
    /// assert_eq!(shifted.to_cells()[0][0], 4);
    /// assert_eq!(delta, 4);
    /// ```
    #[inline]
    pub fn shift_scored(self, dir: Move) -> (Self, Score) {
        ops::shift_scored(self, dir)
    }

    /// Place a random 2 (90%) or 4 (10%) tile on a uniformly random empty
    /// cell. A full board is returned unchanged.
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use twenty48_engine::engine::Board;
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 15);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let empty = ops::count_empty(self);
        if empty == 0 {
            return self;
        }
        let mut slot = rng.gen_range(0..empty);
        let exp = ops::generate_random_tile(rng);
        for idx in 0..16 {
            let shift = 60 - 4 * idx;
            if (self.0 >> shift) & 0xf != 0 {
                continue;
            }
            if slot == 0 {
                return Board(self.0 | (exp << shift));
            }
            slot -= 1;
        }
        unreachable!("empty-cell count disagrees with the nibble scan")
    }

    /// True once the board is full and no two adjacent cells (either axis)
    /// hold equal values, i.e. no move in any direction can change it.
    #[inline]
    pub fn is_game_over(self) -> bool {
        ops::is_game_over(self)
    }

    /// True if any cell holds exactly the winning 2048 tile.
    #[inline]
    pub fn has_winning_tile(self) -> bool {
        ops::has_winning_tile(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> u64 {
        ops::count_empty(self)
    }

    /// The highest cell value present, or 0 for an empty board.
    #[inline]
    pub fn highest_tile(self) -> u32 {
        ops::highest_tile(self)
    }

    /// Iterate over tile exponents in row-major order.
    /// Yields 0 for empty, 1 for 2, 2 for 4, etc.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter { raw: self.0, idx: 0 }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:#018x})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<_> = self.tiles().map(ops::format_val).collect();
        for (r, row) in cells.chunks(4).enumerate() {
            if r > 0 {
                writeln!(f, "--------------------------------")?;
            }
            writeln!(f, "{}|{}|{}|{}", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

impl From<BoardRaw> for Board {
    fn from(v: BoardRaw) -> Self {
        Board::from_raw(v)
    }
}
impl From<Board> for BoardRaw {
    fn from(b: Board) -> Self {
        b.into_raw()
    }
}

/// Iterator over board tiles (exponents) in row-major order.
pub struct TilesIter {
    raw: BoardRaw,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = u8;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= 16 {
            return None;
        }
        let n = ((self.raw >> (60 - 4 * self.idx)) & 0xf) as u8;
        self.idx += 1;
        Some(n)
    }
}

impl IntoIterator for Board {
    type Item = u8;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}
