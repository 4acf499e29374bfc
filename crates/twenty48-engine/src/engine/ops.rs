use rand::Rng;

use super::state::{Board, BoardRaw, Line, Move, Score};
use super::tables::{get_line_entry, get_merge_score, stores};

/// Exponent of the winning tile (2^11 = 2048).
const WIN_EXPONENT: u8 = 11;

/// Slide/merge tiles in the given direction and return the new board plus
/// the score delta its merges produced. No randomness.
pub(crate) fn shift_scored(board: Board, direction: Move) -> (Board, Score) {
    match direction {
        Move::Left | Move::Right => shift_rows(board, direction),
        Move::Up | Move::Down => shift_cols(board, direction),
    }
}

// Credit to Nneonneo
pub(crate) fn transpose(x: BoardRaw) -> BoardRaw {
    let a1 = x & 0xF0F00F0FF0F00F0F;
    let a2 = x & 0x0000F0F00000F0F0;
    let a3 = x & 0x0F0F00000F0F0000;
    let a = a1 | (a2 << 12) | (a3 >> 12);
    let b1 = a & 0xFF00FF0000FF00FF;
    let b2 = a & 0x00FF00FF00000000;
    let b3 = a & 0x00000000FF00FF00;
    b1 | (b2 >> 24) | (b3 << 24)
}

pub(crate) fn extract_line(board: BoardRaw, line_idx: usize) -> Line {
    (board >> ((3 - line_idx) * 16)) & 0xffff
}

/// Full board, no equal horizontal neighbors, no equal vertical neighbors:
/// no compaction or merge can change any line in any direction.
pub(crate) fn is_game_over(board: Board) -> bool {
    count_empty(board) == 0
        && !has_adjacent_pair(board.0)
        && !has_adjacent_pair(transpose(board.0))
}

fn has_adjacent_pair(raw: BoardRaw) -> bool {
    (0..4).any(|row| {
        let line = extract_line(raw, row);
        (0..3).any(|i| {
            let a = (line >> ((3 - i) * 4)) & 0xf;
            let b = (line >> ((2 - i) * 4)) & 0xf;
            a != 0 && a == b
        })
    })
}

pub(crate) fn has_winning_tile(board: Board) -> bool {
    board.tiles().any(|exp| exp == WIN_EXPONENT)
}

// https://stackoverflow.com/questions/38225571/count-number-of-zero-nibbles-in-an-unsigned-64-bit-integer
/// Count the number of zero tiles.
pub(crate) fn count_empty(board: Board) -> u64 {
    let mut raw = board.0;
    raw |= raw >> 1;
    raw |= raw >> 2;
    raw &= 0x1111111111111111;
    16 - raw.count_ones() as u64
}

/// Draw the exponent for a fresh tile: 2 with probability 0.9, else 4.
pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    if rng.gen_range(0..10) < 9 {
        1
    } else {
        2
    }
}

pub(crate) fn highest_tile(board: Board) -> u32 {
    match board.tiles().max() {
        Some(0) | None => 0,
        Some(exp) => 1 << exp,
    }
}

fn shift_rows(board: Board, move_dir: Move) -> (Board, Score) {
    let s = stores();
    let table: &[u64] = match move_dir {
        Move::Left => &s.shift_left,
        Move::Right => &s.shift_right,
        _ => panic!("shift_rows called with a vertical move"),
    };
    let mut raw = 0;
    let mut delta = 0;
    for row_idx in 0..4 {
        let row = extract_line(board.0, row_idx) as u16;
        raw |= get_line_entry(table, row) << (48 - 16 * row_idx);
        delta += get_merge_score(row);
    }
    (Board(raw), delta)
}

fn shift_cols(board: Board, move_dir: Move) -> (Board, Score) {
    let transposed = transpose(board.0);
    let s = stores();
    let table: &[u64] = match move_dir {
        Move::Up => &s.shift_up,
        Move::Down => &s.shift_down,
        _ => panic!("shift_cols called with a horizontal move"),
    };
    let mut raw = 0;
    let mut delta = 0;
    for col_idx in 0..4 {
        let col = extract_line(transposed, col_idx) as u16;
        raw |= get_line_entry(table, col) << (12 - 4 * col_idx);
        delta += get_merge_score(col);
    }
    (Board(raw), delta)
}

/// Shift one line toward its leading edge: drop zeros, merge each adjacent
/// equal pair once (leading edge first, a merged result never merges again
/// in the same pass), then drop the zeros merging left behind. Returns the
/// shifted exponents and the score delta, i.e. the sum of merged result
/// values.
pub(crate) fn slide_line(tiles: [u8; 4]) -> ([u8; 4], Score) {
    let mut compact = [0u8; 4];
    let mut n = 0;
    for &t in &tiles {
        if t != 0 {
            compact[n] = t;
            n += 1;
        }
    }

    let mut delta: Score = 0;
    for i in 0..3 {
        if compact[i] != 0 && compact[i] == compact[i + 1] {
            // Nibble-packed tiles cap at 2^15.
            compact[i] = (compact[i] + 1).min(0xf);
            compact[i + 1] = 0;
            delta += 1 << compact[i];
        }
    }

    let mut out = [0u8; 4];
    let mut m = 0;
    for &t in &compact {
        if t != 0 {
            out[m] = t;
            m += 1;
        }
    }
    (out, delta)
}

/// Shift a packed 16-bit line in `direction`, returning the replacement
/// line (row-packed for Left/Right, column-packed for Up/Down) and the
/// merge score delta. Right/Down mirror Left/Up by reversing the sequence
/// before and after. Only used to build the lookup tables.
pub(crate) fn shift_line(line: Line, direction: Move) -> (Line, Score) {
    let mut tiles = line_tiles(line);
    let mirrored = matches!(direction, Move::Right | Move::Down);
    if mirrored {
        tiles.reverse();
    }
    let (mut slid, delta) = slide_line(tiles);
    if mirrored {
        slid.reverse();
    }
    let packed = match direction {
        Move::Left | Move::Right => pack_row(slid),
        Move::Up | Move::Down => pack_col(slid),
    };
    (packed, delta)
}

fn line_tiles(line: Line) -> [u8; 4] {
    let mut tiles = [0u8; 4];
    for (i, t) in tiles.iter_mut().enumerate() {
        *t = ((line >> ((3 - i) * 4)) & 0xf) as u8;
    }
    tiles
}

fn pack_row(tiles: [u8; 4]) -> Line {
    (tiles[0] as Line) << 12 | (tiles[1] as Line) << 8 | (tiles[2] as Line) << 4 | tiles[3] as Line
}

fn pack_col(tiles: [u8; 4]) -> Line {
    (tiles[0] as Line) << 48 | (tiles[1] as Line) << 32 | (tiles[2] as Line) << 16 | tiles[3] as Line
}

pub(crate) fn format_val(exp: u8) -> String {
    if exp == 0 {
        return String::from("       ");
    }
    format!("{:^7}", 1u32 << exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn slide_compacts_toward_leading_edge() {
        assert_eq!(slide_line([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
        assert_eq!(slide_line([0, 0, 0, 2]), ([2, 0, 0, 0], 0));
        // [2,0,0,4] -> [2,4,0,0], no merge
        assert_eq!(slide_line([1, 0, 0, 2]), ([1, 2, 0, 0], 0));
        assert_eq!(slide_line([1, 2, 1, 2]), ([1, 2, 1, 2], 0));
    }

    #[test]
    fn slide_merges_each_pair_once() {
        // [2,2,2,2] -> [4,4,0,0] with delta 8, never [8,0,0,0]
        assert_eq!(slide_line([1, 1, 1, 1]), ([2, 2, 0, 0], 8));
        // [2,2,4,4] -> [4,8,0,0]
        assert_eq!(slide_line([1, 1, 2, 2]), ([2, 3, 0, 0], 12));
        // a merged 8 does not chain into the adjacent 8
        assert_eq!(slide_line([2, 2, 3, 0]), ([3, 3, 0, 0], 8));
        // [2,2,2] merges the leading pair only
        assert_eq!(slide_line([1, 1, 1, 0]), ([2, 1, 0, 0], 4));
    }

    #[test]
    fn slide_merges_across_gaps() {
        // [0,2,0,2] -> [4,0,0,0] with delta 4
        assert_eq!(slide_line([0, 1, 0, 1]), ([2, 0, 0, 0], 4));
        assert_eq!(slide_line([5, 0, 0, 5]), ([6, 0, 0, 0], 64));
    }

    #[test]
    fn shift_left_packed_fixtures() {
        let cases = [
            (0x0000, 0x0000, 0),
            (0x0002, 0x2000, 0),
            (0x2020, 0x3000, 8),
            (0x1332, 0x1420, 16),
            (0x1234, 0x1234, 0),
            (0x1002, 0x1200, 0),
        ];
        for (line, expected, delta) in cases {
            let (board, d) = shift_scored(Board::from_raw(line), Move::Left);
            assert_eq!(board, Board::from_raw(expected), "line {:#06x}", line);
            assert_eq!(d, delta, "line {:#06x}", line);
        }
    }

    #[test]
    fn shift_right_packed_fixtures() {
        let cases = [
            (0x2000, 0x0002, 0),
            (0x2020, 0x0003, 8),
            (0x1332, 0x0142, 16),
            (0x1234, 0x1234, 0),
            (0x1002, 0x0012, 0),
        ];
        for (line, expected, delta) in cases {
            let (board, d) = shift_scored(Board::from_raw(line), Move::Right);
            assert_eq!(board, Board::from_raw(expected), "line {:#06x}", line);
            assert_eq!(d, delta, "line {:#06x}", line);
        }
    }

    #[test]
    fn shift_left_full_board() {
        let (board, delta) = shift_scored(Board::from_raw(0x1234133220021002), Move::Left);
        assert_eq!(board, Board::from_raw(0x1234142030001200));
        assert_eq!(delta, 24);
    }

    #[test]
    fn shift_right_full_board() {
        let (board, delta) = shift_scored(Board::from_raw(0x1234133220021002), Move::Right);
        assert_eq!(board, Board::from_raw(0x1234014200030012));
        assert_eq!(delta, 24);
    }

    #[test]
    fn shift_up_full_board() {
        let (board, delta) = shift_scored(Board::from_raw(0x1121230033004222), Move::Up);
        assert_eq!(board, Board::from_raw(0x1131240232004000));
        assert_eq!(delta, 24);
    }

    #[test]
    fn shift_down_full_board() {
        let (board, delta) = shift_scored(Board::from_raw(0x1121230033004222), Move::Down);
        assert_eq!(board, Board::from_raw(0x1000210034014232));
        assert_eq!(delta, 24);
    }

    fn reverse_rows(raw: BoardRaw) -> BoardRaw {
        let mut out = 0;
        for row in 0..4 {
            let line = extract_line(raw, row);
            let rev = (line & 0xf) << 12
                | (line & 0xf0) << 4
                | (line & 0xf00) >> 4
                | (line & 0xf000) >> 12;
            out |= rev << ((3 - row) * 16);
        }
        out
    }

    fn reverse_cols(raw: BoardRaw) -> BoardRaw {
        transpose(reverse_rows(transpose(raw)))
    }

    #[test]
    fn right_mirrors_left_through_row_reversal() {
        let mut rng = StdRng::seed_from_u64(2048);
        let fixed = [0x1234133220021002, 0x1111222233334444, 0x0000000000000002];
        let boards = fixed.into_iter().chain((0..64).map(|_| rng.gen::<u64>()));
        for raw in boards {
            let (right, d_right) = shift_scored(Board::from_raw(raw), Move::Right);
            let (left, d_left) = shift_scored(Board::from_raw(reverse_rows(raw)), Move::Left);
            assert_eq!(right.raw(), reverse_rows(left.raw()), "board {:#018x}", raw);
            assert_eq!(d_right, d_left, "board {:#018x}", raw);
        }
    }

    #[test]
    fn down_mirrors_up_through_column_reversal() {
        let mut rng = StdRng::seed_from_u64(4096);
        for _ in 0..64 {
            let raw = rng.gen::<u64>();
            let (down, d_down) = shift_scored(Board::from_raw(raw), Move::Down);
            let (up, d_up) = shift_scored(Board::from_raw(reverse_cols(raw)), Move::Up);
            assert_eq!(down.raw(), reverse_cols(up.raw()), "board {:#018x}", raw);
            assert_eq!(d_down, d_up, "board {:#018x}", raw);
        }
    }

    #[test]
    fn vertical_shifts_transpose_to_horizontal_ones() {
        let mut rng = StdRng::seed_from_u64(512);
        for _ in 0..64 {
            let raw = rng.gen::<u64>();
            let (up, d_up) = shift_scored(Board::from_raw(raw), Move::Up);
            let (left, d_left) = shift_scored(Board::from_raw(transpose(raw)), Move::Left);
            assert_eq!(up.raw(), transpose(left.raw()), "board {:#018x}", raw);
            assert_eq!(d_up, d_left, "board {:#018x}", raw);
        }
    }

    #[test]
    fn transpose_is_an_involution() {
        let mut rng = StdRng::seed_from_u64(64);
        for _ in 0..32 {
            let raw = rng.gen::<u64>();
            assert_eq!(transpose(transpose(raw)), raw);
        }
    }

    #[test]
    fn count_empty_counts_zero_nibbles() {
        assert_eq!(count_empty(Board::EMPTY), 16);
        assert_eq!(count_empty(Board::from_raw(0x1111000011110000)), 8);
        assert_eq!(count_empty(Board::from_raw(0x1100000000000000)), 14);
        assert_eq!(count_empty(Board::from_raw(0x1212212112122121)), 0);
    }

    #[test]
    fn game_over_requires_full_and_pairless() {
        // Full board, no equal neighbors in either axis.
        assert!(is_game_over(Board::from_raw(0x1212212112122121)));
        // Same board with one horizontal pair in the bottom row.
        assert!(!is_game_over(Board::from_raw(0x1212212112122122)));
        // Variant with a single vertical pair in the first column.
        assert!(!is_game_over(Board::from_raw(0x1212142112122121)));
        // One empty cell is enough to keep the game going.
        assert!(!is_game_over(Board::from_raw(0x0212212112122121)));
        assert!(!is_game_over(Board::EMPTY.with_random_tile(
            &mut StdRng::seed_from_u64(1)
        )));
    }

    #[test]
    fn game_over_matches_shift_based_definition() {
        let mut rng = StdRng::seed_from_u64(256);
        for _ in 0..128 {
            let board = Board::from_raw(rng.gen::<u64>());
            let no_shift_changes = [Move::Up, Move::Down, Move::Left, Move::Right]
                .into_iter()
                .all(|dir| board.shift(dir) == board);
            // An all-empty board is a degenerate fixed point, not a loss.
            if board != Board::EMPTY {
                assert_eq!(is_game_over(board), no_shift_changes, "{:?}", board);
            }
        }
    }

    #[test]
    fn winning_tile_is_exactly_2048() {
        assert!(has_winning_tile(Board::from_raw(0xb000000000000000)));
        assert!(has_winning_tile(Board::from_raw(0x000000000000b000)));
        // 4096 alone does not count as a win.
        assert!(!has_winning_tile(Board::from_raw(0xc000000000000000)));
        assert!(!has_winning_tile(Board::EMPTY));
    }

    #[test]
    fn highest_tile_reports_values() {
        assert_eq!(highest_tile(Board::EMPTY), 0);
        assert_eq!(highest_tile(Board::from_raw(0x1000000000000002)), 4);
        assert_eq!(highest_tile(Board::from_raw(0x00000000000b0001)), 2048);
    }
}
