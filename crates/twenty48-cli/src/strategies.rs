use clap::ValueEnum;
use rand::Rng;
use serde::Deserialize;

use twenty48_engine::engine::{Board, Move};

pub(crate) const ALL_MOVES: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

/// Move-selection rule for unattended games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Uniform choice among legal moves.
    #[default]
    Random,
    /// Highest immediate merge score; first legal move as tie-break.
    Greedy,
}

/// Mask of directions whose shift would change the board, in `ALL_MOVES`
/// order.
pub(crate) fn legal_moves(board: Board) -> [bool; 4] {
    let mut mask = [false; 4];
    for (i, &dir) in ALL_MOVES.iter().enumerate() {
        mask[i] = board.shift(dir) != board;
    }
    mask
}

/// Pick the next move, or `None` when no direction changes the board.
pub(crate) fn select_move<R: Rng + ?Sized>(
    kind: StrategyKind,
    board: Board,
    rng: &mut R,
) -> Option<Move> {
    let legal = legal_moves(board);
    match kind {
        StrategyKind::Random => {
            let n = legal.iter().filter(|&&ok| ok).count();
            if n == 0 {
                return None;
            }
            let mut pick = rng.gen_range(0..n);
            for (i, &ok) in legal.iter().enumerate() {
                if !ok {
                    continue;
                }
                if pick == 0 {
                    return Some(ALL_MOVES[i]);
                }
                pick -= 1;
            }
            None
        }
        StrategyKind::Greedy => {
            let mut best: Option<(Move, u64)> = None;
            for (i, &ok) in legal.iter().enumerate() {
                if !ok {
                    continue;
                }
                let (_, delta) = board.shift_scored(ALL_MOVES[i]);
                match best {
                    Some((_, held)) if held >= delta => {}
                    _ => best = Some((ALL_MOVES[i], delta)),
                }
            }
            best.map(|(dir, _)| dir)
        }
    }
}
