//! Game lifecycle: an immutable `GameState` value threaded through moves.
//!
//! The caller owns the state and passes it to `make_move`, which returns
//! either a brand new state or the input unchanged when the move has no
//! effect. Storage and re-render triggers are the caller's business.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Board, Move, Score};

/// Complete state of one game: board, cumulative score, terminal flags.
///
/// `won` is advisory: reaching 2048 raises it but play continues until
/// `game_over` (full board, no mergeable neighbors) ends the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub score: Score,
    pub game_over: bool,
    pub won: bool,
}

impl GameState {
    /// Start a fresh game: an empty board with two random tiles, score 0.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let board = Board::EMPTY.with_random_tile(rng).with_random_tile(rng);
        GameState {
            board,
            score: 0,
            game_over: false,
            won: false,
        }
    }

    /// Apply one directional move.
    ///
    /// Moves on a finished game and moves that change no line return the
    /// input state unchanged — no spawn, no score change. A move that
    /// changes the board accumulates its merge score, spawns one random
    /// tile and recomputes both terminal flags on the post-spawn board.
    pub fn make_move<R: Rng + ?Sized>(self, direction: Move, rng: &mut R) -> Self {
        if self.game_over {
            return self;
        }
        let (moved, delta) = self.board.shift_scored(direction);
        if moved == self.board {
            return self;
        }
        let board = moved.with_random_tile(rng);
        GameState {
            board,
            score: self.score + delta,
            game_over: board.is_game_over(),
            won: board.has_winning_tile(),
        }
    }
}
