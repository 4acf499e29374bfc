//! twenty48-engine: a 2048 board engine.
//!
//! This crate provides:
//! - A compact `Board` type with value-returning operations (`shift`,
//!   `shift_scored`, `with_random_tile`, terminal-state queries)
//! - A `GameState` value (`game` module) threading board, cumulative score
//!   and win/game-over flags through `new`/`make_move`
//!
//! Quick start:
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use twenty48_engine::engine::{self, Move};
//! use twenty48_engine::game::GameState;
//!
//! // Optional: build the lookup tables up front instead of on first shift.
//! engine::new();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let start = GameState::new(&mut rng);
//! assert_eq!(start.board.count_empty(), 14);
//!
//! let next = start.make_move(Move::Left, &mut rng);
//! assert!(next.score >= start.score);
//! ```
//!
//! Every operation takes the caller's `rand::Rng` where randomness is
//! involved; seed a `StdRng` for reproducible games.

pub mod engine;
pub mod game;
