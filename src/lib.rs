//! A chess rules engine: board and piece state, per-piece move generation,
//! legality filtering, and game-ending queries.
//!
//! The crate is the rules core only — no I/O, no notation formats, no AI.
//! A presentation layer asks [`Game`] for the legal moves at a square,
//! applies one with [`Game::apply_move`], and polls
//! [`Game::is_in_checkmate`] / [`Game::is_in_stalemate`] (or the combined
//! [`Game::status`]) to detect the end of the game.
//!
//! ```
//! use chess_rules::{Game, Move, Position};
//!
//! let mut game = Game::new();
//! let from = Position::from_algebraic("e2").unwrap();
//! let moves = game.valid_moves(from).unwrap();
//! assert_eq!(moves.len(), 2); // e3 and e4
//! game.apply_move(Move::new(from, Position::from_algebraic("e4").unwrap())).unwrap();
//! ```

pub mod board;
pub mod game;
pub mod movegen;
pub mod types;

pub use board::Board;
pub use game::{Game, GameStatus};
pub use movegen::{attacks_square, pseudo_legal_moves};
pub use types::*;
