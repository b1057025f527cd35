//! Pure tic-tac-toe game logic.
//!
//! This crate holds the parts of the game with real algorithmic content:
//!
//! - **Rules**: win/draw detection and move legality over a 3x3 board
//! - **Solver**: minimax search with alpha-beta pruning for the computer opponent
//!
//! Everything here is synchronous and side-effect free apart from the
//! random source the solver is handed for its easiest difficulty.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{Board, Difficulty, Player, Position, Solver, evaluate, GameResult};
//!
//! let board = Board::new()
//!     .with(Position::TopLeft, Player::X)
//!     .with(Position::Center, Player::O);
//! assert_eq!(evaluate(&board), GameResult::Ongoing);
//!
//! let mut solver = Solver::seeded(7);
//! let reply = solver.best_move(&board, Player::X, Difficulty::Hard);
//! assert!(reply.is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod position;
mod types;

pub mod rules;
pub mod solver;

pub use position::Position;
pub use rules::{GameResult, WinningLine, evaluate, expected_turn, is_legal, legal_moves};
pub use solver::{Analysis, Difficulty, SearchConfig, Solver, best_move};
pub use types::{Board, BoardShapeError, Move, Player, Square};
