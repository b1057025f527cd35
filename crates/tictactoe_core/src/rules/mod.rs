//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the solver and the room store can share them.

pub mod draw;
pub mod legality;
pub mod outcome;
pub mod turn;
pub mod win;

pub use draw::is_full;
pub use legality::{is_legal, legal_moves};
pub use outcome::{GameResult, evaluate};
pub use turn::expected_turn;
pub use win::{LINES, WinningLine, check_winner};
