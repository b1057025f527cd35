//! Per-room game state.

use serde::{Deserialize, Serialize};
use tictactoe_core::{Board, Difficulty, GameResult, Move, Player, Position, evaluate};

/// Unique identifier for a room.
pub type RoomId = String;

/// Who plays in a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RoomMode {
    /// Two connected clients take turns.
    #[default]
    TwoPlayer,
    /// The server answers every human move.
    VsComputer {
        /// Strength of the computer opponent.
        difficulty: Difficulty,
        /// Symbol the computer plays.
        computer: Player,
    },
}

impl RoomMode {
    /// The computer's symbol and strength, if this room has one.
    pub fn computer(&self) -> Option<(Player, Difficulty)> {
        match self {
            RoomMode::TwoPlayer => None,
            RoomMode::VsComputer { difficulty, computer } => Some((*computer, *difficulty)),
        }
    }
}

/// Board plus whose turn it is.
///
/// Only [`crate::RoomStore`] creates or mutates room state; everything else
/// sees copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomState {
    board: Board,
    turn: Player,
    history: Vec<usize>,
}

impl RoomState {
    /// Creates an empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::X,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the indices played so far, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Evaluates the board.
    pub fn result(&self) -> GameResult {
        evaluate(&self.board)
    }

    /// Places the current player's mark and passes the turn (unchecked - use
    /// [`crate::RoomStore::apply_move`] for validation).
    pub(crate) fn place(&mut self, pos: Position) {
        self.board = Move::new(self.turn, pos).apply(&self.board);
        self.history.push(pos.to_index());
        self.turn = self.turn.opponent();
        debug_assert_eq!(tictactoe_core::expected_turn(&self.board), Some(self.turn));
    }
}

impl Default for RoomState {
    fn default() -> Self {
        Self::new()
    }
}
