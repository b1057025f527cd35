//! Game result evaluation.

use super::{check_winner, is_full, WinningLine};
use crate::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GameResult {
    /// Moves remain and nobody has three in a row.
    Ongoing,
    /// `player` completed `line`.
    Win {
        /// The winning player.
        player: Player,
        /// The completed line.
        line: WinningLine,
    },
    /// The board is full without a winner.
    Draw,
}

impl GameResult {
    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameResult::Ongoing)
    }

    /// The winner, if any.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// Evaluates the board.
///
/// Lines are scanned in canonical order (rows, columns, diagonals) and
/// the first completed one wins. Otherwise a full board is a draw.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> GameResult {
    if let Some((player, line)) = check_winner(board) {
        GameResult::Win { player, line }
    } else if is_full(board) {
        GameResult::Draw
    } else {
        GameResult::Ongoing
    }
}
