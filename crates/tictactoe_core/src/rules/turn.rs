//! Turn alternation: X moves first, then the players alternate.

use crate::{Board, Player};
use tracing::instrument;

/// The player to move implied by the mark counts.
///
/// Returns `None` when the counts break alternation (O ahead of X, or X
/// more than one ahead), which no sequence of legal moves can produce.
#[instrument(level = "trace")]
pub fn expected_turn(board: &Board) -> Option<Player> {
    let x = board.count(Player::X);
    let o = board.count(Player::O);
    if x == o {
        Some(Player::X)
    } else if x == o + 1 {
        Some(Player::O)
    } else {
        None
    }
}
