//! Move legality.

use crate::{Board, Position, Square};
use tracing::instrument;

/// True iff `index` is on the board and the square there is empty.
#[instrument(level = "trace")]
pub fn is_legal(board: &Board, index: usize) -> bool {
    board.get_index(index) == Some(Square::Empty)
}

/// Filters positions by board state - returns only empty squares, in index order.
#[instrument(level = "trace")]
pub fn legal_moves(board: &Board) -> Vec<Position> {
    Position::ALL
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect()
}
