//! Keyboard handling.

use crossterm::event::KeyCode;
use tictactoe_core::Position;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor to a square.
    Cursor(Position),
    /// Place a mark on a square.
    Place(Position),
    /// Cycle the computer's difficulty.
    CycleDifficulty,
    /// Start a new game.
    Restart,
    /// Leave the app.
    Quit,
}

/// Maps a key to an action, given the current cursor.
pub fn action_for(cursor: Position, key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Some(Action::Cursor(move_cursor(cursor, key))),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Place(cursor)),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10).map(|d| d as usize - 1)?;
            Position::from_index(index).map(Action::Place)
        }
        KeyCode::Char('d') => Some(Action::CycleDifficulty),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Moves the cursor one square; stops at the board's edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}
