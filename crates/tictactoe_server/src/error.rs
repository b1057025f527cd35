//! Room error types.

use serde::{Deserialize, Serialize};

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
pub enum IllegalMoveReason {
    /// Index is not in 0..9.
    #[display("is off the board")]
    OutOfRange,
    /// The square already holds a mark.
    #[display("is already occupied")]
    Occupied,
    /// The game already has a result.
    #[display("cannot be played, the game is over")]
    GameOver,
}

/// Error returned when a room operation is rejected.
///
/// Both variants leave the room unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RoomError {
    /// The room has not been joined yet.
    #[display("Room {:?} does not exist", _0)]
    UnknownRoom(String),

    /// The requested square cannot be played.
    #[display("Square {} {}", index, reason)]
    IllegalMove {
        /// Requested board index.
        index: usize,
        /// Why it was refused.
        reason: IllegalMoveReason,
    },
}

impl std::error::Error for RoomError {}
