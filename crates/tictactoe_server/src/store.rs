//! In-memory room state store.

use crate::error::{IllegalMoveReason, RoomError};
use crate::room::{RoomId, RoomMode, RoomState};
use std::collections::HashMap;
use tictactoe_core::{Position, is_legal};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Default)]
struct Room {
    state: RoomState,
    mode: RoomMode,
}

/// Owns the state of every room, keyed by room id.
///
/// Rooms are independent. The store itself does no locking; callers that
/// share it wrap it (see [`crate::Hub`]).
#[derive(Debug, Clone, Default)]
pub struct RoomStore {
    rooms: HashMap<RoomId, Room>,
}

impl RoomStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating room store");
        Self::default()
    }

    /// Returns the room's state, creating an empty board with X to move on
    /// first join.
    #[instrument(skip(self))]
    pub fn join(&mut self, room_id: &str) -> RoomState {
        if !self.rooms.contains_key(room_id) {
            info!(room_id, "Creating new room");
        }
        self.rooms.entry(room_id.to_string()).or_default().state.clone()
    }

    /// Places the current player's mark at `index` and passes the turn.
    ///
    /// Fails without touching the room if it was never joined, if the
    /// square is off the board or taken, or if the game is already over.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, room_id: &str, index: usize) -> Result<RoomState, RoomError> {
        let room = self.rooms.get_mut(room_id).ok_or_else(|| {
            warn!(room_id, "Move for unknown room");
            RoomError::UnknownRoom(room_id.to_string())
        })?;

        let reject = |reason: IllegalMoveReason| {
            warn!(room_id, index, %reason, "Illegal move");
            RoomError::IllegalMove { index, reason }
        };
        let Some(pos) = Position::from_index(index) else {
            return Err(reject(IllegalMoveReason::OutOfRange));
        };
        if !is_legal(room.state.board(), index) {
            return Err(reject(IllegalMoveReason::Occupied));
        }
        if room.state.result().is_over() {
            return Err(reject(IllegalMoveReason::GameOver));
        }

        let player = room.state.turn();
        room.state.place(pos);
        info!(
            room_id,
            index,
            player = %player,
            result = ?room.state.result(),
            "Move applied"
        );
        Ok(room.state.clone())
    }

    /// Clears the board and gives X the move. Creates the room if needed.
    #[instrument(skip(self))]
    pub fn reset(&mut self, room_id: &str) -> RoomState {
        let room = self.rooms.entry(room_id.to_string()).or_default();
        room.state = RoomState::new();
        info!(room_id, "Room reset");
        room.state.clone()
    }

    /// Returns a copy of the room's state, if the room exists.
    pub fn state(&self, room_id: &str) -> Option<RoomState> {
        self.rooms.get(room_id).map(|room| room.state.clone())
    }

    /// Returns the room's mode, if the room exists.
    pub fn mode(&self, room_id: &str) -> Option<RoomMode> {
        self.rooms.get(room_id).map(|room| room.mode)
    }

    /// Switches who plays in the room. The board is left as is.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, room_id: &str, mode: RoomMode) -> Result<(), RoomError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::UnknownRoom(room_id.to_string()))?;
        if room.mode != mode {
            debug!(room_id, ?mode, "Room mode changed");
            room.mode = mode;
        }
        Ok(())
    }

    /// Lists all room ids, sorted.
    pub fn rooms(&self) -> Vec<RoomId> {
        let mut ids: Vec<_> = self.rooms.keys().cloned().collect();
        ids.sort();
        ids
    }
}
