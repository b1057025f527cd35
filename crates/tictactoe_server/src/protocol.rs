//! Messages exchanged with clients.
//!
//! WebSocket frames are JSON objects tagged by `type`. The REST API reuses
//! [`StateUpdate`] as its response body.

use crate::room::{RoomId, RoomMode, RoomState};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tictactoe_core::{Board, Difficulty, GameResult, Player};

/// Client → server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Join a room, creating it if needed. `mode` switches who plays.
    Join {
        /// Room to join.
        room: RoomId,
        /// Optional mode for the room.
        #[serde(default)]
        mode: Option<ModeRequest>,
    },
    /// Place the current player's mark.
    Move {
        /// Target room.
        room: RoomId,
        /// Board index, 0-8 row-major.
        index: usize,
    },
    /// Start the room over with an empty board.
    Reset {
        /// Target room.
        room: RoomId,
    },
}

/// Requested room mode. Omitted computer settings fall back to the
/// server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ModeRequest {
    /// Two connected clients take turns.
    TwoPlayer,
    /// Play against the server.
    VsComputer {
        /// Strength of the computer opponent.
        #[serde(default)]
        difficulty: Option<Difficulty>,
        /// Symbol the computer plays.
        #[serde(default)]
        computer: Option<Player>,
    },
}

/// Server → client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Current state of a room.
    StateUpdate(StateUpdate),
    /// A request was rejected. Sent only to the requester.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

/// Snapshot of a room pushed whenever its state changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdate {
    /// Room the snapshot belongs to.
    pub room: RoomId,
    /// The board.
    pub board: Board,
    /// Player to move.
    pub turn: Player,
    /// Evaluated result of the board.
    pub result: GameResult,
    /// Indices played so far.
    pub history: Vec<usize>,
    /// Who plays in the room.
    pub mode: RoomMode,
}

impl StateUpdate {
    /// Builds an update from the store's view of a room.
    pub fn from_state(room: &str, state: &RoomState, mode: RoomMode) -> Self {
        Self::new(
            room.to_string(),
            *state.board(),
            state.turn(),
            state.result(),
            state.history().to_vec(),
            mode,
        )
    }
}

/// Body of `POST /api/rooms/{room}/join`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    /// Optional mode for the room.
    #[serde(default)]
    pub mode: Option<ModeRequest>,
}

/// Body of `POST /api/rooms/{room}/moves`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Board index, 0-8 row-major.
    pub index: usize,
}

/// One entry of `GET /api/rooms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    /// Room id.
    pub room: RoomId,
    /// Connected WebSocket members.
    pub members: usize,
    /// Evaluated result of the board.
    pub result: GameResult,
    /// Who plays in the room.
    pub mode: RoomMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_without_mode() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"join","room":"r1"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Join {
                room: "r1".to_string(),
                mode: None
            }
        );
    }

    #[test]
    fn test_parse_join_against_computer() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"join","room":"r1","mode":{"kind":"vsComputer","difficulty":"medium"}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::Join {
                room: "r1".to_string(),
                mode: Some(ModeRequest::VsComputer {
                    difficulty: Some(Difficulty::Medium),
                    computer: None
                })
            }
        );
    }

    #[test]
    fn test_parse_move_and_reset() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"move","room":"r1","index":4}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Move {
                room: "r1".to_string(),
                index: 4
            }
        );
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"reset","room":"r1"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Reset { room: "r1".to_string() });
    }

    #[test]
    fn test_negative_index_is_malformed() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"move","room":"r1","index":-1}"#).is_err());
    }

    #[test]
    fn test_state_update_shape() {
        let update = StateUpdate::from_state("r1", &RoomState::new(), RoomMode::TwoPlayer);
        let json = serde_json::to_value(ServerMessage::StateUpdate(update)).unwrap();
        assert_eq!(json["type"], "stateUpdate");
        assert_eq!(json["room"], "r1");
        assert_eq!(json["turn"], "X");
        assert_eq!(json["board"].as_array().unwrap().len(), 9);
        assert_eq!(json["result"]["status"], "ongoing");
        assert_eq!(json["mode"]["kind"], "twoPlayer");
    }
}
