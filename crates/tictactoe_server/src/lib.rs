//! Real-time tic-tac-toe server.
//!
//! # Architecture
//!
//! - **Store**: authoritative per-room board and turn, mutated only by validated moves
//! - **Hub**: pairs the store with per-room broadcast channels and the computer opponent
//! - **Gateway**: axum WebSocket endpoint plus a small REST API over the hub
//! - **Config**: TOML-backed server settings
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_server::{ServerConfig, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! serve(config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod gateway;
mod hub;
mod protocol;
mod room;
mod store;

pub use config::{ConfigError, ServerConfig};
pub use error::{IllegalMoveReason, RoomError};
pub use gateway::{AppState, router, serve};
pub use hub::{Hub, SharedHub};
pub use protocol::{ClientMessage, JoinRequest, ModeRequest, MoveRequest, RoomSummary, ServerMessage, StateUpdate};
pub use room::{RoomId, RoomMode, RoomState};
pub use store::RoomStore;
