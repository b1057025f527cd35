//! Room hub: store + broadcast + computer opponent.
//!
//! Every public operation mutates the store and publishes the result as
//! one step. Wrapped in [`SharedHub`], the lock serializes events so no
//! member ever observes a half-applied move.

use crate::config::ServerConfig;
use crate::error::RoomError;
use crate::protocol::{ModeRequest, RoomSummary, StateUpdate};
use crate::room::{RoomId, RoomMode};
use crate::store::RoomStore;
use std::collections::HashMap;
use std::sync::Arc;
use tictactoe_core::{Difficulty, Player, Solver};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, error, info, instrument};

/// Hub shared between connections.
pub type SharedHub = Arc<Mutex<Hub>>;

/// Owns the room store, one broadcast channel per room and the computer
/// opponent.
#[derive(Debug)]
pub struct Hub {
    store: RoomStore,
    channels: HashMap<RoomId, broadcast::Sender<StateUpdate>>,
    solver: Solver,
    capacity: usize,
    computer: Player,
    default_difficulty: Difficulty,
}

impl Hub {
    /// Creates a hub whose computer opponent is seeded from the OS.
    #[instrument(skip(config))]
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_solver(config, Solver::from_entropy(config.search_config()))
    }

    /// Creates a hub with an explicit solver (fixed seeds in tests).
    pub fn with_solver(config: &ServerConfig, solver: Solver) -> Self {
        info!(
            capacity = config.channel_capacity(),
            computer = %config.computer(),
            "Creating room hub"
        );
        Self {
            store: RoomStore::new(),
            channels: HashMap::new(),
            solver,
            capacity: *config.channel_capacity(),
            computer: *config.computer(),
            default_difficulty: *config.default_difficulty(),
        }
    }

    /// Wraps the hub for sharing between connections.
    pub fn shared(self) -> SharedHub {
        Arc::new(Mutex::new(self))
    }

    /// Receives every update published for `room_id` from now on.
    #[instrument(skip(self))]
    pub fn subscribe(&mut self, room_id: &str) -> broadcast::Receiver<StateUpdate> {
        let sender = self.channel(room_id);
        let receiver = sender.subscribe();
        debug!(room_id, members = sender.receiver_count(), "Subscribed to room");
        receiver
    }

    /// Joins `room_id`, creating it on first join, and optionally switches
    /// its mode.
    ///
    /// A mode change is published to the room. If the computer is then to
    /// move it plays at once.
    #[instrument(skip(self))]
    pub fn join(&mut self, room_id: &str, mode: Option<ModeRequest>) -> StateUpdate {
        let state = self.store.join(room_id);
        let current = self.store.mode(room_id).unwrap_or_default();

        if let Some(requested) = mode.map(|m| self.resolve(m))
            && requested != current
        {
            info!(room_id, mode = ?requested, "Switching room mode");
            // The room was created by the join above.
            if let Err(e) = self.store.set_mode(room_id, requested) {
                error!(room_id, error = %e, "Room vanished after join");
            }
            let update = StateUpdate::from_state(room_id, &state, requested);
            self.publish(update);
            self.play_computer_turn(room_id);
        }

        self.snapshot(room_id)
            .unwrap_or_else(|| StateUpdate::from_state(room_id, &state, current))
    }

    /// Applies a move for the player whose turn it is and publishes the new
    /// state. In computer rooms the reply follows as a second update.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, room_id: &str, index: usize) -> Result<StateUpdate, RoomError> {
        let state = self.store.apply_move(room_id, index)?;
        let mode = self.store.mode(room_id).unwrap_or_default();
        let update = StateUpdate::from_state(room_id, &state, mode);
        self.publish(update.clone());

        Ok(self.play_computer_turn(room_id).unwrap_or(update))
    }

    /// Clears the room's board and publishes it. A computer playing X opens.
    #[instrument(skip(self))]
    pub fn reset(&mut self, room_id: &str) -> StateUpdate {
        let state = self.store.reset(room_id);
        let mode = self.store.mode(room_id).unwrap_or_default();
        let update = StateUpdate::from_state(room_id, &state, mode);
        self.publish(update.clone());

        self.play_computer_turn(room_id).unwrap_or(update)
    }

    /// Current state of `room_id`, if it exists.
    pub fn snapshot(&self, room_id: &str) -> Option<StateUpdate> {
        let state = self.store.state(room_id)?;
        let mode = self.store.mode(room_id).unwrap_or_default();
        Some(StateUpdate::from_state(room_id, &state, mode))
    }

    /// One summary per room, sorted by id.
    pub fn room_summaries(&self) -> Vec<RoomSummary> {
        self.store
            .rooms()
            .into_iter()
            .filter_map(|room| {
                let snapshot = self.snapshot(&room)?;
                let members = self.channels.get(&room).map_or(0, |tx| tx.receiver_count());
                Some(RoomSummary {
                    room,
                    members,
                    result: snapshot.result,
                    mode: snapshot.mode,
                })
            })
            .collect()
    }

    fn resolve(&self, request: ModeRequest) -> RoomMode {
        match request {
            ModeRequest::TwoPlayer => RoomMode::TwoPlayer,
            ModeRequest::VsComputer { difficulty, computer } => RoomMode::VsComputer {
                difficulty: difficulty.unwrap_or(self.default_difficulty),
                computer: computer.unwrap_or(self.computer),
            },
        }
    }

    fn channel(&mut self, room_id: &str) -> &broadcast::Sender<StateUpdate> {
        let capacity = self.capacity;
        self.channels
            .entry(room_id.to_string())
            .or_insert_with(|| broadcast::channel(capacity).0)
    }

    fn publish(&mut self, update: StateUpdate) {
        let room_id = update.room.clone();
        match self.channel(&room_id).send(update) {
            Ok(members) => debug!(room_id, members, "Broadcast state update"),
            Err(_) => debug!(room_id, "No members to broadcast to"),
        }
    }

    /// Lets the computer move if the room has one, the game is ongoing and
    /// it is the computer's turn. Returns the published update.
    fn play_computer_turn(&mut self, room_id: &str) -> Option<StateUpdate> {
        let mode = self.store.mode(room_id)?;
        let (computer, difficulty) = mode.computer()?;
        let state = self.store.state(room_id)?;
        if state.turn() != computer || state.result().is_over() {
            return None;
        }

        let pos = self.solver.best_move(state.board(), computer, difficulty)?;
        info!(room_id, position = %pos, %difficulty, "Computer replies");
        match self.store.apply_move(room_id, pos.to_index()) {
            Ok(state) => {
                let update = StateUpdate::from_state(room_id, &state, mode);
                self.publish(update.clone());
                Some(update)
            }
            Err(e) => {
                error!(room_id, error = %e, "Computer produced an illegal move");
                None
            }
        }
    }
}
