//! HTTP and WebSocket gateway.
//!
//! `GET /ws` upgrades to a WebSocket speaking [`ClientMessage`] /
//! [`ServerMessage`] JSON. The REST routes under `/api/rooms` expose the
//! same operations for clients that do not keep a socket open.

use crate::config::ServerConfig;
use crate::error::RoomError;
use crate::hub::{Hub, SharedHub};
use crate::protocol::{ClientMessage, JoinRequest, MoveRequest, RoomSummary, ServerMessage, StateUpdate};
use crate::room::RoomId;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast::{self, error::RecvError};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

static NEXT_CONNECTION: AtomicU64 = AtomicU64::new(1);

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    hub: SharedHub,
}

impl AppState {
    /// Wraps a shared hub.
    pub fn new(hub: SharedHub) -> Self {
        Self { hub }
    }

    /// The shared hub.
    pub fn hub(&self) -> &SharedHub {
        &self.hub
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/ws", get(ws_handler))
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/{room}", get(get_room))
        .route("/api/rooms/{room}/join", post(join_room))
        .route("/api/rooms/{room}/moves", post(make_move))
        .route("/api/rooms/{room}/reset", post(reset_room))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds to the configured address and serves until Ctrl+C.
#[instrument(skip(config), fields(addr = %config.socket_addr()))]
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let hub = Hub::new(&config).shared();
    let app = router(AppState::new(hub));

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %listener.local_addr()?, "Server ready");
    info!("WebSocket endpoint at /ws, REST under /api/rooms");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

// ─────────────────────────────────────────────────────────────
//  REST
// ─────────────────────────────────────────────────────────────

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorBody {
    error: String,
}

/// A rejected room operation, rendered as 404 or 409.
#[derive(Debug)]
struct ApiError(RoomError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            RoomError::UnknownRoom(_) => StatusCode::NOT_FOUND,
            RoomError::IllegalMove { .. } => StatusCode::CONFLICT,
        };
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

impl From<RoomError> for ApiError {
    fn from(err: RoomError) -> Self {
        Self(err)
    }
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(state))]
async fn list_rooms(State(state): State<AppState>) -> Json<Vec<RoomSummary>> {
    Json(state.hub.lock().await.room_summaries())
}

#[instrument(skip(state))]
async fn get_room(State(state): State<AppState>, Path(room): Path<RoomId>) -> Result<Json<StateUpdate>, ApiError> {
    let snapshot = state.hub.lock().await.snapshot(&room);
    snapshot.map(Json).ok_or(ApiError(RoomError::UnknownRoom(room)))
}

#[instrument(skip(state))]
async fn join_room(
    State(state): State<AppState>,
    Path(room): Path<RoomId>,
    Json(request): Json<JoinRequest>,
) -> Json<StateUpdate> {
    Json(state.hub.lock().await.join(&room, request.mode))
}

#[instrument(skip(state))]
async fn make_move(
    State(state): State<AppState>,
    Path(room): Path<RoomId>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<StateUpdate>, ApiError> {
    let update = state.hub.lock().await.submit_move(&room, request.index)?;
    Ok(Json(update))
}

#[instrument(skip(state))]
async fn reset_room(State(state): State<AppState>, Path(room): Path<RoomId>) -> Json<StateUpdate> {
    Json(state.hub.lock().await.reset(&room))
}

// ─────────────────────────────────────────────────────────────
//  WebSocket
// ─────────────────────────────────────────────────────────────

/// The room a connection currently listens to.
struct Membership {
    room: RoomId,
    updates: broadcast::Receiver<StateUpdate>,
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let connection = NEXT_CONNECTION.fetch_add(1, Ordering::Relaxed);
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection))
}

#[instrument(skip(socket, state))]
async fn handle_socket(socket: WebSocket, state: AppState, connection: u64) {
    info!("Client connected");
    let (mut sink, mut stream) = socket.split();
    let mut membership: Option<Membership> = None;

    loop {
        tokio::select! {
            incoming = stream.next() => {
                let message = match incoming {
                    Some(Ok(message)) => message,
                    Some(Err(e)) => {
                        debug!(error = %e, "Socket error");
                        break;
                    }
                    None => break,
                };
                let reply = match message {
                    Message::Text(text) => handle_text(&state, text.as_str(), &mut membership).await,
                    Message::Close(_) => break,
                    _ => continue,
                };
                if let Some(reply) = reply
                    && send(&mut sink, &reply).await.is_err()
                {
                    break;
                }
            }
            update = next_update(&mut membership) => match update {
                Ok(update) => {
                    if send(&mut sink, &ServerMessage::StateUpdate(update)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Connection lagging, skipped updates"),
                Err(RecvError::Closed) => membership = None,
            }
        }
    }

    info!(room = ?membership.map(|m| m.room), "Client disconnected");
}

/// Waits for the next update of the joined room; never resolves before a join.
async fn next_update(membership: &mut Option<Membership>) -> Result<StateUpdate, RecvError> {
    match membership {
        Some(m) => m.updates.recv().await,
        None => std::future::pending().await,
    }
}

async fn send(sink: &mut SplitSink<WebSocket, Message>, message: &ServerMessage) -> Result<(), axum::Error> {
    let text = serde_json::to_string(message).map_err(axum::Error::new)?;
    sink.send(Message::Text(text.into())).await
}

/// Handles one client frame and returns the direct reply, if any.
///
/// Results of moves and resets reach the sender through the room broadcast
/// when it is a member of that room; otherwise they are returned directly.
async fn handle_text(state: &AppState, text: &str, membership: &mut Option<Membership>) -> Option<ServerMessage> {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "Malformed client message");
            return Some(ServerMessage::Error {
                message: format!("Malformed message: {}", e),
            });
        }
    };
    debug!(?message, "Client message");

    let mut hub = state.hub.lock().await;
    match message {
        ClientMessage::Join { room, mode } => {
            let update = hub.join(&room, mode);
            let updates = hub.subscribe(&room);
            info!(room = %room, "Joined room");
            *membership = Some(Membership { room, updates });
            Some(ServerMessage::StateUpdate(update))
        }
        ClientMessage::Move { room, index } => match hub.submit_move(&room, index) {
            Ok(_) if is_member(membership, &room) => None,
            Ok(update) => Some(ServerMessage::StateUpdate(update)),
            Err(e) => Some(ServerMessage::Error { message: e.to_string() }),
        },
        ClientMessage::Reset { room } => {
            let update = hub.reset(&room);
            (!is_member(membership, &room)).then_some(ServerMessage::StateUpdate(update))
        }
    }
}

fn is_member(membership: &Option<Membership>, room: &str) -> bool {
    membership.as_ref().is_some_and(|m| m.room == room)
}
