//! Two real clients playing over `/ws` against a served router.

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tictactoe_core::Solver;
use tictactoe_server::{AppState, Hub, ServerConfig, router};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{Duration, timeout};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server() -> anyhow::Result<SocketAddr> {
    let hub = Hub::with_solver(&ServerConfig::default(), Solver::seeded(31)).shared();
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router(AppState::new(hub))).await });
    Ok(addr)
}

async fn connect(addr: SocketAddr) -> anyhow::Result<WsStream> {
    let (ws, _) = connect_async(format!("ws://{}/ws", addr)).await?;
    Ok(ws)
}

async fn send(ws: &mut WsStream, msg: Value) -> anyhow::Result<()> {
    ws.send(Message::Text(msg.to_string().into())).await?;
    Ok(())
}

/// Next JSON text frame, skipping pings and other control frames.
async fn recv(ws: &mut WsStream) -> anyhow::Result<Value> {
    loop {
        let frame = timeout(Duration::from_secs(5), ws.next())
            .await?
            .ok_or_else(|| anyhow::anyhow!("socket closed"))??;
        if let Message::Text(text) = frame {
            return Ok(serde_json::from_str(text.as_str())?);
        }
    }
}

#[tokio::test]
async fn test_two_clients_share_a_room() -> anyhow::Result<()> {
    let addr = spawn_server().await?;
    let mut alice = connect(addr).await?;
    let mut bob = connect(addr).await?;

    send(&mut alice, json!({"type": "join", "room": "r1"})).await?;
    let joined = recv(&mut alice).await?;
    assert_eq!(joined["type"], "stateUpdate");
    assert_eq!(joined["turn"], "X");

    send(&mut bob, json!({"type": "join", "room": "r1"})).await?;
    assert_eq!(recv(&mut bob).await?["history"], json!([]));

    // Members hear their own move through the room broadcast.
    send(&mut alice, json!({"type": "move", "room": "r1", "index": 4})).await?;
    for ws in [&mut alice, &mut bob] {
        let update = recv(ws).await?;
        assert_eq!(update["type"], "stateUpdate");
        assert_eq!(update["history"], json!([4]));
        assert_eq!(update["turn"], "O");
    }

    send(&mut bob, json!({"type": "move", "room": "r1", "index": 4})).await?;
    let rejected = recv(&mut bob).await?;
    assert_eq!(rejected["type"], "error");
    assert!(rejected["message"].as_str().unwrap_or_default().contains("occupied"));

    // The rejection never reached alice: her next frame is bob's legal move.
    send(&mut bob, json!({"type": "move", "room": "r1", "index": 0})).await?;
    assert_eq!(recv(&mut bob).await?["history"], json!([4, 0]));
    let update = recv(&mut alice).await?;
    assert_eq!(update["type"], "stateUpdate");
    assert_eq!(update["history"], json!([4, 0]));
    Ok(())
}

#[tokio::test]
async fn test_malformed_frame_keeps_connection_open() -> anyhow::Result<()> {
    let addr = spawn_server().await?;
    let mut ws = connect(addr).await?;

    ws.send(Message::Text("not json".into())).await?;
    assert_eq!(recv(&mut ws).await?["type"], "error");

    send(&mut ws, json!({"type": "move", "room": "r1", "index": -1})).await?;
    assert_eq!(recv(&mut ws).await?["type"], "error");

    send(&mut ws, json!({"type": "join", "room": "r1"})).await?;
    assert_eq!(recv(&mut ws).await?["type"], "stateUpdate");
    Ok(())
}

#[tokio::test]
async fn test_computer_reply_is_broadcast() -> anyhow::Result<()> {
    let addr = spawn_server().await?;
    let mut ws = connect(addr).await?;

    let join = json!({"type": "join", "room": "ai", "mode": {"kind": "vsComputer", "difficulty": "hard"}});
    send(&mut ws, join).await?;
    assert_eq!(recv(&mut ws).await?["mode"]["kind"], "vsComputer");

    send(&mut ws, json!({"type": "move", "room": "ai", "index": 0})).await?;
    assert_eq!(recv(&mut ws).await?["history"], json!([0]));
    let update = recv(&mut ws).await?;
    assert_eq!(update["history"], json!([0, 4]));
    assert_eq!(update["turn"], "X");
    Ok(())
}
