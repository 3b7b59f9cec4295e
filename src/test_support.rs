//! Helpers shared by the async tests: local relays and stub servers bound to
//! ephemeral ports.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tungstenite::protocol::Message as WsMessage;

use crate::relay::hub::lock;
use crate::relay::{Relay, SharedRelay, serve};

pub(crate) const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Starts a relay on `127.0.0.1:0` and returns its `ws://` URL.
pub(crate) async fn spawn_relay(max_connections: usize) -> (String, SharedRelay) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let relay = Relay::shared();
    tokio::spawn(serve(listener, relay.clone(), max_connections));
    (format!("ws://{addr}"), relay)
}

/// Polls until the relay has exactly `count` registered peers.
pub(crate) async fn wait_for_peers(relay: &SharedRelay, count: usize) {
    for _ in 0..200 {
        if lock(relay).peer_count() == count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "relay never reached {count} peers (has {})",
        lock(relay).peer_count()
    );
}

/// A server that never answers: every text frame any client sends is
/// forwarded to the returned receiver.
pub(crate) async fn spawn_capture_server() -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                let Ok(mut ws) = accept_async(stream).await else {
                    return;
                };
                while let Some(Ok(msg)) = ws.next().await {
                    if let WsMessage::Text(text) = msg {
                        let _ = tx.send(text.as_str().to_string());
                    }
                }
            });
        }
    });

    (format!("ws://{addr}"), rx)
}

/// A server that completes the handshake and immediately drops the socket.
pub(crate) async fn spawn_closing_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            if let Ok(ws) = accept_async(stream).await {
                drop(ws);
            }
        }
    });

    format!("ws://{addr}")
}
