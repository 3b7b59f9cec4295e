//! WebSocket relay server
//!
//! Accepts forum clients and rebroadcasts every named event it receives to
//! all connected clients. Responsibilities:
//! - accept TCP/WebSocket connections, up to `max_connections` at a time
//! - register a `Peer` per connection and run its send loop
//! - check that text frames are envelopes and hand the original frame to
//!   the `Relay` hub
//! - clean up the peer exactly once, whichever loop ends first
//!
//! Frames are forwarded byte for byte; the relay never re-encodes `data`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;
use tungstenite::protocol::frame::CloseFrame;
use tungstenite::protocol::frame::coding::CloseCode;

use crate::channel::Envelope;
use crate::relay::hub::{SharedRelay, lock};
use crate::relay::peer::Peer;
use crate::utils::Result;

pub async fn start_relay_server(
    addr: &str,
    relay: SharedRelay,
    max_connections: usize,
) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Relay listening on ws://{}", listener.local_addr()?);

    serve(listener, relay, max_connections).await;
    Ok(())
}

/// Runs the accept loop on an already bound listener.
pub async fn serve(listener: TcpListener, relay: SharedRelay, max_connections: usize) {
    while let Ok((stream, remote)) = listener.accept().await {
        debug!("Accepted TCP connection from {remote}");
        let relay = relay.clone();
        tokio::spawn(handle_connection(stream, relay, max_connections));
    }
}

async fn handle_connection(stream: TcpStream, relay: SharedRelay, max_connections: usize) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake error: {e}");
            return;
        }
    };
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    let peer = Peer::new(tx);
    let peer_id = peer.id.clone();

    let admitted = {
        let mut relay = lock(&relay);
        if relay.peer_count() >= max_connections {
            false
        } else {
            relay.register_peer(peer);
            true
        }
    };

    if !admitted {
        warn!("Connection limit of {max_connections} reached, rejecting {peer_id}");
        let close = CloseFrame {
            code: CloseCode::Again,
            reason: "relay is full".into(),
        };
        let _ = ws_sender.send(WsMessage::Close(Some(close))).await;
        return;
    }
    info!("{peer_id} connected");

    let cleanup_called = Arc::new(AtomicBool::new(false));

    let do_cleanup = {
        let relay = relay.clone();
        let peer_id = peer_id.clone();
        let cleanup_called = cleanup_called.clone();

        move || {
            if !cleanup_called.swap(true, Ordering::SeqCst) {
                lock(&relay).remove_peer(&peer_id);
                info!("{peer_id} disconnected");
            }
        }
    };

    {
        let peer_id = peer_id.clone();
        let do_cleanup = do_cleanup.clone();

        spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let Err(e) = ws_sender.send(msg).await {
                    warn!("Failed to send event to {peer_id}: {e}");
                    break;
                }
            }

            do_cleanup();
            debug!("Send loop closed for {peer_id}");
        });
    }

    while let Some(Ok(msg)) = ws_receiver.next().await {
        if msg.is_close() {
            break;
        }
        if !msg.is_text() {
            continue;
        }
        let Ok(text) = msg.to_text() else {
            continue;
        };

        // parsed only to reject garbage; peers receive the original frame
        match Envelope::from_text(text) {
            Ok(envelope) => {
                let delivered = lock(&relay).broadcast(&msg);
                debug!(
                    "{peer_id} emitted '{}', delivered to {delivered} peers",
                    envelope.event
                );
            }
            Err(err) => {
                warn!(
                    "Invalid frame from {peer_id}: {err} | {}",
                    &text.chars().take(100).collect::<String>()
                );
            }
        }
    }

    do_cleanup();
}
