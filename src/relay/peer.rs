//! Peer representation
//!
//! `Peer` models one connected forum client and holds the sending side of
//! its per-connection channel. The relay pushes frames into it; the server's
//! send loop drains it onto the socket.

use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

pub type PeerId = String;

#[derive(Debug)]
pub struct Peer {
    pub id: PeerId,
    pub sender: UnboundedSender<WsMessage>,
}

impl Peer {
    /// Create a peer with a fresh UUID id.
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
        }
    }
}
