//! Sync channel
//!
//! Client side of the relay connection. One `SyncChannel` owns at most one
//! WebSocket connection and splits it into:
//! - a send loop fed by an unbounded queue, so `send` never awaits network I/O
//! - a read loop that decodes `user-message` events and forwards them, in
//!   receipt order, to the receiver returned by `connect`
//!
//! There is no retry, reconnect or backoff. When the transport drops the
//! channel moves to `Disconnected` and stays there until `connect` is called
//! again. A fresh connection never replays earlier events.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::channel::event::Envelope;
use crate::forum::Message;
use crate::utils::{ForumError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Disconnected,
    Connected,
}

#[derive(Debug)]
pub struct SyncChannel {
    connected: Arc<AtomicBool>,
    outbound: Option<UnboundedSender<WsMessage>>,
    reader: Option<JoinHandle<()>>,
}

impl Default for SyncChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncChannel {
    pub fn new() -> Self {
        Self {
            connected: Arc::new(AtomicBool::new(false)),
            outbound: None,
            reader: None,
        }
    }

    pub fn state(&self) -> ChannelState {
        if self.is_connected() {
            ChannelState::Connected
        } else {
            ChannelState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Opens the connection to `url` and returns the receiver on which
    /// relayed messages arrive.
    pub async fn connect(&mut self, url: &str) -> Result<UnboundedReceiver<Message>> {
        if self.is_connected() {
            return Err(ForumError::AlreadyConnected);
        }
        // release tasks left over from a transport that dropped on its own
        self.disconnect();

        let (ws_stream, _response) = connect_async(url).await?;
        let (mut ws_sender, mut ws_receiver) = ws_stream.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<Message>();
        let connected = Arc::new(AtomicBool::new(true));

        {
            let connected = connected.clone();
            tokio::spawn(async move {
                while let Some(frame) = rx.recv().await {
                    if let Err(e) = ws_sender.send(frame).await {
                        warn!("Failed to send event to relay: {e}");
                        connected.store(false, Ordering::SeqCst);
                        break;
                    }
                }
                let _ = ws_sender.close().await;
                debug!("Send loop closed");
            });
        }

        let reader = {
            let connected = connected.clone();
            tokio::spawn(async move {
                while let Some(frame) = ws_receiver.next().await {
                    match frame {
                        Ok(WsMessage::Text(text)) => forward_event(text.as_str(), &inbound_tx),
                        Ok(WsMessage::Close(_)) => break,
                        Ok(_) => {}
                        Err(e) => {
                            warn!("Relay connection error: {e}");
                            break;
                        }
                    }
                }
                // must flip before inbound_tx drops so receivers observe the new state
                connected.store(false, Ordering::SeqCst);
                info!("Relay connection closed");
            })
        };

        self.connected = connected;
        self.outbound = Some(tx);
        self.reader = Some(reader);
        info!("Connected to relay at {url}");

        Ok(inbound_rx)
    }

    /// Queues `message` as one `user-message` event. The message is not
    /// echoed locally; it shows up only once the relay sends it back.
    pub fn send(&self, message: &Message) -> Result<()> {
        if !self.is_connected() {
            return Err(ForumError::NotConnected);
        }
        let outbound = self.outbound.as_ref().ok_or(ForumError::NotConnected)?;
        let frame = Envelope::user_message(message)?.to_frame()?;

        outbound.send(frame).map_err(|_| ForumError::ChannelClosed)
    }

    /// Closes the connection. In-flight inbound events are discarded.
    pub fn disconnect(&mut self) {
        let was_connected = self.connected.swap(false, Ordering::SeqCst);

        // dropping the queue ends the send loop, which closes the socket
        self.outbound.take();
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }

        if was_connected {
            info!("Disconnected from relay");
        }
    }
}

impl Drop for SyncChannel {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn forward_event(text: &str, inbound: &UnboundedSender<Message>) {
    let envelope = match Envelope::from_text(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(
                "Ignoring malformed frame: {e} | {}",
                text.chars().take(100).collect::<String>()
            );
            return;
        }
    };

    if !envelope.is_user_message() {
        debug!("Ignoring event '{}'", envelope.event);
        return;
    }

    match envelope.into_message() {
        Ok(message) => {
            // receiver gone means the view unmounted; nothing left to do
            let _ = inbound.send(message);
        }
        Err(e) => warn!("Dropping undecodable user-message payload: {e}"),
    }
}
