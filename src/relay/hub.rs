//! Relay hub
//!
//! Tracks connected peers and rebroadcasts every named event to all of them,
//! the sender included. The hub keeps no history: a peer only sees events
//! broadcast while it is registered.
//!
//! The API is synchronous and meant to sit behind `Arc<Mutex<Relay>>`. Never
//! hold the lock across network I/O; sends only push into per-peer queues.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::relay::peer::{Peer, PeerId};

pub type SharedRelay = Arc<Mutex<Relay>>;

#[derive(Debug, Default)]
pub struct Relay {
    peers: HashMap<PeerId, Peer>,
}

impl Relay {
    pub fn new() -> Self {
        Self {
            peers: HashMap::new(),
        }
    }

    pub fn shared() -> SharedRelay {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn register_peer(&mut self, peer: Peer) {
        self.peers.insert(peer.id.clone(), peer);
    }

    pub fn remove_peer(&mut self, peer_id: &PeerId) {
        if self.peers.remove(peer_id).is_some() {
            debug!("Removed peer {peer_id}");
        }
    }

    pub fn contains_peer(&self, peer_id: &PeerId) -> bool {
        self.peers.contains_key(peer_id)
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Sends `frame` as received to every registered peer and returns how
    /// many queues accepted it. The frame is never re-encoded.
    pub fn broadcast(&self, frame: &WsMessage) -> usize {
        let mut delivered = 0;
        for (peer_id, peer) in &self.peers {
            if let Err(e) = peer.sender.send(frame.clone()) {
                warn!("Failed to queue event for {peer_id}: {e}");
            } else {
                delivered += 1;
            }
        }
        delivered
    }
}

/// Locks the shared relay, recovering the state if a holder panicked.
pub fn lock(relay: &SharedRelay) -> MutexGuard<'_, Relay> {
    relay.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
