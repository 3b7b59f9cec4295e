//! The `relay` module is a small named-event relay the forum client can talk
//! to: every event a peer emits is rebroadcast to all connected peers.
//!
//! It keeps no history and performs no acknowledgement tracking.

pub mod hub;
pub mod peer;
pub mod server;

pub use hub::{Relay, SharedRelay};
pub use peer::{Peer, PeerId};
pub use server::{serve, start_relay_server};
