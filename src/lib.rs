//! # forumsync
//!
//! `forumsync` is a minimal real-time forum. A terminal client shows a list of
//! messages and posts new ones through a named-event relay, which rebroadcasts
//! them to every connected client.
//!
//! ## Core Modules
//!
//! - `forum`: the message model, the append-only message store and the session
//!   that ties them to the relay connection.
//! - `channel`: the sync channel (client side of the relay connection) and the
//!   `{"event", "data"}` wire format.
//! - `relay`: a small WebSocket relay that rebroadcasts events to all peers.
//! - `config`: layered configuration loading.
//! - `view` and `input`: terminal rendering and line parsing.
//! - `utils`: the shared error type and logging setup.

pub mod channel;
pub mod config;
pub mod forum;
pub mod input;
pub mod relay;
pub mod utils;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;
