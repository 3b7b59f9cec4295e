//! The `channel` module is the client side of the relay connection.
//!
//! It defines the named-event wire format shared with the relay and the
//! `SyncChannel` that connects, emits `user-message` events and listens for
//! the ones the relay broadcasts.

pub mod event;
pub mod sync_channel;

pub use event::{Envelope, USER_MESSAGE_EVENT};
pub use sync_channel::{ChannelState, SyncChannel};
