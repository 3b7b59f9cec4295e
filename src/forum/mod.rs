//! The `forum` module holds the client-side state of the forum: the message
//! model, the append-only store and the session that wires both to the
//! relay connection.

pub mod message;
pub mod session;
pub mod store;

pub use message::{Author, LocalIdGenerator, Message, seed_messages};
pub use session::{ForumSession, SubmitOutcome};
pub use store::MessageStore;
