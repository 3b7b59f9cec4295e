//! Forum session
//!
//! `ForumSession` is the connection manager owned by the forum view. It ties
//! the message store to the sync channel: user submissions go out through the
//! channel, relayed messages come back in through `apply_inbound`, likes stay
//! local. The relay is the single source of truth for new messages, so
//! `submit` never appends to the store.

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use crate::channel::{ChannelState, SyncChannel};
use crate::config::Settings;
use crate::forum::message::{Author, LocalIdGenerator, Message, seed_messages};
use crate::forum::store::MessageStore;
use crate::utils::Result;

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming; nothing was sent.
    Blocked,
    /// Exactly one `user-message` event was queued for the relay.
    Emitted(Message),
    /// The channel refused the event. Not retried, not queued.
    Dropped(Message),
}

#[derive(Debug)]
pub struct ForumSession {
    store: MessageStore,
    channel: SyncChannel,
    author: Author,
    ids: LocalIdGenerator,
}

impl ForumSession {
    pub fn new(store: MessageStore, author: Author) -> Self {
        Self {
            store,
            channel: SyncChannel::new(),
            author,
            ids: LocalIdGenerator::new(),
        }
    }

    /// Session seeded with the fixture messages and configured identity.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            MessageStore::with_settings(seed_messages(), &settings.store),
            Author::from_settings(&settings.client),
        )
    }

    pub async fn mount(&mut self, relay_url: &str) -> Result<UnboundedReceiver<Message>> {
        self.channel.connect(relay_url).await
    }

    pub fn unmount(&mut self) {
        self.channel.disconnect();
    }

    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let Some(message) = Message::compose(text, self.author.clone(), self.ids.next_id()) else {
            return SubmitOutcome::Blocked;
        };

        match self.channel.send(&message) {
            Ok(()) => {
                debug!("Emitted message {}", message.id);
                SubmitOutcome::Emitted(message)
            }
            Err(e) => {
                warn!("Message {} was not sent: {e}", message.id);
                SubmitOutcome::Dropped(message)
            }
        }
    }

    pub fn like(&mut self, id: &str) -> bool {
        self.store.increment_like(id)
    }

    pub fn apply_inbound(&mut self, message: Message) -> bool {
        self.store.append(message)
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }
}
