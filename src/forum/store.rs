//! In-memory message store
//!
//! An append-only, insertion-ordered list of messages. The two permitted
//! mutations are `append` (relayed deliveries) and `increment_like` (local
//! only). There is no removal operation.
//!
//! By default duplicates are kept and growth is unbounded. `dedupe_by_id` and
//! `max_messages` opt into id-based deduplication and oldest-first eviction.
//!
//! Callers own the store exclusively; the forum event loop applies one
//! mutation at a time.

use tracing::debug;

use crate::config::StoreSettings;
use crate::forum::message::Message;

#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    dedupe_by_id: bool,
    max_messages: Option<usize>,
}

impl MessageStore {
    pub fn new(seed: Vec<Message>) -> Self {
        Self {
            messages: seed,
            dedupe_by_id: false,
            max_messages: None,
        }
    }

    pub fn with_settings(seed: Vec<Message>, settings: &StoreSettings) -> Self {
        let mut store = Self {
            messages: seed,
            dedupe_by_id: settings.dedupe_by_id,
            // a cap of zero would evict every append; treat it as unset
            max_messages: settings.max_messages.filter(|max| *max > 0),
        };
        store.evict_overflow();
        store
    }

    /// Appends `message` at the end. Returns `false` only when deduplication
    /// is enabled and a message with the same id is already present.
    pub fn append(&mut self, message: Message) -> bool {
        if self.dedupe_by_id && self.get(&message.id).is_some() {
            debug!("Dropping duplicate message {}", message.id);
            return false;
        }

        self.messages.push(message);
        self.evict_overflow();
        true
    }

    /// Adds one like to the first message with `id`. Unknown ids are a no-op.
    pub fn increment_like(&mut self, id: &str) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.like_count = message.like_count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn evict_overflow(&mut self) {
        if let Some(max) = self.max_messages {
            if self.messages.len() > max {
                let excess = self.messages.len() - max;
                self.messages.drain(..excess);
                debug!("Evicted {excess} oldest messages");
            }
        }
    }
}
