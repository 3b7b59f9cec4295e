use serde::{Deserialize, Serialize};
use tungstenite::protocol::Message as WsMessage;

use crate::forum::Message;

/// The only event name the forum emits and listens for.
pub const USER_MESSAGE_EVENT: &str = "user-message";

/// A named event as it travels over the relay: one JSON text frame of the
/// form `{"event": "...", "data": ...}`.
///
/// `data` stays untyped so the relay can rebroadcast payloads it does not
/// understand without touching them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    pub fn user_message(message: &Message) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event: USER_MESSAGE_EVENT.to_string(),
            data: serde_json::to_value(message)?,
        })
    }

    pub fn is_user_message(&self) -> bool {
        self.event == USER_MESSAGE_EVENT
    }

    /// Decodes the payload of a `user-message` event.
    pub fn into_message(self) -> Result<Message, serde_json::Error> {
        serde_json::from_value(self.data)
    }

    pub fn to_frame(&self) -> Result<WsMessage, serde_json::Error> {
        Ok(WsMessage::text(serde_json::to_string(self)?))
    }

    pub fn from_text(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
