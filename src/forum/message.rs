//! Message definitions for the forum
//!
//! `Message` is both the in-memory record shown in the view and the payload of
//! the `user-message` event. The message field names (`user`, `timestamp`,
//! `likes`, `replies`, `tags`) match the ones the web forum client uses; the
//! framing around them is this crate's own `{"event", "data"}` envelope.
//!
//! Decoding is lenient: only `id` and `content` are required. Display fields
//! that are missing, `null` or of an unexpected type fall back to an empty
//! value, counts accept non-negative floats, and a numeric `id` is accepted.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::{ClientSettings, DEFAULT_AVATAR};

/// Label attached to messages composed in this session.
pub const JUST_NOW: &str = "Just now";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub avatar: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,
}

impl Author {
    pub fn new(name: &str, avatar: &str, role: &str) -> Self {
        Self {
            name: name.to_string(),
            avatar: avatar.to_string(),
            role: role.to_string(),
        }
    }

    /// The placeholder identity attached to everything this client posts.
    pub fn current_user() -> Self {
        Self::new("You", DEFAULT_AVATAR, "Member")
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(&settings.display_name, &settings.avatar, &settings.role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "user", default, deserialize_with = "lenient_author")]
    pub author: Author,
    pub content: String,
    /// Human readable relative label such as "2 hours ago"; never recomputed.
    #[serde(rename = "timestamp", default, deserialize_with = "lenient_string")]
    pub created_label: String,
    #[serde(rename = "likes", default, deserialize_with = "lenient_count")]
    pub like_count: u32,
    #[serde(rename = "replies", default, deserialize_with = "lenient_count")]
    pub reply_count: u32,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
}

impl Message {
    /// Builds an outbound message from raw user input.
    ///
    /// Returns `None` when the trimmed text is empty; such submissions never
    /// reach the sync channel.
    pub fn compose(text: &str, author: Author, id: String) -> Option<Self> {
        let content = text.trim();
        if content.is_empty() {
            return None;
        }

        Some(Self {
            id,
            author,
            content: content.to_string(),
            created_label: JUST_NOW.to_string(),
            like_count: 0,
            reply_count: 0,
            tags: Vec::new(),
        })
    }
}

/// Fixture messages every session starts with.
pub fn seed_messages() -> Vec<Message> {
    vec![
        Message {
            id: "1".to_string(),
            author: Author::new("Alex Johnson", DEFAULT_AVATAR, "Software Engineer"),
            content: "Has anyone gone through the system design interview at Tech Corp recently? \
                      I'm preparing for one next week and would appreciate any tips."
                .to_string(),
            created_label: "2 hours ago".to_string(),
            like_count: 5,
            reply_count: 3,
            tags: Vec::new(),
        },
        Message {
            id: "2".to_string(),
            author: Author::new("Jamie Smith", DEFAULT_AVATAR, "Senior Developer"),
            content: "I just had one last month! They asked me to design a distributed cache \
                      system. Focus on scalability, data consistency, and failure handling. \
                      Make sure to clarify requirements before diving into the solution."
                .to_string(),
            created_label: "1 hour ago".to_string(),
            like_count: 8,
            reply_count: 1,
            tags: Vec::new(),
        },
    ]
}

/// Hands out timestamp-derived ids (epoch milliseconds) that never repeat
/// within one session, even when two messages are composed in the same
/// millisecond.
#[derive(Debug, Default)]
pub struct LocalIdGenerator {
    last: i64,
}

impl LocalIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    pub(crate) fn next_at(&mut self, now_millis: i64) -> String {
        let id = now_millis.max(self.last + 1);
        self.last = id;
        id.to_string()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).unwrap_or(u32::MAX),
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.min(u32::MAX as f64) as u32)
                .unwrap_or(0),
        },
        _ => 0,
    };
    Ok(count)
}

fn lenient_author<'de, D>(deserializer: D) -> Result<Author, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => Author::default(),
    })
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    })
}
