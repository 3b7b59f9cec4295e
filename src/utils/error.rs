//! The `error` module defines the error type shared by every `forumsync` module.
//!
//! Transport failures are reported through `ForumError` but the forum view never
//! surfaces them; callers log and move on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForumError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid relay url `{url}`: {reason}")]
    InvalidRelayUrl { url: String, reason: String },

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sync channel is already connected")]
    AlreadyConnected,

    #[error("sync channel is not connected")]
    NotConnected,

    #[error("sync channel closed before the event could be queued")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, ForumError>;
