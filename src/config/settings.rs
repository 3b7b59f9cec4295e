use serde::Deserialize;
use url::Url;

use crate::utils::{ForumError, Result};

/// Relay address the client uses when nothing else is configured.
pub const DEFAULT_RELAY_URL: &str = "ws://127.0.0.1:8080";

/// Avatar reference attached to locally authored messages.
pub const DEFAULT_AVATAR: &str = "/placeholder.svg?height=40&width=40";

/// Top-level configuration settings for the application.
///
/// Groups the relay server, the forum client and the message store settings.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub relay: RelaySettings,
    pub client: ClientSettings,
    pub store: StoreSettings,
}

/// Configuration settings for the relay server.
///
/// Defines the bind address and how many peers may be connected at once.
#[derive(Debug, Deserialize, Clone)]
pub struct RelaySettings {
    pub host: String,
    pub port: u16,
    pub max_connections: usize,
}

/// Configuration settings for the forum client.
///
/// `relay_url` is the relay the sync channel connects to; the remaining
/// fields make up the placeholder identity attached to outbound messages.
#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    pub relay_url: String,
    pub display_name: String,
    pub avatar: String,
    pub role: String,
}

/// Configuration settings for the in-memory message store.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreSettings {
    pub dedupe_by_id: bool,
    pub max_messages: Option<usize>,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub relay: Option<PartialRelaySettings>,
    pub client: Option<PartialClientSettings>,
    pub store: Option<PartialStoreSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialRelaySettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_connections: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialClientSettings {
    pub relay_url: Option<String>,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub dedupe_by_id: Option<bool>,
    pub max_messages: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            relay: RelaySettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                max_connections: 1000,
            },
            client: ClientSettings {
                relay_url: DEFAULT_RELAY_URL.to_string(),
                display_name: "You".to_string(),
                avatar: DEFAULT_AVATAR.to_string(),
                role: "Member".to_string(),
            },
            store: StoreSettings::default(),
        }
    }
}

impl RelaySettings {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ClientSettings {
    /// Parses `relay_url`, accepting only WebSocket schemes.
    pub fn relay_url(&self) -> Result<Url> {
        parse_relay_url(&self.relay_url)
    }
}

pub fn parse_relay_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| ForumError::InvalidRelayUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(ForumError::InvalidRelayUrl {
            url: raw.to_string(),
            reason: format!("scheme must be ws or wss, got {other}"),
        }),
    }
}
