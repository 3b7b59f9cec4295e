mod settings;

use std::path::Path;

use config::{Config, ConfigError, Environment, File};

use crate::config::settings::PartialSettings;

pub use settings::{
    ClientSettings, DEFAULT_AVATAR, DEFAULT_RELAY_URL, RelaySettings, Settings, StoreSettings,
    parse_relay_url,
};

/// Loads the configuration from `config/default` and `FORUM_*` environment
/// variables, merged over the built-in defaults.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(Path::new("config/default"))
}

/// Same as [`load_config`] but reads the optional file at `path` (extension
/// is inferred by the `config` crate).
///
/// Environment variables use the `FORUM_` prefix and `__` between nested
/// keys, e.g. `FORUM_CLIENT__RELAY_URL`. A `.env` file is honoured if present.
pub fn load_config_from(path: &Path) -> Result<Settings, ConfigError> {
    let _ = dotenvy::dotenv();

    let builder = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("FORUM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    Ok(Settings {
        relay: RelaySettings {
            host: partial
                .relay
                .as_ref()
                .and_then(|r| r.host.clone())
                .unwrap_or(default.relay.host),
            port: partial
                .relay
                .as_ref()
                .and_then(|r| r.port)
                .unwrap_or(default.relay.port),
            max_connections: partial
                .relay
                .as_ref()
                .and_then(|r| r.max_connections)
                .unwrap_or(default.relay.max_connections),
        },
        client: ClientSettings {
            relay_url: partial
                .client
                .as_ref()
                .and_then(|c| c.relay_url.clone())
                .unwrap_or(default.client.relay_url),
            display_name: partial
                .client
                .as_ref()
                .and_then(|c| c.display_name.clone())
                .unwrap_or(default.client.display_name),
            avatar: partial
                .client
                .as_ref()
                .and_then(|c| c.avatar.clone())
                .unwrap_or(default.client.avatar),
            role: partial
                .client
                .as_ref()
                .and_then(|c| c.role.clone())
                .unwrap_or(default.client.role),
        },
        store: StoreSettings {
            dedupe_by_id: partial
                .store
                .as_ref()
                .and_then(|s| s.dedupe_by_id)
                .unwrap_or(default.store.dedupe_by_id),
            max_messages: partial
                .store
                .as_ref()
                .and_then(|s| s.max_messages)
                .filter(|max| *max > 0)
                .or(default.store.max_messages),
        },
    })
}

#[cfg(test)]
mod tests;
