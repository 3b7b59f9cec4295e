use super::settings::Settings;
use super::{load_config_from, parse_relay_url};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.relay.host, "127.0.0.1");
    assert_eq!(settings.relay.port, 8080);
    assert_eq!(settings.relay.max_connections, 1000);
    assert_eq!(settings.client.relay_url, "ws://127.0.0.1:8080");
    assert_eq!(settings.client.display_name, "You");
    assert_eq!(settings.client.role, "Member");
    assert!(!settings.store.dedupe_by_id);
    assert_eq!(settings.store.max_messages, None);
}

#[test]
fn test_bind_addr() {
    let settings = Settings::default();
    assert_eq!(settings.relay.bind_addr(), "127.0.0.1:8080");
}

#[test]
fn relay_url_accepts_websocket_schemes() {
    assert!(parse_relay_url("ws://127.0.0.1:8080").is_ok());
    assert!(parse_relay_url("wss://relay.example.com/socket").is_ok());
}

#[test]
fn relay_url_rejects_other_schemes_and_garbage() {
    assert!(parse_relay_url("https://relay.example.com").is_err());
    assert!(parse_relay_url("not a url").is_err());
}

#[test]
#[serial]
fn load_config_without_file_uses_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let cfg = load_config_from(&tmp.path().join("missing")).expect("load_config failed");
    assert_eq!(cfg.relay.port, 8080);
    assert_eq!(cfg.client.relay_url, "ws://127.0.0.1:8080");
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let toml = r#"
        [relay]
        host = "0.0.0.0"
        port = 9000
        max_connections = 10

        [client]
        relay_url = "ws://relay.local:9000"
        display_name = "Sam"

        [store]
        dedupe_by_id = true
        max_messages = 50
    "#;
    fs::write(tmp.path().join("forum.toml"), toml).expect("write config file");

    let cfg = load_config_from(&tmp.path().join("forum")).expect("load_config failed");
    assert_eq!(cfg.relay.host, "0.0.0.0");
    assert_eq!(cfg.relay.port, 9000);
    assert_eq!(cfg.relay.max_connections, 10);
    assert_eq!(cfg.client.relay_url, "ws://relay.local:9000");
    assert_eq!(cfg.client.display_name, "Sam");
    // untouched keys keep their defaults
    assert_eq!(cfg.client.role, "Member");
    assert!(cfg.store.dedupe_by_id);
    assert_eq!(cfg.store.max_messages, Some(50));
}

#[test]
#[serial]
fn load_config_from_env_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    temp_env::with_vars(
        [
            ("FORUM_CLIENT__RELAY_URL", Some("ws://10.0.0.2:9100")),
            ("FORUM_RELAY__PORT", Some("9100")),
            ("FORUM_STORE__DEDUPE_BY_ID", Some("true")),
        ],
        || {
            let cfg = load_config_from(&tmp.path().join("missing")).expect("load_config failed");
            assert_eq!(cfg.client.relay_url, "ws://10.0.0.2:9100");
            assert_eq!(cfg.relay.port, 9100);
            assert!(cfg.store.dedupe_by_id);
        },
    );
}

#[test]
#[serial]
fn load_config_treats_zero_max_messages_as_unset() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(
        tmp.path().join("forum.toml"),
        "[store]\nmax_messages = 0\n",
    )
    .expect("write config file");

    let cfg = load_config_from(&tmp.path().join("forum")).expect("load_config failed");
    assert_eq!(cfg.store.max_messages, None);
}
