//! Tests for configuration layering.

use std::collections::HashMap;
use std::io::Write;

use tempfile::NamedTempFile;

use chopsticks::{
    ENV_DB_PATH, ENV_PORT, ENV_STORAGE, Hand, HandState, Player, ServerConfig, StorageBackend,
};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write config");
    file
}

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 5000);
    assert_eq!(*config.storage(), StorageBackend::Memory);
    assert_eq!(config.db_path(), "chopsticks.db");
}

#[test]
fn test_from_file_fills_missing_fields_with_defaults() {
    let file = write_config("storage = \"sqlite\"\ndb_path = \"game.db\"\n");
    let config = ServerConfig::from_file(file.path()).expect("Failed to load config");

    assert_eq!(*config.storage(), StorageBackend::Sqlite);
    assert_eq!(config.db_path(), "game.db");
    assert_eq!(*config.port(), 5000);
}

#[test]
fn test_from_file_accepts_passthrough_identifier() {
    let file = write_config("storage = \"passthrough\"\n");
    let config = ServerConfig::from_file(file.path()).expect("Failed to load config");
    assert_eq!(*config.storage(), StorageBackend::Memory);
}

#[test]
fn test_from_file_rejects_unknown_backend() {
    let file = write_config("storage = \"redis\"\n");
    assert!(ServerConfig::from_file(file.path()).is_err());
}

#[test]
fn test_from_file_missing_file_fails() {
    let result = ServerConfig::from_file("/nonexistent/chopsticks.toml");
    let err = result.expect_err("missing file should fail");
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_env_overrides_file() {
    let file = write_config("port = 8080\nstorage = \"memory\"\n");
    let config = ServerConfig::from_file(file.path())
        .expect("Failed to load config")
        .with_env(env(&[
            (ENV_PORT, "9090"),
            (ENV_STORAGE, "sqlite"),
            (ENV_DB_PATH, "/tmp/other.db"),
        ]))
        .expect("Failed to apply env");

    assert_eq!(*config.port(), 9090);
    assert_eq!(*config.storage(), StorageBackend::Sqlite);
    assert_eq!(config.db_path(), "/tmp/other.db");
    assert_eq!(config.host(), "127.0.0.1");
}

#[test]
fn test_env_rejects_bad_values() {
    assert!(
        ServerConfig::default()
            .with_env(env(&[(ENV_PORT, "not-a-port")]))
            .is_err()
    );
    assert!(
        ServerConfig::default()
            .with_env(env(&[(ENV_STORAGE, "mongo")]))
            .is_err()
    );
}

#[test]
fn test_cli_overrides_take_precedence() {
    let config = ServerConfig::default()
        .with_env(env(&[(ENV_PORT, "9090")]))
        .expect("Failed to apply env")
        .with_overrides(Some("0.0.0.0".to_string()), Some(7000), None, None);

    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 7000);
    assert_eq!(*config.storage(), StorageBackend::Memory);
}

#[test]
fn test_open_game_uses_configured_backend() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let config = ServerConfig::default().with_overrides(
        None,
        None,
        Some(StorageBackend::Sqlite),
        Some(db_path.clone()),
    );

    let mut game = config.open_game().expect("Failed to open game");
    game.make_move("0", "left", "left").expect("Valid move");

    let store = chopsticks::SqliteStore::new(db_path).expect("store");
    let hands = chopsticks::HandStore::player(&store, Player::Second).expect("read");
    assert_eq!(hands, HandState::new(2, 1));
    assert_eq!(hands.get(Hand::Left), 2);
}
