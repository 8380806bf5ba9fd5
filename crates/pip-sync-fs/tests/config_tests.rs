use pip_sync_fs::{ConfigStore, Error};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "name = \"test\"\ncount = 42").unwrap();

    let config: TestConfig = ConfigStore::new().load(&path).unwrap();

    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(&path, r#"{"name": "test", "count": 42}"#).unwrap();

    let config: TestConfig = ConfigStore::new().load(&path).unwrap();

    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_save_then_load_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state.json");
    let store = ConfigStore::new();
    let value = TestConfig { name: "saved".into(), count: 7 };

    store.save(&path, &value).unwrap();
    let loaded: TestConfig = store.load(&path).unwrap();

    assert_eq!(loaded, value);
}

#[test]
fn test_invalid_json_is_config_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{not json").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);

    assert!(matches!(result, Err(Error::ConfigParse { .. })));
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.ini");
    fs::write(&path, "[section]").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);

    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_save_refuses_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pyproject.toml");
    let value = TestConfig { name: "saved".into(), count: 7 };

    let result = ConfigStore::new().save(&path, &value);

    assert!(matches!(result, Err(Error::UnsupportedFormat { ref extension }) if extension == "toml"));
    assert!(!path.exists());
}
