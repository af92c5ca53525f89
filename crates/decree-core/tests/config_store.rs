use tempfile::TempDir;

use decree_core::config::{ConfigStore, DecreeConfig};

#[test]
fn load_missing_returns_default_config() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_path(temp.path().join("decree").join("decree.toml"));

    let config = store.load().unwrap();

    assert!(!store.exists());
    assert_eq!(config, DecreeConfig::new());
}

#[test]
fn save_then_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_path(temp.path().join("decree").join("decree.toml"));

    let mut config = DecreeConfig::template();
    config.project = "Fabrikam".to_string();
    config.user_name = Some("Jamal Hartnett".to_string());

    store.save(&config).unwrap();
    let loaded = store.load().unwrap();

    assert!(store.exists());
    assert_eq!(loaded, config);
}

#[test]
fn invalid_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("decree.toml");
    std::fs::write(&path, "organization = \"not a url\"\n").unwrap();

    let err = ConfigStore::from_path(&path).load().unwrap_err();

    assert!(format!("{err:#}").contains("decree.toml"));
}
