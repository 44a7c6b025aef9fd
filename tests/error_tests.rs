// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use pokedex_cache::config::AppConfig;
use pokedex_cache::CacheError;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        CacheError::Storage("unavailable".to_string()),
        CacheError::QuotaExceeded("5 MiB".to_string()),
        CacheError::Config("bad value".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_quota_error() {
    let error = CacheError::QuotaExceeded("session would be 9000 bytes".to_string());
    assert!(format!("{}", error).contains("quota exceeded"));
    assert_eq!(error.kind(), "quota_exceeded");
}

#[test]
fn test_json_error_conversion() {
    let parse_error = serde_json::from_str::<Vec<String>>("{").unwrap_err();
    let error: CacheError = parse_error.into();
    assert!(matches!(error, CacheError::Json(_)));
    assert_eq!(error.kind(), "json");
}

#[test]
fn test_io_error_conversion() {
    let error: CacheError = std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into();
    assert!(format!("{}", error).contains("disk gone"));
}

#[test]
fn test_invalid_config_file_is_config_error() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[cache]\nmax_entries = \"lots\"\n").unwrap();

    let result = AppConfig::load_from(path.to_str().unwrap());
    assert!(matches!(result, Err(CacheError::Config(_))));
}

#[test]
fn test_config_file_overrides_defaults() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[cache]\nmax_entries = 12\n\n[storage]\nbackend = \"none\"\n").unwrap();

    let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();
    assert_eq!(config.cache.max_entries, 12);
    assert_eq!(config.cache.default_expiration_minutes, 60);
    assert_eq!(config.storage.backend, pokedex_cache::config::StorageBackend::None);
}
