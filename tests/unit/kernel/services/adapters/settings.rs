use super::*;
use tempfile::tempdir;

#[test]
fn test_parse_partial_settings_keeps_defaults() {
    let settings = parse_settings(r#"{ "search": { "maxResults": 20 } }"#).unwrap();
    assert_eq!(settings.search.max_results, 20);
    assert_eq!(settings.search.max_results_per_file, 10);
    assert_eq!(settings.search.ignored_dirs, vec!["node_modules".to_string()]);

    let settings = parse_settings("{}").unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_parse_malformed_settings() {
    assert!(parse_settings("{ not json").is_err());
}

#[test]
fn test_write_and_load_default_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    write_default_settings(&path).unwrap();
    assert!(path.exists());
    assert_eq!(load_settings_from(&path), Some(Settings::default()));

    std::fs::write(&path, r#"{ "search": { "debounce_ms": 5 } }"#).unwrap();
    write_default_settings(&path).unwrap();
    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded.search.debounce_ms, 5);
}

#[test]
fn test_load_missing_or_broken_settings() {
    let dir = tempdir().unwrap();
    assert_eq!(load_settings_from(&dir.path().join("missing.json")), None);

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "[1, 2").unwrap();
    assert_eq!(load_settings_from(&broken), None);
}
