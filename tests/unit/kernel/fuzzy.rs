use super::*;

#[test]
fn test_subsequence() {
    assert!(matches("abc", "aXbXc"));
    assert!(matches("abc", "abc"));
    assert!(!matches("abc", "acb"));
    assert!(!matches("abcd", "abc"));
}

#[test]
fn test_empty_pattern_matches_everything() {
    assert!(matches("", ""));
    assert!(matches("", "anything"));
}

#[test]
fn test_case_insensitive() {
    assert!(matches("TGS", "View: Toggle Sidebar"));
    assert!(matches("äö", "ÄpfelÖl"));
    assert!(!matches("x", ""));
}

#[test]
fn test_filter_indices_keeps_order() {
    let items = [
        "View: Toggle Sidebar",
        "Explorer: New File",
        "Editor: Fold",
        "Quit",
    ];
    assert_eq!(filter_indices("ef", &items), vec![1, 2]);
    assert_eq!(filter_indices("  ", &items), vec![0, 1, 2, 3]);
    assert!(filter_indices("zzz", &items).is_empty());
}

#[test]
fn test_filter_indices_paths() {
    let files = vec![
        "src/kernel/search.rs".to_string(),
        "src/main.rs".to_string(),
        "README.md".to_string(),
    ];
    assert_eq!(filter_indices("srs", &files), vec![0, 1]);
}
