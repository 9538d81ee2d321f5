use super::*;
use crate::kernel::services::adapters::file::LocalFileProvider;
use std::fs;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

fn seeded_project() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("node_modules/dep")).unwrap();
    fs::write(root.join("src/lib.rs"), "pub fn alpha() {}\npub fn beta() {}\n").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() { alpha(); }\n").unwrap();
    fs::write(root.join("node_modules/dep/index.js"), "alpha").unwrap();
    fs::write(root.join("notes.md"), "Alpha notes\n").unwrap();
    dir
}

fn session_for(dir: &TempDir) -> SearchSession {
    SearchSession::open(
        Arc::new(LocalFileProvider::new()),
        dir.path().to_path_buf(),
        SearchLimits::default(),
    )
}

#[test]
fn test_open_fills_candidate_cache() {
    let dir = seeded_project();
    let session = session_for(&dir);
    assert_eq!(session.candidates().len(), 3);
    assert!(session.results().is_empty());
    assert!(!session.is_pending());
}

#[test]
fn test_debounce_waits_for_deadline() {
    let dir = seeded_project();
    let mut session = session_for(&dir);
    let t0 = Instant::now();

    let id = session.set_query("alpha", t0).unwrap();
    assert!(session.is_pending());
    assert!(!session.poll(t0 + Duration::from_millis(100)));
    assert!(session.results().is_empty());

    assert!(session.poll(t0 + Duration::from_millis(300)));
    assert!(!session.is_pending());
    assert_eq!(session.active_search_id(), Some(id));

    let paths: Vec<&str> = session
        .results()
        .iter()
        .map(|r| r.relative_path.as_str())
        .collect();
    assert_eq!(paths, vec!["src/lib.rs", "src/main.rs", "notes.md"]);
}

#[test]
fn test_new_query_supersedes_pending() {
    let dir = seeded_project();
    let mut session = session_for(&dir);
    let t0 = Instant::now();

    let first = session.set_query("alpha", t0).unwrap();
    let second = session
        .set_query("beta", t0 + Duration::from_millis(200))
        .unwrap();
    assert_ne!(first, second);

    // first deadline passed, second not yet
    assert!(!session.poll(t0 + Duration::from_millis(350)));
    assert!(session.results().is_empty());

    assert!(session.poll(t0 + Duration::from_millis(500)));
    assert_eq!(session.active_search_id(), Some(second));
    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].matched.matched_text, "beta");
}

#[test]
fn test_cancel_pending_drops_armed_search() {
    let dir = seeded_project();
    let mut session = session_for(&dir);
    let t0 = Instant::now();

    assert!(!session.cancel_pending());
    let id = session.set_query("alpha", t0).unwrap();
    assert_eq!(session.pending().map(|p| p.id()), Some(id));

    assert!(session.cancel_pending());
    assert!(!session.is_pending());
    assert!(!session.poll(t0 + Duration::from_secs(1)));
    assert_eq!(session.active_search_id(), None);
}

#[test]
fn test_short_query_clears_immediately() {
    let dir = seeded_project();
    let mut session = session_for(&dir);
    let t0 = Instant::now();

    session.set_query("alpha", t0);
    assert!(session.flush());
    assert!(!session.results().is_empty());

    session.set_query("beta", t0);
    assert_eq!(session.set_query("a", t0), None);
    assert!(session.results().is_empty());
    assert!(!session.is_pending());
    assert_eq!(session.active_search_id(), None);
    assert!(!session.poll(t0 + Duration::from_secs(10)));
}

#[test]
fn test_refresh_picks_up_new_files() {
    let dir = seeded_project();
    let mut session = session_for(&dir);
    fs::write(dir.path().join("later.txt"), "alpha later").unwrap();

    session.set_query("later", Instant::now());
    session.flush();
    assert!(session.results().is_empty());

    assert_eq!(session.refresh(), 4);
    session.set_query("later", Instant::now());
    session.flush();
    assert_eq!(session.results().len(), 1);
}

#[test]
fn test_selection_wraps() {
    let dir = seeded_project();
    let mut session = session_for(&dir);
    session.set_query("alpha", Instant::now());
    session.flush();
    assert_eq!(session.results().len(), 3);

    assert!(!session.move_selection(0));
    assert!(session.move_selection(-1));
    assert_eq!(session.selected_index(), 2);
    assert!(session.move_selection(1));
    assert_eq!(session.selected_index(), 0);
    assert_eq!(
        session.selected().map(|r| r.relative_path.as_str()),
        Some("src/lib.rs")
    );
}
