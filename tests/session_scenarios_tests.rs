//! End-to-end scenarios for the tab session command surface.
//!
//! Each test drives a `TabSession` backed by a real `FileStore` in a temp
//! directory and a manual clock, then checks the active tab, the MRU history,
//! the closed-tab cache, and what a fresh session would see on disk.

mod common;

use common::{
    FakeContentStore, PROJECT, chapter, config_with_tmp_data_dir, file_session, notes,
    plain_session,
};
use folio::clock::ManualClock;
use folio::{FileStore, KeyValueStore, PersistenceGateway, TabId};

fn active(session_active: Option<&TabId>) -> Option<&str> {
    session_active.map(TabId::as_str)
}

// ============================================================================
// Active tab selection
// ============================================================================

#[test]
fn test_close_active_returns_to_previous_tab() {
    let (config, _tmp) = config_with_tmp_data_dir();
    let clock = ManualClock::new(1_000);
    let mut session = plain_session(&config, &clock);

    let a = session.open_tab(notes("A"));
    let b = session.open_tab(notes("B"));
    let c = session.open_tab(notes("C"));
    assert_eq!((a.order, b.order, c.order), (0, 1, 2));

    session.activate_tab(&"B".into());
    session.activate_tab(&"C".into());
    let history: Vec<&str> = session.history().iter().map(TabId::as_str).collect();
    assert_eq!(history, vec!["B", "A"]);

    session.close_tab(&"C".into());
    assert_eq!(active(session.active_tab_id()), Some("B"));
    let history: Vec<&str> = session.history().iter().map(TabId::as_str).collect();
    assert_eq!(history, vec!["A"]);
}

#[test]
fn test_close_without_history_falls_back_to_first_tab() {
    let (mut config, _tmp) = config_with_tmp_data_dir();
    config.history_limit = 1;
    let clock = ManualClock::new(1_000);
    let mut session = plain_session(&config, &clock);

    session.open_tab(notes("A"));
    session.open_tab(notes("B"));
    session.open_tab(notes("C"));
    // With a single history slot only B is remembered; closing it empties history
    session.close_tab(&"B".into());
    assert!(session.history().is_empty());
    assert_eq!(active(session.active_tab_id()), Some("C"));

    session.close_tab(&"C".into());
    assert_eq!(active(session.active_tab_id()), Some("A"));
    assert!(session.tab(&"A".into()).unwrap().is_active);
}

#[test]
fn test_closing_last_tab_leaves_no_selection() {
    let (config, _tmp) = config_with_tmp_data_dir();
    let clock = ManualClock::new(1_000);
    let mut session = plain_session(&config, &clock);

    session.open_tab(notes("X"));
    session.close_tab(&"X".into());

    assert!(session.active_tab_id().is_none());
    assert!(session.active_tab().is_none());
    assert_eq!(session.tab_count(), 0);
    assert_eq!(session.cache().len(), 1);

    let target = session.request_recovery().expect("closed tab should be resumable");
    assert_eq!(target.title, "Notes X");
}

// ============================================================================
// Closed-tab cache bounds and durability
// ============================================================================

#[test]
fn test_cache_evicts_least_recent_at_capacity() {
    let (config, _tmp) = config_with_tmp_data_dir();
    let clock = ManualClock::new(1_000);
    let mut session = plain_session(&config, &clock);

    for i in 0..50 {
        let id = format!("t{i}");
        session.open_tab(notes(&id));
        clock.advance(10);
        session.close_tab(&TabId::from(id.as_str()));
    }
    assert_eq!(session.cache().len(), 50);

    session.open_tab(notes("t50"));
    clock.advance(10);
    session.close_tab(&"t50".into());

    assert_eq!(session.cache().len(), 50);
    assert!(session.cache().get(&"t0".into()).is_none());
    assert!(session.cache().get(&"t50".into()).is_some());

    let gateway = PersistenceGateway::new(
        FileStore::new(config.effective_data_dir()),
        config.namespace_prefix.clone(),
    );
    let persisted = gateway.load(PROJECT);
    assert_eq!(persisted.len(), 50);
    assert!(!persisted.contains_key(&TabId::from("t0")));
}

#[test]
fn test_reclosing_same_id_overwrites_entry() {
    let (config, _tmp) = config_with_tmp_data_dir();
    let clock = ManualClock::new(1_000);
    let mut session = plain_session(&config, &clock);

    session.open_tab(notes("A"));
    session.close_tab(&"A".into());
    session.open_tab(folio::TabDescriptor::new(folio::TabKind::Ideas, "Ideas v2").with_id("A"));
    session.close_tab(&"A".into());

    assert_eq!(session.cache().len(), 1);
    assert_eq!(session.cache().get(&"A".into()).unwrap().title, "Ideas v2");
}

#[test]
fn test_restart_resumes_last_closed_tab() {
    let (config, _tmp) = config_with_tmp_data_dir();
    let clock = ManualClock::new(1_000);
    {
        let mut session = plain_session(&config, &clock);
        session.open_tab(chapter("t1", "ch-1", "The Storm"));
        session.open_tab(notes("n1"));
        clock.advance(100);
        session.close_tab(&"n1".into());
        clock.advance(100);
        session.close_tab(&"t1".into());
    }

    // A new process: nothing in memory, only what reached the store
    let live = FakeContentStore::with(&[("ch-1", "The Storm (revised)")]);
    let session = file_session(&config, &clock, live);
    assert_eq!(session.tab_count(), 0);

    let target = session.request_recovery().unwrap();
    assert_eq!(target.tab_id.as_str(), "t1");
    assert_eq!(target.title, "The Storm (revised)");
    assert_eq!(target.linked_content_id.as_deref(), Some("ch-1"));
    assert!(!target.stale);
}

#[test]
fn test_deleted_chapter_still_suggested_with_cached_title() {
    let (config, _tmp) = config_with_tmp_data_dir();
    let clock = ManualClock::new(1_000);
    let mut session = file_session(&config, &clock, FakeContentStore::default());

    session.open_tab(chapter("t1", "ch-gone", "Deleted Chapter"));
    session.close_tab(&"t1".into());

    let target = session.request_recovery().unwrap();
    assert_eq!(target.title, "Deleted Chapter");
    assert!(target.stale);
}

#[test]
fn test_corrupted_blob_does_not_block_session() {
    let (config, _tmp) = config_with_tmp_data_dir();
    let store = FileStore::new(config.effective_data_dir());
    store
        .save(&format!("{}{}", config.namespace_prefix, PROJECT), b"\x00\xffgarbage")
        .unwrap();

    let clock = ManualClock::new(1_000);
    let mut session = plain_session(&config, &clock);
    assert!(session.cache().is_empty());
    assert!(session.request_recovery().is_none());

    // The next close overwrites the corrupted blob with a valid one
    session.open_tab(notes("A"));
    session.close_tab(&"A".into());
    let fresh = plain_session(&config, &clock);
    assert_eq!(fresh.cache().len(), 1);
}
