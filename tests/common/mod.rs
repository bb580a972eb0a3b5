//! Shared integration test helpers for folio.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{file_session, notes};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers are used per file.

#![allow(dead_code)]

use folio::clock::ManualClock;
use folio::{
    Config, ContentLookup, FileStore, NoContentLookup, ResolvedContent, TabDescriptor, TabKind,
    TabSession,
};
use std::collections::HashMap;
use tempfile::TempDir;

pub const PROJECT: &str = "novel";

/// Creates a temporary directory and a `Config` whose data dir points inside it.
///
/// The `TempDir` must be kept alive for the duration of the test.
pub fn config_with_tmp_data_dir() -> (Config, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        data_dir: Some(temp_dir.path().join("data")),
        ..Config::default()
    };
    (config, temp_dir)
}

/// Session on a file store under `config`'s data dir, driven by `clock`.
pub fn file_session<L: ContentLookup>(
    config: &Config,
    clock: &ManualClock,
    lookup: L,
) -> TabSession<FileStore, L> {
    TabSession::with_clock(
        PROJECT,
        config,
        FileStore::new(config.effective_data_dir()),
        lookup,
        Box::new(clock.clone()),
    )
}

/// File-backed session without live content.
pub fn plain_session(config: &Config, clock: &ManualClock) -> TabSession<FileStore, NoContentLookup> {
    file_session(config, clock, NoContentLookup)
}

/// Notes tab descriptor with an explicit id.
pub fn notes(id: &str) -> TabDescriptor {
    TabDescriptor::new(TabKind::Notes, format!("Notes {id}")).with_id(id)
}

/// Chapter tab descriptor with an explicit id.
pub fn chapter(id: &str, content_id: &str, title: &str) -> TabDescriptor {
    TabDescriptor::chapter(content_id, title).with_id(id)
}

/// Content lookup backed by a fixed map of content id → title.
#[derive(Debug, Default, Clone)]
pub struct FakeContentStore {
    pub chapters: HashMap<String, String>,
}

impl FakeContentStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            chapters: entries
                .iter()
                .map(|(id, title)| (id.to_string(), title.to_string()))
                .collect(),
        }
    }
}

impl ContentLookup for FakeContentStore {
    fn resolve(&self, content_id: &str) -> Option<ResolvedContent> {
        self.chapters.get(content_id).map(|title| ResolvedContent {
            title: title.clone(),
            content: None,
        })
    }
}
