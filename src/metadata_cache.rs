//! Bounded cache of closed-tab metadata.
//!
//! Every closed tab leaves one entry behind, keyed by its tab id, so the
//! editor can offer to resume the last document after all tabs are gone.
//! When the cache grows past its capacity the least recently accessed entry
//! is evicted; among entries with the same `last_accessed_at`, the one with
//! the smallest id goes first.

use crate::tab::{Tab, TabId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialized form of a project's cache: tab id → entry.
pub type CacheSnapshot = BTreeMap<TabId, MetadataCacheEntry>;

/// Identifying metadata of a closed tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataCacheEntry {
    pub id: TabId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_content_id: Option<String>,
    /// Epoch milliseconds
    pub last_accessed_at: i64,
}

impl MetadataCacheEntry {
    /// Entry for `tab`, closed at `closed_at`.
    pub fn from_closed_tab(tab: &Tab, closed_at: i64) -> Self {
        Self {
            id: tab.id.clone(),
            title: tab.title.clone(),
            linked_content_id: tab.linked_content_id.clone(),
            last_accessed_at: closed_at,
        }
    }

    fn recency_key(&self) -> (i64, &TabId) {
        (self.last_accessed_at, &self.id)
    }
}

/// Per-project map of closed-tab metadata with LRU-style eviction.
#[derive(Debug, Clone)]
pub struct MetadataCache {
    entries: BTreeMap<TabId, MetadataCacheEntry>,
    capacity: usize,
}

impl MetadataCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuild a cache from persisted data, evicting anything over capacity.
    ///
    /// Entries are re-keyed by their own `id`.
    pub fn from_snapshot(snapshot: CacheSnapshot, capacity: usize) -> Self {
        let mut cache = Self::new(capacity);
        for entry in snapshot.into_values() {
            cache.entries.insert(entry.id.clone(), entry);
        }
        let evicted = cache.evict_overflow();
        if !evicted.is_empty() {
            log::info!(
                "Dropped {} cached tab entries over capacity {}",
                evicted.len(),
                cache.capacity
            );
        }
        cache
    }

    /// Insert or overwrite the entry for `entry.id`.
    ///
    /// Returns the entries evicted to get back under capacity.
    pub fn record(&mut self, entry: MetadataCacheEntry) -> Vec<MetadataCacheEntry> {
        self.entries.insert(entry.id.clone(), entry);
        self.evict_overflow()
    }

    fn evict_overflow(&mut self) -> Vec<MetadataCacheEntry> {
        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            let Some(oldest) = self
                .entries
                .values()
                .min_by(|a, b| a.recency_key().cmp(&b.recency_key()))
                .map(|e| e.id.clone())
            else {
                break;
            };
            if let Some(entry) = self.entries.remove(&oldest) {
                log::debug!(
                    "Evicted cached tab {} (last accessed {})",
                    entry.id,
                    entry.last_accessed_at
                );
                evicted.push(entry);
            }
        }
        evicted
    }

    pub fn get(&self, id: &TabId) -> Option<&MetadataCacheEntry> {
        self.entries.get(id)
    }

    /// All entries, ordered by id.
    pub fn all(&self) -> impl Iterator<Item = &MetadataCacheEntry> {
        self.entries.values()
    }

    /// All entries, most recently accessed first.
    pub fn by_recency(&self) -> Vec<&MetadataCacheEntry> {
        let mut entries: Vec<&MetadataCacheEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
        entries
    }

    /// Entry with the largest `last_accessed_at` (largest id on ties).
    pub fn most_recent(&self) -> Option<&MetadataCacheEntry> {
        self.entries
            .values()
            .max_by(|a, b| a.recency_key().cmp(&b.recency_key()))
    }

    pub fn remove(&mut self, id: &TabId) -> Option<MetadataCacheEntry> {
        self.entries.remove(id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Copy of the contents for persistence.
    pub fn snapshot(&self) -> CacheSnapshot {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
