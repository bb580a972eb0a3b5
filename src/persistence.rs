//! Load/save of per-project metadata cache blobs.
//!
//! Each project's cache is stored as one JSON object under the key
//! `<prefix><project id>`. Reads never fail: a missing, unreadable, or
//! malformed blob is reported as an empty cache. Writes happen immediately on
//! the caller's thread; a failed write is logged and reported as `false`.

use crate::metadata_cache::CacheSnapshot;
use anyhow::{Context, Result};
use folio_store::KeyValueStore;

/// Reads and writes project cache snapshots through a [`KeyValueStore`].
#[derive(Debug)]
pub struct PersistenceGateway<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// Storage key for a project's cache blob
    pub fn namespace_key(&self, project_id: &str) -> String {
        format!("{}{}", self.prefix, project_id)
    }

    /// Serialize and write the full cache for a project.
    ///
    /// Returns false if the write failed; the failure has already been logged.
    pub fn save(&self, project_id: &str, snapshot: &CacheSnapshot) -> bool {
        match self.try_save(project_id, snapshot) {
            Ok(()) => {
                log::info!(
                    "Saved {} cached tab entries for project {}",
                    snapshot.len(),
                    project_id
                );
                true
            }
            Err(e) => {
                log::error!("Failed to save tab cache for project {}: {:#}", project_id, e);
                false
            }
        }
    }

    fn try_save(&self, project_id: &str, snapshot: &CacheSnapshot) -> Result<()> {
        let bytes = serde_json::to_vec(snapshot).context("Failed to serialize tab cache")?;
        let key = self.namespace_key(project_id);
        self.store
            .save(&key, &bytes)
            .with_context(|| format!("Failed to write tab cache under {:?}", key))?;
        Ok(())
    }

    /// Read a project's cache; any failure yields an empty map.
    pub fn load(&self, project_id: &str) -> CacheSnapshot {
        match self.try_load(project_id) {
            Ok(Some(snapshot)) => {
                log::info!(
                    "Loaded {} cached tab entries for project {}",
                    snapshot.len(),
                    project_id
                );
                snapshot
            }
            Ok(None) => CacheSnapshot::new(),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable tab cache for project {}: {:#}",
                    project_id,
                    e
                );
                CacheSnapshot::new()
            }
        }
    }

    fn try_load(&self, project_id: &str) -> Result<Option<CacheSnapshot>> {
        let key = self.namespace_key(project_id);
        let Some(bytes) = self
            .store
            .load(&key)
            .with_context(|| format!("Failed to read tab cache under {:?}", key))?
        else {
            return Ok(None);
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let snapshot: CacheSnapshot = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse tab cache under {:?}", key))?;
        Ok(Some(snapshot))
    }

    /// Delete a project's cache blob. Returns false if the store refused.
    pub fn clear(&self, project_id: &str) -> bool {
        let key = self.namespace_key(project_id);
        match self.store.remove(&key) {
            Ok(()) => {
                log::info!("Cleared tab cache for project {}", project_id);
                true
            }
            Err(e) => {
                log::error!("Failed to clear tab cache for project {}: {}", project_id, e);
                false
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata_cache::MetadataCacheEntry;
    use crate::tab::TabId;
    use folio_store::{MemoryStore, StoreError};

    fn sample_snapshot() -> CacheSnapshot {
        let mut snapshot = CacheSnapshot::new();
        for (id, linked, at) in [("t1", Some("ch-1"), 10), ("t2", None, 20)] {
            snapshot.insert(
                TabId::from(id),
                MetadataCacheEntry {
                    id: TabId::from(id),
                    title: format!("Tab {id}"),
                    linked_content_id: linked.map(str::to_string),
                    last_accessed_at: at,
                },
            );
        }
        snapshot
    }

    /// Store whose every operation fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::InvalidKey(key.to_string()))
        }

        fn save(&self, key: &str, _bytes: &[u8]) -> Result<(), StoreError> {
            Err(StoreError::InvalidKey(key.to_string()))
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            Err(StoreError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let gateway = PersistenceGateway::new(MemoryStore::new(), "cache:");
        let snapshot = sample_snapshot();
        assert!(gateway.save("novel", &snapshot));
        assert_eq!(gateway.load("novel"), snapshot);
    }

    #[test]
    fn test_projects_are_namespaced() {
        let gateway = PersistenceGateway::new(MemoryStore::new(), "cache:");
        assert_eq!(gateway.namespace_key("novel"), "cache:novel");

        gateway.save("novel", &sample_snapshot());
        assert!(gateway.load("other").is_empty());
    }

    #[test]
    fn test_load_missing_is_empty() {
        let gateway = PersistenceGateway::new(MemoryStore::new(), "cache:");
        assert!(gateway.load("novel").is_empty());
    }

    #[test]
    fn test_load_corrupted_bytes_is_empty() {
        let store = MemoryStore::new();
        store.save("cache:novel", b"{not json at all").unwrap();
        let gateway = PersistenceGateway::new(store, "cache:");
        assert!(gateway.load("novel").is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let store = MemoryStore::new();
        store.save("cache:novel", br#"{"t1": {"id": 5}}"#).unwrap();
        let gateway = PersistenceGateway::new(store, "cache:");
        assert!(gateway.load("novel").is_empty());
    }

    #[test]
    fn test_store_failures_degrade() {
        let gateway = PersistenceGateway::new(BrokenStore, "cache:");
        assert!(!gateway.save("novel", &sample_snapshot()));
        assert!(gateway.load("novel").is_empty());
        assert!(!gateway.clear("novel"));
    }

    #[test]
    fn test_persisted_layout() {
        let gateway = PersistenceGateway::new(MemoryStore::new(), "cache:");
        gateway.save("novel", &sample_snapshot());

        let bytes = gateway.store().load("cache:novel").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["t1"]["linkedContentId"], "ch-1");
        assert_eq!(json["t2"]["lastAccessedAt"], 20);
        assert_eq!(json["t2"]["title"], "Tab t2");
    }

    #[test]
    fn test_clear_removes_blob() {
        let gateway = PersistenceGateway::new(MemoryStore::new(), "cache:");
        gateway.save("novel", &sample_snapshot());
        assert!(gateway.clear("novel"));
        assert!(gateway.load("novel").is_empty());
    }
}
