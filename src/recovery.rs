//! "Resume last chapter" suggestions for an empty editing surface.
//!
//! The persisted cache wins over the in-memory one because it survives
//! restarts; the in-memory cache covers stores that failed to write. A cached
//! content reference is checked against live data through [`ContentLookup`];
//! if the content is gone the cached title is still offered.

use crate::metadata_cache::{MetadataCache, MetadataCacheEntry};
use crate::persistence::PersistenceGateway;
use crate::tab::{TabDescriptor, TabId, TabKind};
use folio_store::KeyValueStore;

/// Live view of a content entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    pub title: String,
    pub content: Option<String>,
}

/// Looks up external content by id, e.g. chapters in the project store.
pub trait ContentLookup {
    fn resolve(&self, content_id: &str) -> Option<ResolvedContent>;
}

/// Lookup for hosts without live content; every reference is treated as stale.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContentLookup;

impl ContentLookup for NoContentLookup {
    fn resolve(&self, _content_id: &str) -> Option<ResolvedContent> {
        None
    }
}

impl<F> ContentLookup for F
where
    F: Fn(&str) -> Option<ResolvedContent>,
{
    fn resolve(&self, content_id: &str) -> Option<ResolvedContent> {
        self(content_id)
    }
}

/// Suggested document to resume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeTarget {
    /// Id of the closed tab the suggestion came from
    pub tab_id: TabId,
    pub title: String,
    pub linked_content_id: Option<String>,
    /// True when the linked content no longer resolves and cached data is used
    pub stale: bool,
}

impl ResumeTarget {
    /// Descriptor that reopens the suggestion under a fresh tab id
    ///
    /// Cache entries do not keep the tab kind: linked entries reopen as
    /// chapters, everything else as a [`TabKind::Main`] tab with the cached title.
    pub fn to_descriptor(&self) -> TabDescriptor {
        match &self.linked_content_id {
            Some(content_id) => TabDescriptor::chapter(content_id.clone(), self.title.clone()),
            None => TabDescriptor::new(TabKind::Main, self.title.clone()),
        }
    }
}

/// Picks what to offer when no tabs are open.
pub struct RecoveryResolver;

impl RecoveryResolver {
    /// Most recently closed tab of `project_id`, validated against live content.
    ///
    /// Returns `None` when neither cache holds anything.
    pub fn suggest_resume_target<S, L>(
        project_id: &str,
        gateway: &PersistenceGateway<S>,
        in_memory: &MetadataCache,
        lookup: &L,
    ) -> Option<ResumeTarget>
    where
        S: KeyValueStore,
        L: ContentLookup + ?Sized,
    {
        let persisted = gateway.load(project_id);
        let candidate = match pick_most_recent(persisted.values()) {
            Some(entry) => entry.clone(),
            None => {
                log::debug!(
                    "No persisted tab cache for project {}, using session cache",
                    project_id
                );
                in_memory.most_recent()?.clone()
            }
        };
        Some(Self::resolve_candidate(candidate, lookup))
    }

    fn resolve_candidate<L>(entry: MetadataCacheEntry, lookup: &L) -> ResumeTarget
    where
        L: ContentLookup + ?Sized,
    {
        let Some(content_id) = entry.linked_content_id else {
            return ResumeTarget {
                tab_id: entry.id,
                title: entry.title,
                linked_content_id: None,
                stale: false,
            };
        };

        match lookup.resolve(&content_id) {
            Some(live) => ResumeTarget {
                tab_id: entry.id,
                title: live.title,
                linked_content_id: Some(content_id),
                stale: false,
            },
            None => {
                log::info!(
                    "Content {} behind cached tab {} no longer resolves, offering cached title",
                    content_id,
                    entry.id
                );
                ResumeTarget {
                    tab_id: entry.id,
                    title: entry.title,
                    linked_content_id: Some(content_id),
                    stale: true,
                }
            }
        }
    }
}

fn pick_most_recent<'a>(
    entries: impl Iterator<Item = &'a MetadataCacheEntry>,
) -> Option<&'a MetadataCacheEntry> {
    entries.max_by(|a, b| {
        a.last_accessed_at
            .cmp(&b.last_accessed_at)
            .then_with(|| a.id.cmp(&b.id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata_cache::CacheSnapshot;
    use folio_store::MemoryStore;

    fn entry(id: &str, linked: Option<&str>, at: i64) -> MetadataCacheEntry {
        MetadataCacheEntry {
            id: TabId::from(id),
            title: format!("Cached {id}"),
            linked_content_id: linked.map(str::to_string),
            last_accessed_at: at,
        }
    }

    fn gateway_with(entries: &[MetadataCacheEntry]) -> PersistenceGateway<MemoryStore> {
        let gateway = PersistenceGateway::new(MemoryStore::new(), "cache:");
        let snapshot: CacheSnapshot = entries
            .iter()
            .map(|e| (e.id.clone(), e.clone()))
            .collect();
        if !snapshot.is_empty() {
            gateway.save("novel", &snapshot);
        }
        gateway
    }

    fn live_chapters(content_id: &str) -> Option<ResolvedContent> {
        (content_id == "ch-live").then(|| ResolvedContent {
            title: "Live Title".to_string(),
            content: Some("text".to_string()),
        })
    }

    #[test]
    fn test_nothing_cached_is_none() {
        let gateway = gateway_with(&[]);
        let cache = MetadataCache::new(50);
        assert!(
            RecoveryResolver::suggest_resume_target("novel", &gateway, &cache, &NoContentLookup)
                .is_none()
        );
    }

    #[test]
    fn test_persisted_beats_memory() {
        let gateway = gateway_with(&[entry("old", None, 5), entry("newer", None, 8)]);
        let mut cache = MetadataCache::new(50);
        cache.record(entry("session", None, 100));

        let target =
            RecoveryResolver::suggest_resume_target("novel", &gateway, &cache, &NoContentLookup)
                .unwrap();
        assert_eq!(target.tab_id.as_str(), "newer");
        assert_eq!(target.title, "Cached newer");
        assert!(!target.stale);
    }

    #[test]
    fn test_falls_back_to_memory() {
        let gateway = gateway_with(&[]);
        let mut cache = MetadataCache::new(50);
        cache.record(entry("a", None, 1));
        cache.record(entry("b", None, 2));

        let target =
            RecoveryResolver::suggest_resume_target("novel", &gateway, &cache, &NoContentLookup)
                .unwrap();
        assert_eq!(target.tab_id.as_str(), "b");
    }

    #[test]
    fn test_live_content_title_preferred() {
        let gateway = gateway_with(&[entry("t", Some("ch-live"), 1)]);
        let cache = MetadataCache::new(50);
        let target =
            RecoveryResolver::suggest_resume_target("novel", &gateway, &cache, &live_chapters)
                .unwrap();
        assert_eq!(target.title, "Live Title");
        assert_eq!(target.linked_content_id.as_deref(), Some("ch-live"));
        assert!(!target.stale);
    }

    #[test]
    fn test_deleted_content_keeps_cached_title() {
        let gateway = gateway_with(&[entry("t", Some("ch-gone"), 1)]);
        let cache = MetadataCache::new(50);
        let target =
            RecoveryResolver::suggest_resume_target("novel", &gateway, &cache, &live_chapters)
                .unwrap();
        assert_eq!(target.title, "Cached t");
        assert_eq!(target.linked_content_id.as_deref(), Some("ch-gone"));
        assert!(target.stale);
    }

    #[test]
    fn test_descriptor_reopens_chapter() {
        let target = ResumeTarget {
            tab_id: TabId::from("t"),
            title: "Chapter 3".to_string(),
            linked_content_id: Some("ch-3".to_string()),
            stale: false,
        };
        let descriptor = target.to_descriptor();
        assert_eq!(descriptor.kind, TabKind::Chapter);
        assert_eq!(descriptor.linked_content_id.as_deref(), Some("ch-3"));
        assert!(descriptor.id.is_none());
    }
}
