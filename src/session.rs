//! Per-project tab session: the command surface used by the view layer.
//!
//! A [`TabSession`] owns the tab registry, the active selector and MRU
//! history, and the in-memory mirror of the closed-tab cache for one project.
//! Every command runs to completion before returning. Closing a tab records
//! its metadata and writes the project's cache blob inside the same call, so
//! a closed tab is durably remembered before any later command can observe
//! its absence.

use crate::clock::{Clock, Stamper, SystemClock};
use crate::history::ActiveSelector;
use crate::metadata_cache::{MetadataCache, MetadataCacheEntry};
use crate::persistence::PersistenceGateway;
use crate::recovery::{ContentLookup, RecoveryResolver, ResumeTarget};
use crate::tab::{Tab, TabDescriptor, TabId, TabRegistry, TabUpdate};
use folio_config::Config;
use folio_store::KeyValueStore;
use std::collections::VecDeque;

/// Open/closed/active bookkeeping for one project's editing surface.
pub struct TabSession<S, L> {
    project_id: String,
    registry: TabRegistry,
    selector: ActiveSelector,
    cache: MetadataCache,
    gateway: PersistenceGateway<S>,
    lookup: L,
    stamper: Stamper,
}

impl<S, L> TabSession<S, L>
where
    S: KeyValueStore,
    L: ContentLookup,
{
    /// Start a session for `project_id`, hydrating the closed-tab cache from `store`.
    pub fn new(project_id: impl Into<String>, config: &Config, store: S, lookup: L) -> Self {
        Self::with_clock(project_id, config, store, lookup, Box::new(SystemClock))
    }

    /// Like [`TabSession::new`] with an explicit time source.
    pub fn with_clock(
        project_id: impl Into<String>,
        config: &Config,
        store: S,
        lookup: L,
        clock: Box<dyn Clock>,
    ) -> Self {
        let project_id = project_id.into();
        let gateway = PersistenceGateway::new(store, config.namespace_prefix.clone());
        let cache = MetadataCache::from_snapshot(gateway.load(&project_id), config.cache_capacity);

        let mut stamper = Stamper::new(clock);
        if let Some(newest) = cache.most_recent() {
            stamper.raise_floor(newest.last_accessed_at);
        }

        log::info!(
            "Started tab session for project {} ({} cached closed tabs)",
            project_id,
            cache.len()
        );

        Self {
            project_id,
            registry: TabRegistry::new(),
            selector: ActiveSelector::new(config.history_limit),
            cache,
            gateway,
            lookup,
            stamper,
        }
    }

    /// Open a tab and make it active; re-opening an open id activates it.
    pub fn open_tab(&mut self, descriptor: TabDescriptor) -> Tab {
        let now = self.stamper.stamp();
        let (opened, tab) = self.registry.open(descriptor, now);
        let tab = tab.clone();
        crate::debug_trace!("SESSION", "open {} (created: {})", tab.id, opened.was_created());
        self.selector.activate(tab.id.clone());
        tab
    }

    /// Close a tab, record its metadata, and persist the cache.
    ///
    /// Unknown ids are ignored.
    pub fn close_tab(&mut self, id: &TabId) {
        let Some(tab) = self.registry.close(id) else {
            log::debug!("Ignoring close for unknown tab {}", id);
            return;
        };

        let now = self.stamper.stamp();
        let remaining = self.registry.ids_in_order();
        let was_active = self.selector.active_tab_id() == Some(&tab.id);
        let next = self.selector.on_tab_closed(&tab.id, &remaining);
        if was_active {
            self.registry.set_active(next.as_ref(), now);
        }

        self.record_closed(&tab, now);
        self.persist();
        crate::debug_trace!(
            "SESSION",
            "close {} -> active {:?}",
            tab.id,
            next.as_ref().map(TabId::as_str)
        );
    }

    /// Close every tab, recording each one, with a single cache write.
    ///
    /// Tabs are recorded least recently used first and the active tab last,
    /// so recovery afterwards offers the document that was in front.
    pub fn close_all_tabs(&mut self) {
        let mut tabs = self.registry.drain();
        if tabs.is_empty() {
            return;
        }
        let active = self.selector.active_tab_id().cloned();
        tabs.sort_by_key(|t| (Some(&t.id) == active.as_ref(), t.last_accessed_at, t.order));
        self.selector.clear();

        for tab in &tabs {
            let now = self.stamper.stamp();
            self.record_closed(tab, now);
        }
        self.persist();
        log::info!(
            "Closed all {} tabs of project {}",
            tabs.len(),
            self.project_id
        );
    }

    /// Make an open tab active. Unknown ids are ignored.
    pub fn activate_tab(&mut self, id: &TabId) {
        if !self.registry.contains(id) {
            log::debug!("Ignoring activation of unknown tab {}", id);
            return;
        }
        let now = self.stamper.stamp();
        self.selector.activate(id.clone());
        self.registry.set_active(Some(id), now);
        crate::debug_trace!("SESSION", "activate {}", id);
    }

    /// Merge `update` into an open tab. Unknown ids are ignored.
    pub fn update_tab(&mut self, id: &TabId, update: TabUpdate) {
        self.registry.update(id, update);
    }

    /// Activate the next tab in order, wrapping around.
    pub fn next_tab(&mut self) {
        self.cycle(true);
    }

    /// Activate the previous tab in order, wrapping around.
    pub fn prev_tab(&mut self) {
        self.cycle(false);
    }

    fn cycle(&mut self, forward: bool) {
        let target = self
            .selector
            .active_tab_id()
            .and_then(|id| self.registry.neighbor(id, forward));
        if let Some(target) = target {
            self.activate_tab(&target);
        }
    }

    /// Suggest the document to resume, typically once no tabs are open.
    pub fn request_recovery(&self) -> Option<ResumeTarget> {
        RecoveryResolver::suggest_resume_target(
            &self.project_id,
            &self.gateway,
            &self.cache,
            &self.lookup,
        )
    }

    /// Open the recovery suggestion as a new tab.
    ///
    /// See [`ResumeTarget::to_descriptor`] for the kind the tab reopens as.
    pub fn resume_last(&mut self) -> Option<Tab> {
        let target = self.request_recovery()?;
        Some(self.open_tab(target.to_descriptor()))
    }

    fn record_closed(&mut self, tab: &Tab, closed_at: i64) {
        let evicted = self
            .cache
            .record(MetadataCacheEntry::from_closed_tab(tab, closed_at));
        if !evicted.is_empty() {
            crate::debug_info!(
                "CACHE",
                "evicted {} entries for project {}",
                evicted.len(),
                self.project_id
            );
        }
    }

    fn persist(&self) {
        self.gateway.save(&self.project_id, &self.cache.snapshot());
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Snapshot of open tabs ordered by creation
    pub fn tabs(&self) -> Vec<Tab> {
        self.registry.list()
    }

    pub fn tab(&self, id: &TabId) -> Option<&Tab> {
        self.registry.get(id)
    }

    pub fn tab_count(&self) -> usize {
        self.registry.len()
    }

    pub fn active_tab_id(&self) -> Option<&TabId> {
        self.selector.active_tab_id()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.selector
            .active_tab_id()
            .and_then(|id| self.registry.get(id))
    }

    /// Previously active tab ids, most recent first
    pub fn history(&self) -> &VecDeque<TabId> {
        self.selector.history()
    }

    /// In-memory mirror of the closed-tab cache
    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// Tabs with unsaved edits
    pub fn dirty_tabs(&self) -> Vec<&Tab> {
        self.registry.dirty_tabs()
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }
}
