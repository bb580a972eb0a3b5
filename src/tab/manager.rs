//! Tab registry: the ordered collection of open tabs in one editing surface

use super::{Tab, TabDescriptor, TabId, TabUpdate};

/// Result of [`TabRegistry::open`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    /// A new tab was inserted
    Created(TabId),
    /// A tab with the requested id was already open and is reused as-is
    Existing(TabId),
}

impl Opened {
    pub fn id(&self) -> &TabId {
        match self {
            Opened::Created(id) | Opened::Existing(id) => id,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Opened::Created(_))
    }
}

/// Manages the open tabs of a single editing surface
///
/// Tabs are kept in creation order, which is also ascending `order`.
/// Activation itself is decided by the session's
/// [`ActiveSelector`](crate::history::ActiveSelector); the registry only
/// mirrors the result into each tab's `is_active` flag.
#[derive(Debug, Default)]
pub struct TabRegistry {
    /// All open tabs, ascending by `order`
    tabs: Vec<Tab>,
    /// Counter for the next `order` value
    next_order: u64,
}

impl TabRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tab built from `descriptor` and mark it active
    ///
    /// If a tab with the requested id is already open it is marked active
    /// instead; its fields and `order` stay untouched.
    pub fn open(&mut self, descriptor: TabDescriptor, now: i64) -> (Opened, &Tab) {
        let existing = descriptor.id.as_ref().and_then(|id| self.position(id));

        let (outcome, idx) = match existing {
            Some(idx) => {
                log::debug!("Tab {} already open, reusing it", self.tabs[idx].id);
                (Opened::Existing(self.tabs[idx].id.clone()), idx)
            }
            None => {
                let order = self.next_order;
                self.next_order += 1;

                let tab = Tab::from_descriptor(descriptor, order, now);
                let id = tab.id.clone();
                self.tabs.push(tab);

                log::info!(
                    "Opened tab {} (order {}, total: {})",
                    id,
                    order,
                    self.tabs.len()
                );
                (Opened::Created(id), self.tabs.len() - 1)
            }
        };

        self.set_active(Some(outcome.id()), now);
        (outcome, &self.tabs[idx])
    }

    /// Remove a tab by ID, returning it so its identity can be recorded
    ///
    /// Unknown ids are ignored.
    pub fn close(&mut self, id: &TabId) -> Option<Tab> {
        let idx = self.position(id)?;
        let tab = self.tabs.remove(idx);
        log::info!(
            "Closed tab {} (index {}, remaining: {})",
            id,
            idx,
            self.tabs.len()
        );
        Some(tab)
    }

    /// Remove every tab, returning them in order
    pub fn drain(&mut self) -> Vec<Tab> {
        std::mem::take(&mut self.tabs)
    }

    /// Merge `update` into the tab with `id`
    ///
    /// Returns false when the tab is gone, which happens when an update
    /// races a close; that case is not an error.
    pub fn update(&mut self, id: &TabId, update: TabUpdate) -> bool {
        match self.get_mut(id) {
            Some(tab) => {
                tab.apply(update);
                true
            }
            None => {
                log::debug!("Ignoring update for closed tab {}", id);
                false
            }
        }
    }

    /// Mirror the selector's decision into the `is_active` flags
    ///
    /// The newly active tab also gets `last_accessed_at = now`.
    pub fn set_active(&mut self, active: Option<&TabId>, now: i64) {
        for tab in &mut self.tabs {
            tab.is_active = Some(&tab.id) == active;
            if tab.is_active {
                tab.last_accessed_at = now;
            }
        }
    }

    /// Snapshot of all tabs ordered by `order`
    pub fn list(&self) -> Vec<Tab> {
        self.tabs.clone()
    }

    /// Borrow all tabs ordered by `order`
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Ids of all tabs ordered by `order`
    pub fn ids_in_order(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id.clone()).collect()
    }

    /// Tabs with unsaved edits, for close-confirmation prompts
    pub fn dirty_tabs(&self) -> Vec<&Tab> {
        self.tabs.iter().filter(|t| t.is_dirty).collect()
    }

    pub fn get(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    fn position(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| &t.id == id)
    }

    fn get_mut(&mut self, id: &TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.tabs.iter().any(|t| &t.id == id)
    }

    /// Get the number of tabs
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// The tab after (or before) `id` in order, wrapping around
    pub fn neighbor(&self, id: &TabId, forward: bool) -> Option<TabId> {
        if self.tabs.len() <= 1 {
            return None;
        }
        let current_idx = self.position(id)?;
        let idx = if forward {
            (current_idx + 1) % self.tabs.len()
        } else if current_idx == 0 {
            self.tabs.len() - 1
        } else {
            current_idx - 1
        };
        Some(self.tabs[idx].id.clone())
    }
}
