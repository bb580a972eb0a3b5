//! Active tab selection and most-recently-used history.
//!
//! The history holds previously active tab ids, newest first, without
//! duplicates and capped at a configurable length. It is only consulted to
//! pick a replacement when the active tab closes; the registry stays the
//! source of truth for which tabs exist.

use crate::tab::TabId;
use std::collections::VecDeque;

/// Owns the active tab id and the MRU history of previously active tabs.
#[derive(Debug, Clone)]
pub struct ActiveSelector {
    active: Option<TabId>,
    history: VecDeque<TabId>,
    limit: usize,
}

impl ActiveSelector {
    /// Create a selector with nothing active and an MRU history capped at `limit`.
    pub fn new(limit: usize) -> Self {
        Self {
            active: None,
            history: VecDeque::with_capacity(limit),
            limit: limit.max(1),
        }
    }

    /// Currently active tab, `None` when nothing is selected.
    pub fn active_tab_id(&self) -> Option<&TabId> {
        self.active.as_ref()
    }

    /// Previously active tab ids, most recent first.
    pub fn history(&self) -> &VecDeque<TabId> {
        &self.history
    }

    /// Make `id` active, pushing the previous active tab onto the history.
    pub fn activate(&mut self, id: TabId) {
        if self.active.as_ref() == Some(&id) {
            return;
        }
        if let Some(previous) = self.active.take() {
            self.remember(previous);
        }
        // The active tab is never its own fallback
        self.history.retain(|h| h != &id);
        log::debug!("Activated tab {}", id);
        self.active = Some(id);
    }

    /// Update selection after `closed` left the registry.
    ///
    /// `remaining` must list the open tabs ascending by `order`. Returns the
    /// new active id (unchanged if a background tab closed).
    pub fn on_tab_closed(&mut self, closed: &TabId, remaining: &[TabId]) -> Option<TabId> {
        self.history.retain(|h| h != closed);

        if self.active.as_ref() == Some(closed) {
            self.active = self.find_next_active_tab(remaining);
            if let Some(next) = &self.active {
                self.history.retain(|h| h != next);
            }
            log::debug!(
                "Active tab {} closed, now {:?}",
                closed,
                self.active.as_ref().map(TabId::as_str)
            );
        }
        self.active.clone()
    }

    /// First history entry still open, else the first remaining tab, else none.
    pub fn find_next_active_tab(&self, remaining: &[TabId]) -> Option<TabId> {
        self.history
            .iter()
            .find(|id| remaining.contains(id))
            .or_else(|| remaining.first())
            .cloned()
    }

    /// Forget the selection and the history.
    pub fn clear(&mut self) {
        self.active = None;
        self.history.clear();
    }

    fn remember(&mut self, id: TabId) {
        self.history.retain(|h| h != &id);
        self.history.push_front(id);
        self.history.truncate(self.limit);
    }
}
