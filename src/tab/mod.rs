//! Tab data model for the editing surface
//!
//! A [`Tab`] binds the editor surface to one document or view. Tabs live in a
//! [`TabRegistry`](manager::TabRegistry); which one is active is decided by
//! the [`ActiveSelector`](crate::history::ActiveSelector).

pub mod manager;

pub use manager::TabRegistry;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a tab within a registry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id for tabs opened without an explicit one
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TabId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of document or view a tab shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    /// Project overview
    #[default]
    Main,
    /// A single chapter of the manuscript
    Chapter,
    Synopsis,
    Characters,
    Structure,
    Notes,
    Ideas,
}

impl TabKind {
    /// Whether tabs of this kind point at an external content entity
    pub fn links_content(self) -> bool {
        matches!(self, TabKind::Chapter)
    }

    /// Display name for UI
    pub fn display_name(self) -> &'static str {
        match self {
            TabKind::Main => "Main",
            TabKind::Chapter => "Chapter",
            TabKind::Synopsis => "Synopsis",
            TabKind::Characters => "Characters",
            TabKind::Structure => "Structure",
            TabKind::Notes => "Notes",
            TabKind::Ideas => "Ideas",
        }
    }
}

/// An open binding between the editor surface and one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub kind: TabKind,
    /// External content entity this tab edits (chapter tabs only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_content_id: Option<String>,
    /// Mirrors the selector's active id; maintained by the registry
    pub is_active: bool,
    /// Whether unsaved edits exist
    pub is_dirty: bool,
    /// Creation sequence number, never reused
    pub order: u64,
    /// Display cache of the edited payload; canonical storage is external
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Epoch milliseconds of the last activation
    pub last_accessed_at: i64,
}

/// Request to open a tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabDescriptor {
    /// Explicit id; a UUID is generated when absent
    pub id: Option<TabId>,
    pub title: String,
    pub kind: TabKind,
    pub linked_content_id: Option<String>,
    pub content: Option<String>,
}

impl TabDescriptor {
    pub fn new(kind: TabKind, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            ..Self::default()
        }
    }

    /// Descriptor for a chapter tab bound to `content_id`
    pub fn chapter(content_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            linked_content_id: Some(content_id.into()),
            ..Self::new(TabKind::Chapter, title)
        }
    }

    pub fn with_id(mut self, id: impl Into<TabId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Partial update merged into an existing tab; `None` fields are left alone
///
/// `content` and `linked_content_id` can be replaced but not cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_dirty: Option<bool>,
    pub linked_content_id: Option<String>,
}

impl TabUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            is_dirty: Some(true),
            ..Self::default()
        }
    }

    pub fn saved() -> Self {
        Self {
            is_dirty: Some(false),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

impl Tab {
    pub(crate) fn from_descriptor(descriptor: TabDescriptor, order: u64, now: i64) -> Self {
        Self {
            id: descriptor.id.unwrap_or_else(TabId::generate),
            title: descriptor.title,
            kind: descriptor.kind,
            linked_content_id: descriptor.linked_content_id,
            is_active: false,
            is_dirty: false,
            order,
            content: descriptor.content,
            last_accessed_at: now,
        }
    }

    pub(crate) fn apply(&mut self, update: TabUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = Some(content);
        }
        if let Some(dirty) = update.is_dirty {
            self.is_dirty = dirty;
        }
        if let Some(linked) = update.linked_content_id {
            self.linked_content_id = Some(linked);
        }
    }
}
