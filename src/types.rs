//! Core types for the dialgrid collection system.
//!
//! This module defines the fundamental data structures used throughout the
//! crate: entries (shortcuts and folder markers), identifiers, and the
//! transient view state that drives projections.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::FOLDER_URL_SCHEME;

/// Stable identifier of an entry. Assigned at creation, never reused.
pub type EntryId = Uuid;

/// Identifier of a folder group. A `FolderMarker` carries its own group id;
/// shortcuts reference it to declare membership.
pub type GroupId = Uuid;

/// A unit in the collection: either a navigable shortcut or the marker that
/// represents a folder on the root grid.
///
/// Historically a folder was a shortcut-shaped record whose `url` was a
/// sentinel string. The tagged union makes that state unrepresentable; the
/// sentinel survives only in the wire format (see [`Entry::wire_url`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier for this entry
    pub id: EntryId,
    /// Display name, user-editable, non-empty for a valid entry
    pub name: String,
    /// Opaque icon reference, resolved externally; may be absent
    pub icon: Option<String>,
    /// Shortcut or folder marker
    pub kind: EntryKind,
}

/// The two entry variants. A marker is never itself a member of another
/// group; its `group` field is its own identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A navigable shortcut, optionally belonging to a folder group
    Shortcut {
        /// Navigation target
        url: String,
        /// The folder this shortcut belongs to, or `None` if at root
        group: Option<GroupId>,
    },
    /// The root-grid stand-in for a folder group
    FolderMarker {
        /// This folder's own group identifier (self-referential)
        group: GroupId,
    },
}

impl Entry {
    /// Create a root-level shortcut with a freshly generated id.
    pub fn shortcut(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: None,
            kind: EntryKind::Shortcut {
                url: url.into(),
                group: None,
            },
        }
    }

    /// Create a folder marker for a new group.
    pub fn folder_marker(name: impl Into<String>, group: GroupId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: None,
            kind: EntryKind::FolderMarker { group },
        }
    }

    /// Returns true if this entry is a folder marker.
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::FolderMarker { .. })
    }

    /// The group a shortcut belongs to, or `None` for root-level shortcuts
    /// and for markers (a marker is not a member of anything).
    pub fn member_of(&self) -> Option<GroupId> {
        match self.kind {
            EntryKind::Shortcut { group, .. } => group,
            EntryKind::FolderMarker { .. } => None,
        }
    }

    /// The group a marker stands for, if this entry is a marker.
    pub fn folder_group(&self) -> Option<GroupId> {
        match self.kind {
            EntryKind::FolderMarker { group } => Some(group),
            EntryKind::Shortcut { .. } => None,
        }
    }

    /// Returns true if this entry appears on the root grid: top-level
    /// shortcuts and all folder markers.
    pub fn is_root_visible(&self) -> bool {
        match self.kind {
            EntryKind::Shortcut { group, .. } => group.is_none(),
            EntryKind::FolderMarker { .. } => true,
        }
    }

    /// The url column as it appears on the wire. Shortcuts carry their real
    /// url; markers carry the legacy `folder:` placeholder.
    pub fn wire_url(&self) -> String {
        match &self.kind {
            EntryKind::Shortcut { url, .. } => url.clone(),
            EntryKind::FolderMarker { group } => format!("{FOLDER_URL_SCHEME}{group}"),
        }
    }

    /// Returns true if `keyword` (already lower-cased) occurs in the name or
    /// url of this entry. Markers match on name only.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        if self.name.to_lowercase().contains(keyword) {
            return true;
        }
        match &self.kind {
            EntryKind::Shortcut { url, .. } => url.to_lowercase().contains(keyword),
            EntryKind::FolderMarker { .. } => false,
        }
    }
}

/// Returns the group id encoded in a legacy folder placeholder url, if the
/// string is one.
pub fn parse_folder_url(url: &str) -> Option<GroupId> {
    url.strip_prefix(FOLDER_URL_SCHEME)
        .and_then(|rest| Uuid::parse_str(rest).ok())
}

/// Transient view state driving projections. Not persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    /// Lower-cased substring filter over the root projection
    pub search_keyword: String,
    /// When set, constrains the root projection to this group's marker
    pub active_folder: Option<GroupId>,
}

impl ViewState {
    /// Set the search keyword (stored lower-cased).
    pub fn set_search(&mut self, keyword: &str) {
        self.search_keyword = keyword.to_lowercase();
    }

    /// Returns true if a folder view is currently open.
    pub fn folder_open(&self) -> bool {
        self.active_folder.is_some()
    }
}
