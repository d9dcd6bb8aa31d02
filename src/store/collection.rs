//! The ordered entry collection and its atomic mutation operations.
//!
//! `EntryStore` owns the flat ordered sequence of entries. Every operation
//! either leaves the collection in a state satisfying all invariants or
//! fails without mutating anything:
//!
//! 1. A folder marker for group `g` exists iff at least one shortcut with
//!    group `g` exists, and there is at most one such marker.
//! 2. No nested folders: markers are never members of a group.
//! 3. Every entry has a non-empty name and a valid url/placeholder.
//! 4. Ids are unique across the whole collection.
//!
//! Insertion order is the root display order. The display order of a
//! folder's members is derived from their relative positions in the whole
//! sequence at projection time; it is never stored per group.

use uuid::Uuid;

use crate::constants::DEFAULT_FOLDER_NAME_KEY;
use crate::i18n;
use crate::store::{StoreError, StoreResult};
use crate::types::{Entry, EntryId, EntryKind, GroupId};

/// Owns the flat ordered collection of entries.
#[derive(Clone, Debug, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-materialized entries, healing anything
    /// that violates the invariants (self-healing load: bad rows are purged
    /// with a diagnostic, never fatal).
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut store = Self { entries };
        store.heal();
        store
    }

    /// All entries in collection order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Position of an entry in the whole sequence.
    pub fn index_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// The folder marker for a group, if present.
    pub fn marker_of(&self, group: GroupId) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.folder_group() == Some(group))
    }

    /// Number of shortcuts belonging to a group.
    pub fn member_count(&self, group: GroupId) -> usize {
        self.entries
            .iter()
            .filter(|e| e.member_of() == Some(group))
            .count()
    }

    // ========================================================================
    // Mutation operations
    // ========================================================================

    /// Append a new shortcut at the end of the collection.
    ///
    /// Fails with `InvalidOperation` on an empty name or url, and with
    /// `FolderNotFound` when a target group has no marker.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        group: Option<GroupId>,
    ) -> StoreResult<EntryId> {
        let name = name.into();
        let url = url.into();
        if name.trim().is_empty() {
            return Err(StoreError::InvalidOperation("empty name".into()));
        }
        if url.trim().is_empty() {
            return Err(StoreError::InvalidOperation("empty url".into()));
        }
        if let Some(g) = group {
            if self.marker_of(g).is_none() {
                return Err(StoreError::FolderNotFound(g));
            }
        }

        let mut entry = Entry::shortcut(name, url);
        if let EntryKind::Shortcut { group: g, .. } = &mut entry.kind {
            *g = group;
        }
        let id = entry.id;
        self.entries.push(entry);
        Ok(id)
    }

    /// Update an entry's name, url and membership in place.
    ///
    /// For markers only the name applies; moving a marker into a group is
    /// forbidden (no nested folders). Emptying a group this way deletes its
    /// marker.
    pub fn edit(
        &mut self,
        id: EntryId,
        name: impl Into<String>,
        url: impl Into<String>,
        group: Option<GroupId>,
    ) -> StoreResult<()> {
        let name = name.into();
        let url = url.into();
        if name.trim().is_empty() {
            return Err(StoreError::InvalidOperation("empty name".into()));
        }
        let index = self.index_of(id).ok_or(StoreError::NotFound(id))?;

        match self.entries[index].kind {
            EntryKind::FolderMarker { .. } => {
                if group.is_some() {
                    return Err(StoreError::InvalidOperation(
                        "a folder cannot be placed inside a folder".into(),
                    ));
                }
                self.entries[index].name = name;
                Ok(())
            }
            EntryKind::Shortcut { group: old, .. } => {
                if url.trim().is_empty() {
                    return Err(StoreError::InvalidOperation("empty url".into()));
                }
                if let Some(g) = group {
                    if self.marker_of(g).is_none() {
                        return Err(StoreError::FolderNotFound(g));
                    }
                }
                self.entries[index].name = name;
                self.entries[index].kind = EntryKind::Shortcut { url, group };
                if let Some(old_group) = old {
                    if group != Some(old_group) {
                        self.drop_marker_if_empty(old_group);
                    }
                }
                Ok(())
            }
        }
    }

    /// Remove an entry. Deleting the last member of a group also removes
    /// that group's marker; deleting a marker resets its members to root.
    pub fn delete(&mut self, id: EntryId) -> StoreResult<()> {
        let index = self.index_of(id).ok_or(StoreError::NotFound(id))?;
        let removed = self.entries.remove(index);

        match removed.kind {
            EntryKind::Shortcut { group: Some(g), .. } => self.drop_marker_if_empty(g),
            EntryKind::FolderMarker { group } => self.release_members(group),
            EntryKind::Shortcut { group: None, .. } => {}
        }
        Ok(())
    }

    /// Relocate the entry at `from` so it ends up at `to` in the original
    /// sequence's terms.
    ///
    /// Contract: remove the element at `from`; if `from < to`, decrement
    /// `to` by one to account for the shift; insert at the adjusted index.
    pub fn reorder(&mut self, from: usize, to: usize) -> StoreResult<()> {
        let len = self.entries.len();
        if from >= len {
            return Err(StoreError::InvalidIndex { index: from, len });
        }
        if to >= len {
            return Err(StoreError::InvalidIndex { index: to, len });
        }
        if from == to {
            return Err(StoreError::InvalidIndex { index: to, len });
        }

        let entry = self.entries.remove(from);
        let adjusted = if from < to { to - 1 } else { to };
        self.entries.insert(adjusted, entry);
        Ok(())
    }

    /// Move the entry at `from` to the end of the collection. Within any
    /// projection this makes the entry the last of its sequence, since
    /// projected order derives from whole-sequence positions.
    pub fn move_to_end(&mut self, from: usize) -> StoreResult<()> {
        let len = self.entries.len();
        if from >= len {
            return Err(StoreError::InvalidIndex { index: from, len });
        }
        let entry = self.entries.remove(from);
        self.entries.push(entry);
        Ok(())
    }

    /// Merge the entries at two indices into a new folder.
    ///
    /// The marker lands at `min(index_a, index_b)` of the pre-merge
    /// sequence; both members migrate to the tail of the collection. The
    /// tail placement is long-standing behavior that downstream reorder
    /// math depends on, so it is kept.
    pub fn create_folder(&mut self, index_a: usize, index_b: usize) -> StoreResult<GroupId> {
        let len = self.entries.len();
        if index_a >= len || index_b >= len || index_a == index_b {
            return Err(StoreError::InvalidOperation(format!(
                "cannot merge indices {index_a} and {index_b} (length {len})"
            )));
        }
        if self.entries[index_a].is_folder() || self.entries[index_b].is_folder() {
            return Err(StoreError::InvalidOperation(
                "folders cannot be merged or nested".into(),
            ));
        }

        let insert_at = index_a.min(index_b);
        // Remove the higher index first so the lower one stays valid.
        let (first, second) = if index_a < index_b {
            (index_a, index_b)
        } else {
            (index_b, index_a)
        };
        let mut late = self.entries.remove(second);
        let mut early = self.entries.remove(first);

        let group = Uuid::new_v4();
        let default_name =
            i18n::lookup(DEFAULT_FOLDER_NAME_KEY).unwrap_or("New folder");
        let marker = Entry::folder_marker(default_name, group);
        self.entries.insert(insert_at, marker);

        for member in [&mut early, &mut late] {
            if let EntryKind::Shortcut { group: g, .. } = &mut member.kind {
                *g = Some(group);
            }
        }
        // Members migrate to the tail in (index_a, index_b) argument order.
        if index_a < index_b {
            self.entries.push(early);
            self.entries.push(late);
        } else {
            self.entries.push(late);
            self.entries.push(early);
        }
        Ok(group)
    }

    /// Put an existing shortcut into a folder.
    pub fn add_to_folder(&mut self, id: EntryId, group: GroupId) -> StoreResult<()> {
        let index = self.index_of(id).ok_or(StoreError::NotFound(id))?;
        if self.entries[index].is_folder() {
            return Err(StoreError::InvalidOperation(
                "folders cannot be merged or nested".into(),
            ));
        }
        if self.marker_of(group).is_none() {
            return Err(StoreError::FolderNotFound(group));
        }

        let old = self.entries[index].member_of();
        if let EntryKind::Shortcut { group: g, .. } = &mut self.entries[index].kind {
            *g = Some(group);
        }
        if let Some(old_group) = old {
            if old_group != group {
                self.drop_marker_if_empty(old_group);
            }
        }
        Ok(())
    }

    /// Move a shortcut back to the root grid, deleting its folder's marker
    /// if it was the last member.
    ///
    /// Legacy payloads could corrupt a member's kind into a marker; such an
    /// entry is downgraded back to a shortcut here, keeping its placeholder
    /// url, and its orphaned group is healed.
    pub fn move_out_of_folder(&mut self, id: EntryId) -> StoreResult<()> {
        let index = self.index_of(id).ok_or(StoreError::NotFound(id))?;

        match self.entries[index].kind {
            EntryKind::Shortcut { group: None, .. } => Ok(()),
            EntryKind::Shortcut { group: Some(g), .. } => {
                if let EntryKind::Shortcut { group, .. } = &mut self.entries[index].kind {
                    *group = None;
                }
                self.drop_marker_if_empty(g);
                Ok(())
            }
            EntryKind::FolderMarker { group } => {
                tracing::warn!(entry = %id, "downgrading corrupt folder marker to shortcut");
                let url = self.entries[index].wire_url();
                self.entries[index].kind = EntryKind::Shortcut { url, group: None };
                self.release_members(group);
                Ok(())
            }
        }
    }

    /// Rename a folder's marker.
    pub fn rename_folder(&mut self, group: GroupId, name: impl Into<String>) -> StoreResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::InvalidOperation("empty name".into()));
        }
        let marker = self
            .entries
            .iter_mut()
            .find(|e| e.folder_group() == Some(group))
            .ok_or(StoreError::FolderNotFound(group))?;
        marker.name = name;
        Ok(())
    }

    /// Dissolve a folder: the marker is removed, the members return to the
    /// root grid (they are not deleted).
    pub fn delete_folder(&mut self, group: GroupId) -> StoreResult<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.folder_group() == Some(group))
            .ok_or(StoreError::FolderNotFound(group))?;
        self.entries.remove(index);
        self.release_members(group);
        Ok(())
    }

    // ========================================================================
    // Invariant maintenance
    // ========================================================================

    /// Remove the marker of `group` if no shortcut belongs to it anymore
    /// (empty folders are deleted, never left dangling).
    fn drop_marker_if_empty(&mut self, group: GroupId) {
        if self.member_count(group) == 0 {
            self.entries.retain(|e| e.folder_group() != Some(group));
        }
    }

    /// Reset every member of `group` to root membership.
    fn release_members(&mut self, group: GroupId) {
        for entry in &mut self.entries {
            if let EntryKind::Shortcut { group: g, .. } = &mut entry.kind {
                if *g == Some(group) {
                    *g = None;
                }
            }
        }
    }

    /// Self-healing pass run on load and import: purge invalid rows, dedup
    /// ids, re-establish the marker-iff-members invariant. Diagnostics are
    /// emitted per healed row; healing is never fatal.
    fn heal(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.entries.retain(|e| {
            if e.name.trim().is_empty() {
                tracing::warn!(entry = %e.id, "purging entry with empty name");
                return false;
            }
            if let EntryKind::Shortcut { url, .. } = &e.kind {
                if url.trim().is_empty() {
                    tracing::warn!(entry = %e.id, "purging entry with empty url");
                    return false;
                }
            }
            if !seen.insert(e.id) {
                tracing::warn!(entry = %e.id, "purging entry with duplicate id");
                return false;
            }
            true
        });

        // At most one marker per group: keep the first.
        let mut marker_groups = std::collections::HashSet::new();
        self.entries.retain(|e| match e.folder_group() {
            Some(g) if !marker_groups.insert(g) => {
                tracing::warn!(group = %g, "purging duplicate folder marker");
                false
            }
            _ => true,
        });

        // Markers without members are dangling; members without a marker
        // return to root.
        let member_groups: std::collections::HashSet<GroupId> = self
            .entries
            .iter()
            .filter_map(|e| e.member_of())
            .collect();
        self.entries.retain(|e| match e.folder_group() {
            Some(g) if !member_groups.contains(&g) => {
                tracing::warn!(group = %g, "purging empty folder marker");
                false
            }
            _ => true,
        });
        let marker_groups: std::collections::HashSet<GroupId> = self
            .entries
            .iter()
            .filter_map(|e| e.folder_group())
            .collect();
        for entry in &mut self.entries {
            if let EntryKind::Shortcut { group, .. } = &mut entry.kind {
                if let Some(g) = group {
                    if !marker_groups.contains(g) {
                        tracing::warn!(entry = %entry.id, "resetting member of missing folder to root");
                        *group = None;
                    }
                }
            }
        }
    }

    /// Check all four collection invariants, returning a description of the
    /// first violation. Used by the debug snapshot and by tests.
    pub fn verify_invariants(&self) -> Result<(), String> {
        let mut ids = std::collections::HashSet::new();
        for e in &self.entries {
            if !ids.insert(e.id) {
                return Err(format!("duplicate id {}", e.id));
            }
            if e.name.trim().is_empty() {
                return Err(format!("entry {} has an empty name", e.id));
            }
        }
        let mut marker_groups = std::collections::HashSet::new();
        for e in &self.entries {
            if let Some(g) = e.folder_group() {
                if !marker_groups.insert(g) {
                    return Err(format!("duplicate marker for group {g}"));
                }
                if self.member_count(g) == 0 {
                    return Err(format!("dangling marker for empty group {g}"));
                }
            }
        }
        for e in &self.entries {
            if let Some(g) = e.member_of() {
                if !marker_groups.contains(&g) {
                    return Err(format!("entry {} references missing group {g}", e.id));
                }
            }
        }
        Ok(())
    }
}
