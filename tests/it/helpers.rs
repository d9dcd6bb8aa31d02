//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestCollectionBuilder` - Builder pattern for creating collections
//! - Standalone constructors like `shortcut()`, `shortcut_in_group()`
//! - Assertion helpers over projections

use dialgrid::engine::ReorganizationEngine;
use dialgrid::store::EntryStore;
use dialgrid::types::{Entry, EntryKind, GroupId, ViewState};
use dialgrid::view::ViewProjector;
use uuid::Uuid;

// ============================================================================
// TestCollectionBuilder
// ============================================================================

/// Builder for creating test collections.
///
/// # Example
/// ```ignore
/// let store = TestCollectionBuilder::new()
///     .with_shortcuts(&["mail", "news"])
///     .with_folder("Work", &["wiki", "tracker"])
///     .build();
/// ```
#[derive(Default)]
pub struct TestCollectionBuilder {
    entries: Vec<Entry>,
}

impl TestCollectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root-level shortcut. The url is derived from the name.
    pub fn with_shortcut(mut self, name: &str) -> Self {
        self.entries.push(shortcut(name));
        self
    }

    /// Add several root-level shortcuts in order.
    pub fn with_shortcuts(mut self, names: &[&str]) -> Self {
        for name in names {
            self.entries.push(shortcut(name));
        }
        self
    }

    /// Add a folder: its marker followed by its members.
    pub fn with_folder(mut self, name: &str, members: &[&str]) -> Self {
        let group = Uuid::new_v4();
        self.entries.push(Entry::folder_marker(name, group));
        for member in members {
            self.entries.push(shortcut_in_group(member, group));
        }
        self
    }

    /// Add a prebuilt entry.
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Build the store (runs the self-healing load pass).
    pub fn build(self) -> EntryStore {
        EntryStore::from_entries(self.entries)
    }

    /// Build an engine around the store.
    pub fn build_engine(self) -> ReorganizationEngine {
        ReorganizationEngine::new(self.build())
    }
}

// ============================================================================
// Standalone constructors
// ============================================================================

/// A root-level shortcut with a url derived from its name.
pub fn shortcut(name: &str) -> Entry {
    Entry::shortcut(name, format!("https://{name}.example"))
}

/// A shortcut belonging to `group`.
pub fn shortcut_in_group(name: &str, group: GroupId) -> Entry {
    let mut entry = shortcut(name);
    if let EntryKind::Shortcut { group: g, .. } = &mut entry.kind {
        *g = Some(group);
    }
    entry
}

/// Names of the root projection, in order.
pub fn root_names(store: &EntryStore) -> Vec<String> {
    ViewProjector::root_sequence(store, &ViewState::default())
        .iter()
        .map(|e| e.name.clone())
        .collect()
}

/// Names of a folder's members, in order.
pub fn member_names(store: &EntryStore, group: GroupId) -> Vec<String> {
    ViewProjector::folder_members(store, group)
        .iter()
        .map(|e| e.name.clone())
        .collect()
}

/// Names of all entries in collection order.
pub fn collection_names(store: &EntryStore) -> Vec<String> {
    store.entries().iter().map(|e| e.name.clone()).collect()
}

/// The id of the entry with the given name.
pub fn id_of(store: &EntryStore, name: &str) -> dialgrid::types::EntryId {
    store
        .entries()
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("no entry named {name}"))
        .id
}

/// The group of the single folder in the collection.
pub fn only_group(store: &EntryStore) -> GroupId {
    let groups: Vec<GroupId> = store
        .entries()
        .iter()
        .filter_map(|e| e.folder_group())
        .collect();
    assert_eq!(groups.len(), 1, "expected exactly one folder");
    groups[0]
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert the collection satisfies all invariants.
pub fn assert_invariants(store: &EntryStore) {
    if let Err(violation) = store.verify_invariants() {
        panic!("invariant violated: {violation}");
    }
}
