//! Projections of the collection into the sequences a renderer draws.
//!
//! The projector is pure: it derives the visible root sequence and a
//! folder's member sequence from the store plus the transient view state,
//! preserving collection order throughout.

use crate::store::EntryStore;
use crate::types::{Entry, GroupId, ViewState};

/// Derives visible sequences from the collection and view state.
pub struct ViewProjector;

impl ViewProjector {
    /// The root grid sequence: top-level shortcuts and folder markers, in
    /// collection order.
    ///
    /// A non-empty search keyword additionally filters entries by
    /// case-insensitive substring over name and url. An active folder
    /// filter constrains the projection to that group's marker.
    pub fn root_sequence<'a>(store: &'a EntryStore, view: &ViewState) -> Vec<&'a Entry> {
        store
            .entries()
            .iter()
            .filter(|e| e.is_root_visible())
            .filter(|e| match view.active_folder {
                Some(group) => e.folder_group() == Some(group),
                None => true,
            })
            .filter(|e| {
                view.search_keyword.is_empty() || e.matches_keyword(&view.search_keyword)
            })
            .collect()
    }

    /// A folder's member sequence, in collection order.
    ///
    /// The search keyword is deliberately not applied here: an open folder
    /// shows all of its members regardless of the active search.
    pub fn folder_members(store: &EntryStore, group: GroupId) -> Vec<&Entry> {
        store
            .entries()
            .iter()
            .filter(|e| e.member_of() == Some(group))
            .collect()
    }
}
