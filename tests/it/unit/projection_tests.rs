//! ViewProjector tests - root and folder-member sequences.

use crate::helpers::{member_names, only_group, TestCollectionBuilder};
use dialgrid::types::ViewState;
use dialgrid::view::ViewProjector;

#[test]
fn test_root_sequence_shows_top_level_and_markers_only() {
    let store = TestCollectionBuilder::new()
        .with_shortcut("mail")
        .with_folder("Work", &["wiki", "tracker"])
        .with_shortcut("news")
        .build();
    let view = ViewState::default();

    let names: Vec<&str> = ViewProjector::root_sequence(&store, &view)
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["mail", "Work", "news"]);
}

#[test]
fn test_search_is_case_insensitive_over_name_and_url() {
    let store = TestCollectionBuilder::new()
        .with_shortcuts(&["Mail", "News"])
        .build();
    let mut view = ViewState::default();

    view.set_search("MAIL");
    let hits = ViewProjector::root_sequence(&store, &view);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Mail");

    // Urls are derived from lower-cased names in the helpers, so this
    // matches on the url only.
    view.set_search("news.example");
    let hits = ViewProjector::root_sequence(&store, &view);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "News");
}

#[test]
fn test_active_folder_filter_constrains_root_to_its_marker() {
    let store = TestCollectionBuilder::new()
        .with_shortcut("mail")
        .with_folder("Work", &["wiki"])
        .build();
    let group = only_group(&store);
    let view = ViewState {
        search_keyword: String::new(),
        active_folder: Some(group),
    };

    let names: Vec<&str> = ViewProjector::root_sequence(&store, &view)
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Work"]);
}

#[test]
fn test_member_order_derives_from_whole_sequence_positions() {
    let mut store = TestCollectionBuilder::new()
        .with_folder("Work", &["first", "second", "third"])
        .build();
    let group = only_group(&store);
    assert_eq!(member_names(&store, group), vec!["first", "second", "third"]);

    // Moving a member within the whole sequence reorders the folder view,
    // even though nothing folder-specific was touched.
    let from = store.index_of_name("third");
    let to = store.index_of_name("first");
    store.reorder(from, to).unwrap();
    assert_eq!(member_names(&store, group), vec!["third", "first", "second"]);
}

#[test]
fn test_search_keyword_ignored_inside_folder_view() {
    let store = TestCollectionBuilder::new()
        .with_folder("Work", &["wiki", "tracker"])
        .build();
    let group = only_group(&store);

    // folder_members has no view-state parameter at all; assert the full
    // member list is returned while a search would have filtered the root.
    let members = ViewProjector::folder_members(&store, group);
    assert_eq!(members.len(), 2);
}

// Small extension trait to keep the reorder test readable.
trait IndexOfName {
    fn index_of_name(&self, name: &str) -> usize;
}

impl IndexOfName for dialgrid::store::EntryStore {
    fn index_of_name(&self, name: &str) -> usize {
        self.entries()
            .iter()
            .position(|e| e.name == name)
            .unwrap_or_else(|| panic!("no entry named {name}"))
    }
}
