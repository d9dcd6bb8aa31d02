//! Gesture-to-mutation workflow tests: arbiter, classifier and engine
//! working against one collection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::helpers::{collection_names, id_of, only_group, root_names, TestCollectionBuilder};
use dialgrid::engine::ReorganizationEngine;
use dialgrid::gesture::{Intent, ReleaseSpot};
use dialgrid::input::{
    DriverArbiter, NativeDragDriver, PointerDown, RangeSelectDriver, Surface,
    SyntheticMouseDriver,
};
use dialgrid::store::StoreError;

fn arbiter() -> DriverArbiter {
    let mut arbiter = DriverArbiter::new();
    arbiter.register_drag_driver(Surface::RootGrid, Box::new(NativeDragDriver::default()));
    arbiter.register_drag_driver(
        Surface::FolderModal,
        Box::new(SyntheticMouseDriver::default()),
    );
    arbiter.register_range_selection(Box::new(RangeSelectDriver::default()));
    arbiter
}

fn press(arbiter: &mut DriverArbiter, surface: Surface, dragged: dialgrid::types::EntryId) {
    arbiter.pointer_down(PointerDown {
        surface,
        on_background: false,
        dragged: Some(dragged),
        position: (0.0, 0.0),
    });
}

#[test]
fn test_center_drop_merges_two_shortcuts_into_a_folder() {
    let mut engine = TestCollectionBuilder::new()
        .with_shortcuts(&["S1", "S2", "S3"])
        .build_engine();
    let mut arbiter = arbiter();
    let dragged = id_of(engine.store(), "S1");
    let target = id_of(engine.store(), "S2");

    press(&mut arbiter, Surface::RootGrid, dragged);
    let result = arbiter.pointer_up(
        ReleaseSpot::OverEntry {
            target,
            index: 1,
            fraction_x: 0.5,
        },
        &mut engine,
    );

    assert!(matches!(result, Some(Ok(Intent::CreateFolder { .. }))));
    assert_eq!(root_names(engine.store()), vec!["New folder", "S3"]);
    assert_eq!(engine.store().len(), 4);
    assert!(engine.snapshot().invariant_violation.is_none());
}

#[test]
fn test_center_drop_on_marker_adds_to_folder() {
    let mut engine = TestCollectionBuilder::new()
        .with_shortcut("loose")
        .with_folder("Work", &["wiki"])
        .build_engine();
    let mut arbiter = arbiter();
    let dragged = id_of(engine.store(), "loose");
    let marker = id_of(engine.store(), "Work");
    let group = only_group(engine.store());

    press(&mut arbiter, Surface::RootGrid, dragged);
    let result = arbiter.pointer_up(
        ReleaseSpot::OverEntry {
            target: marker,
            index: 1,
            fraction_x: 0.4,
        },
        &mut engine,
    );

    assert!(matches!(result, Some(Ok(Intent::AddToFolder { .. }))));
    assert_eq!(engine.store().member_count(group), 2);
    assert_eq!(root_names(engine.store()), vec!["Work"]);
}

#[test]
fn test_edge_drop_reorders_per_documented_rule() {
    let mut engine = TestCollectionBuilder::new()
        .with_shortcuts(&["A", "B", "C", "D"])
        .build_engine();
    let mut arbiter = arbiter();
    let dragged = id_of(engine.store(), "A");
    let target = id_of(engine.store(), "C");

    // Drop A on the left edge of C (projected index 2): insert before C.
    press(&mut arbiter, Surface::RootGrid, dragged);
    let result = arbiter.pointer_up(
        ReleaseSpot::OverEntry {
            target,
            index: 2,
            fraction_x: 0.1,
        },
        &mut engine,
    );

    assert!(matches!(result, Some(Ok(Intent::Reorder { to: 2 }))));
    assert_eq!(collection_names(engine.store()), vec!["B", "A", "C", "D"]);
}

#[test]
fn test_right_edge_drop_on_last_entry_moves_to_end() {
    let mut engine = TestCollectionBuilder::new()
        .with_shortcuts(&["A", "B", "C"])
        .build_engine();
    let mut arbiter = arbiter();
    let dragged = id_of(engine.store(), "A");
    let target = id_of(engine.store(), "C");

    press(&mut arbiter, Surface::RootGrid, dragged);
    let result = arbiter.pointer_up(
        ReleaseSpot::OverEntry {
            target,
            index: 2,
            fraction_x: 0.9,
        },
        &mut engine,
    );

    assert!(matches!(result, Some(Ok(Intent::Reorder { to: 3 }))));
    assert_eq!(collection_names(engine.store()), vec!["B", "C", "A"]);
}

#[test]
fn test_surface_drop_reorders_to_end() {
    let mut engine = TestCollectionBuilder::new()
        .with_shortcuts(&["A", "B", "C"])
        .build_engine();
    let mut arbiter = arbiter();
    let dragged = id_of(engine.store(), "B");

    press(&mut arbiter, Surface::RootGrid, dragged);
    let result = arbiter.pointer_up(ReleaseSpot::Surface, &mut engine);

    assert!(matches!(result, Some(Ok(Intent::ReorderToEnd))));
    assert_eq!(collection_names(engine.store()), vec!["A", "C", "B"]);
}

#[test]
fn test_reorder_inside_an_open_folder_view() {
    let mut engine = TestCollectionBuilder::new()
        .with_shortcut("outside")
        .with_folder("Work", &["first", "second", "third"])
        .build_engine();
    let group = only_group(engine.store());
    engine.open_folder(group).unwrap();

    let mut arbiter = arbiter();
    let dragged = id_of(engine.store(), "third");
    let target = id_of(engine.store(), "first");

    // Synthetic driver owns the folder modal; it needs pointer travel
    // before the session counts as a drag.
    press(&mut arbiter, Surface::FolderModal, dragged);
    arbiter.pointer_move(&dialgrid::input::PointerMove {
        position: (40.0, 0.0),
        hover: None,
    });
    let result = arbiter.pointer_up(
        ReleaseSpot::OverEntry {
            target,
            index: 0,
            fraction_x: 0.05,
        },
        &mut engine,
    );

    assert!(matches!(result, Some(Ok(Intent::Reorder { to: 0 }))));
    assert_eq!(
        crate::helpers::member_names(engine.store(), group),
        vec!["third", "first", "second"]
    );
    // The root-level neighbor was untouched.
    assert_eq!(root_names(engine.store())[0], "outside");
}

#[test]
fn test_click_without_travel_in_folder_view_mutates_nothing() {
    let mut engine = TestCollectionBuilder::new()
        .with_folder("Work", &["first", "second"])
        .build_engine();
    let group = only_group(engine.store());
    engine.open_folder(group).unwrap();
    let before = collection_names(engine.store());

    let mut arbiter = arbiter();
    let dragged = id_of(engine.store(), "second");
    press(&mut arbiter, Surface::FolderModal, dragged);
    // No pointer_move: the synthetic driver stays below its threshold.
    let result = arbiter.pointer_up(
        ReleaseSpot::OverEntry {
            target: id_of(engine.store(), "first"),
            index: 0,
            fraction_x: 0.5,
        },
        &mut engine,
    );

    assert!(result.is_none());
    assert_eq!(collection_names(engine.store()), before);
}

#[test]
fn test_drop_outside_modal_moves_member_out_and_closes_empty_folder() {
    let mut engine = TestCollectionBuilder::new()
        .with_shortcut("outside")
        .with_folder("Work", &["only"])
        .build_engine();
    let group = only_group(engine.store());
    engine.open_folder(group).unwrap();

    let mut arbiter = arbiter();
    let dragged = id_of(engine.store(), "only");
    press(&mut arbiter, Surface::FolderModal, dragged);
    arbiter.pointer_move(&dialgrid::input::PointerMove {
        position: (200.0, 200.0),
        hover: None,
    });
    let result = arbiter.pointer_up(ReleaseSpot::OutsideFolderModal, &mut engine);

    assert!(matches!(result, Some(Ok(Intent::MoveOutOfFolder { .. }))));
    // Marker auto-deleted, member back at root, folder view closed.
    assert_eq!(root_names(engine.store()), vec!["outside", "only"]);
    assert_eq!(engine.view().active_folder, None);
    assert!(engine.snapshot().invariant_violation.is_none());
}

#[test]
fn test_folder_dragged_to_center_is_rejected_without_mutation() {
    let mut engine = TestCollectionBuilder::new()
        .with_shortcut("loose")
        .with_folder("Work", &["wiki"])
        .build_engine();
    let before = collection_names(engine.store());

    let mut arbiter = arbiter();
    let marker = id_of(engine.store(), "Work");
    press(&mut arbiter, Surface::RootGrid, marker);
    let result = arbiter.pointer_up(
        ReleaseSpot::OverEntry {
            target: id_of(engine.store(), "loose"),
            index: 0,
            fraction_x: 0.5,
        },
        &mut engine,
    );

    assert!(matches!(result, Some(Ok(Intent::Reject))));
    assert_eq!(collection_names(engine.store()), before);
}

#[test]
fn test_self_merge_is_rejected_without_mutation() {
    let mut engine = TestCollectionBuilder::new()
        .with_shortcuts(&["A", "B"])
        .build_engine();
    let before = collection_names(engine.store());

    let mut arbiter = arbiter();
    let dragged = id_of(engine.store(), "A");
    press(&mut arbiter, Surface::RootGrid, dragged);
    let result = arbiter.pointer_up(
        ReleaseSpot::OverEntry {
            target: dragged,
            index: 0,
            fraction_x: 0.5,
        },
        &mut engine,
    );

    assert!(matches!(
        result,
        Some(Err(StoreError::InvalidOperation(_)))
    ));
    assert_eq!(collection_names(engine.store()), before);
}

#[test]
fn test_each_drop_notifies_collection_listeners_once() {
    let mut engine = TestCollectionBuilder::new()
        .with_shortcuts(&["A", "B", "C"])
        .build_engine();
    let notifications = Arc::new(AtomicUsize::new(0));
    let seen = notifications.clone();
    engine.on_collection_changed(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    let mut arbiter = arbiter();
    let dragged = id_of(engine.store(), "A");
    press(&mut arbiter, Surface::RootGrid, dragged);
    arbiter.pointer_up(ReleaseSpot::Surface, &mut engine);
    assert_eq!(notifications.load(Ordering::SeqCst), 1);

    // A drop that mutates nothing notifies nobody.
    let other = id_of(engine.store(), "B");
    press(&mut arbiter, Surface::RootGrid, other);
    arbiter.pointer_up(ReleaseSpot::Chrome, &mut engine);
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
}

#[test]
fn test_view_listeners_fire_on_search_and_folder_changes() {
    let mut engine = TestCollectionBuilder::new()
        .with_folder("Work", &["wiki"])
        .build_engine();
    let group = only_group(engine.store());
    let notifications = Arc::new(AtomicUsize::new(0));
    let seen = notifications.clone();
    engine.on_view_changed(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    engine.set_search("wi");
    engine.open_folder(group).unwrap();
    engine.close_folder();
    // Closing an already-closed folder view is silent.
    engine.close_folder();

    assert_eq!(notifications.load(Ordering::SeqCst), 3);
}

#[test]
fn test_direct_operations_update_projections() {
    let mut engine = ReorganizationEngine::new(dialgrid::store::EntryStore::new());

    let a = engine.add_shortcut("A", "https://a.example", None).unwrap();
    engine.add_shortcut("B", "https://b.example", None).unwrap();
    assert_eq!(root_names(engine.store()), vec!["A", "B"]);

    engine
        .edit_entry(a, "A2", "https://a2.example", None)
        .unwrap();
    assert_eq!(root_names(engine.store()), vec!["A2", "B"]);

    engine.delete_entry(a).unwrap();
    assert_eq!(root_names(engine.store()), vec!["B"]);
}

#[test]
fn test_rename_and_delete_folder_through_engine() {
    let mut engine = TestCollectionBuilder::new()
        .with_folder("Work", &["wiki", "tracker"])
        .build_engine();
    let group = only_group(engine.store());

    engine.rename_folder(group, "Projects").unwrap();
    assert_eq!(root_names(engine.store()), vec!["Projects"]);

    engine.open_folder(group).unwrap();
    engine.delete_folder(group).unwrap();
    assert_eq!(root_names(engine.store()), vec!["wiki", "tracker"]);
    // The open view of the deleted folder closed with it.
    assert_eq!(engine.view().active_folder, None);
}
