//! Gesture classification - mapping a raw drop to a mutation intent.
//!
//! A drag session ends with a drop somewhere: on another entry, on the bare
//! grid surface, on non-interactive chrome, or outside an open folder
//! modal. The classifier turns that geometry into exactly one [`Intent`];
//! it never touches the collection itself.

use crate::constants::{EDGE_ZONE_LEFT, EDGE_ZONE_RIGHT, INSERT_LEFT_BELOW};
use crate::types::{Entry, EntryId, GroupId};

/// Where a drag session's pointer was released.
///
/// Hit-testing against real layout happens in the embedder; the drivers
/// only relay its result here.
#[derive(Clone, Copy, Debug)]
pub enum DropEvent<'a> {
    /// Released over another entry. `fraction_x` is the horizontal position
    /// of the drop within the target's bounding box, in `[0, 1]`; `index`
    /// is the target's position in the projected sequence the gesture
    /// happened in.
    OnEntry {
        target: &'a Entry,
        index: usize,
        fraction_x: f32,
    },
    /// Released inside the grid's display surface but over no entry
    OnSurface,
    /// Released on non-interactive chrome
    OnChrome,
    /// Released outside the modal content area while a folder view is open
    OutsideFolderModal,
}

/// Id-based description of where a driver's session was released. Drivers
/// produce this; the engine resolves the ids against the store and builds
/// the [`DropEvent`] the classifier consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleaseSpot {
    /// Released over another entry (projected index + horizontal fraction)
    OverEntry {
        target: EntryId,
        index: usize,
        fraction_x: f32,
    },
    /// Released on the grid surface, over no entry
    Surface,
    /// Released on non-interactive chrome
    Chrome,
    /// Released outside the open folder modal's content area
    OutsideFolderModal,
}

/// The single mutation a drop asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Move the dragged entry to insertion slot `to` of the projected
    /// sequence the gesture happened in
    Reorder { to: usize },
    /// Move the dragged entry to the end of the sequence
    ReorderToEnd,
    /// Merge dragged and target shortcuts into a new folder
    CreateFolder { dragged: EntryId, target: EntryId },
    /// Put the dragged shortcut into an existing folder
    AddToFolder { group: GroupId },
    /// Move the dragged shortcut back to the root grid
    MoveOutOfFolder { dragged: EntryId },
    /// Forbidden gesture (e.g. folder dropped onto the center of anything)
    Reject,
    /// No mutation
    NoOp,
}

/// Maps drop geometry to intents. The 0.2/0.8 split is a fixed policy
/// constant; the exact fractions 0.2 and 0.8 classify as edge drops and
/// only the open interval between them is the center zone.
pub struct GestureClassifier;

impl GestureClassifier {
    /// Classify a drop. Evaluation follows the decision table in order:
    /// folder-drag restrictions first, then edge zones, then the center
    /// zone, then off-entry surfaces.
    pub fn classify(dragged: &Entry, drop: DropEvent<'_>) -> Intent {
        match drop {
            DropEvent::OnEntry {
                target,
                index,
                fraction_x,
            } => Self::classify_on_entry(dragged, target, index, fraction_x),
            DropEvent::OnSurface => Intent::ReorderToEnd,
            DropEvent::OnChrome => Intent::NoOp,
            DropEvent::OutsideFolderModal => {
                if dragged.is_folder() {
                    Intent::Reject
                } else {
                    Intent::MoveOutOfFolder { dragged: dragged.id }
                }
            }
        }
    }

    fn classify_on_entry(
        dragged: &Entry,
        target: &Entry,
        index: usize,
        fraction_x: f32,
    ) -> Intent {
        let edge = fraction_x <= EDGE_ZONE_LEFT || fraction_x >= EDGE_ZONE_RIGHT;

        if dragged.is_folder() {
            // Folders reorder along edges but never merge or nest.
            return if edge {
                Intent::Reorder {
                    to: insertion_slot(index, fraction_x),
                }
            } else {
                Intent::Reject
            };
        }

        if edge {
            return Intent::Reorder {
                to: insertion_slot(index, fraction_x),
            };
        }

        // Center zone.
        match target.folder_group() {
            Some(group) => Intent::AddToFolder { group },
            None => Intent::CreateFolder {
                dragged: dragged.id,
                target: target.id,
            },
        }
    }
}

/// Insertion slot for an edge drop: before the target when the pointer is
/// on its left half, after it otherwise.
fn insertion_slot(target_index: usize, fraction_x: f32) -> usize {
    if fraction_x < INSERT_LEFT_BELOW {
        target_index
    } else {
        target_index + 1
    }
}
