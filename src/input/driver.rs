//! The common drag-driver capability.
//!
//! Each input strategy (native pointer drag, synthetic mouse drag, the
//! sort-library adapter, range selection) implements `DragDriver` and is
//! registered with the arbiter instead of being wired straight to platform
//! events. Drivers track transient visual state only; the collection is
//! mutated exclusively by the engine after the drop resolves.

use crate::gesture::ReleaseSpot;
use crate::types::EntryId;

/// The interaction surface a driver is registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The main shortcut grid
    RootGrid,
    /// The grid inside an open folder modal
    FolderModal,
}

/// Identifies a driver strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverKind {
    NativeDrag,
    SyntheticMouse,
    SortLibrary,
    RangeSelect,
}

/// What the embedder's hit-testing found under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverTarget {
    pub entry: EntryId,
    /// Position of the hovered entry in the projected sequence
    pub index: usize,
    /// Horizontal pointer position within the entry's box, in `[0, 1]`
    pub fraction_x: f32,
}

/// One pointer-move sample delivered to the armed driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerMove {
    pub position: (f32, f32),
    pub hover: Option<HoverTarget>,
}

/// Session begin parameters. Range selection starts with no dragged entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionStart {
    pub dragged: Option<EntryId>,
    pub position: (f32, f32),
}

/// The drop a finished session produced, ready for classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionDrop {
    pub dragged: EntryId,
    pub spot: ReleaseSpot,
}

/// Polymorphic input strategy. Only the armed driver of a session receives
/// `moved`; calls on an inactive driver must be no-ops.
pub trait DragDriver: Send {
    fn kind(&self) -> DriverKind;

    /// Arm for a new pointer session.
    fn begin(&mut self, start: SessionStart);

    /// Track a pointer move. Must be a no-op when not armed.
    fn moved(&mut self, event: &PointerMove);

    /// Finish the session, translating the release into a drop - or `None`
    /// when the session produced no drag (a plain click, or a selection).
    fn end(&mut self, spot: ReleaseSpot) -> Option<SessionDrop>;

    /// Abort the session, reverting visual-only state.
    fn cancel(&mut self);

    /// Whether this driver currently owns a session.
    fn is_active(&self) -> bool;

    /// Drop any transient hover/visual state (called on every session end
    /// regardless of which driver owned it).
    fn clear_transients(&mut self);
}
