//! The concrete drag drivers.
//!
//! All four strategies share the `DragDriver` shape but differ in how a
//! session becomes a drag and what drop they report:
//!
//! - `NativeDragDriver` - platform drag events; a session is a drag from
//!   the first moment.
//! - `SyntheticMouseDriver` - simulated drag from raw pointer events; the
//!   pointer must travel an activation threshold first, otherwise the
//!   session resolves as a click and produces no drop.
//! - `SortLibraryDriver` - adapter over a third-party sort widget that only
//!   ever reorders; reported fractions are snapped to the nearest edge so
//!   classification cannot produce a merge.
//! - `RangeSelectDriver` - rubber-band selection on empty background; never
//!   produces a drop.

use crate::constants::DRAG_START_THRESHOLD;
use crate::gesture::ReleaseSpot;
use crate::input::driver::{
    DragDriver, DriverKind, HoverTarget, PointerMove, SessionDrop, SessionStart,
};
use crate::types::EntryId;

// ============================================================================
// Native pointer drag
// ============================================================================

/// Driver over the platform's native drag events.
#[derive(Debug, Default)]
pub struct NativeDragDriver {
    dragged: Option<EntryId>,
    hover: Option<HoverTarget>,
}

impl DragDriver for NativeDragDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::NativeDrag
    }

    fn begin(&mut self, start: SessionStart) {
        self.dragged = start.dragged;
        self.hover = None;
    }

    fn moved(&mut self, event: &PointerMove) {
        if self.dragged.is_none() {
            return;
        }
        self.hover = event.hover;
    }

    fn end(&mut self, spot: ReleaseSpot) -> Option<SessionDrop> {
        let dragged = self.dragged.take()?;
        self.hover = None;
        Some(SessionDrop { dragged, spot })
    }

    fn cancel(&mut self) {
        self.dragged = None;
        self.hover = None;
    }

    fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    fn clear_transients(&mut self) {
        self.hover = None;
    }
}

// ============================================================================
// Synthetic mouse drag
// ============================================================================

/// Driver that synthesizes drags from raw pointer events, for surfaces
/// where native drag is unavailable or suppressed.
#[derive(Debug, Default)]
pub struct SyntheticMouseDriver {
    dragged: Option<EntryId>,
    origin: (f32, f32),
    /// Becomes true once the pointer travels the activation threshold
    started: bool,
    hover: Option<HoverTarget>,
}

impl SyntheticMouseDriver {
    /// Whether the session has crossed the activation threshold and is a
    /// real drag rather than a click in progress.
    pub fn drag_started(&self) -> bool {
        self.started
    }
}

impl DragDriver for SyntheticMouseDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::SyntheticMouse
    }

    fn begin(&mut self, start: SessionStart) {
        self.dragged = start.dragged;
        self.origin = start.position;
        self.started = false;
        self.hover = None;
    }

    fn moved(&mut self, event: &PointerMove) {
        if self.dragged.is_none() {
            return;
        }
        if !self.started {
            let dx = event.position.0 - self.origin.0;
            let dy = event.position.1 - self.origin.1;
            if (dx * dx + dy * dy).sqrt() >= DRAG_START_THRESHOLD {
                self.started = true;
            }
        }
        if self.started {
            self.hover = event.hover;
        }
    }

    fn end(&mut self, spot: ReleaseSpot) -> Option<SessionDrop> {
        let dragged = self.dragged.take()?;
        self.hover = None;
        if !self.started {
            // Below the threshold this was a click, not a drag.
            return None;
        }
        self.started = false;
        Some(SessionDrop { dragged, spot })
    }

    fn cancel(&mut self) {
        self.dragged = None;
        self.started = false;
        self.hover = None;
    }

    fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    fn clear_transients(&mut self) {
        self.hover = None;
    }
}

// ============================================================================
// Sort-library adapter
// ============================================================================

/// Adapter over a third-party sortable-grid widget. The widget only knows
/// how to reorder, so reported drop fractions are snapped to the nearest
/// edge; its drops can never classify as folder merges.
#[derive(Debug, Default)]
pub struct SortLibraryDriver {
    dragged: Option<EntryId>,
    hover: Option<HoverTarget>,
}

impl DragDriver for SortLibraryDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::SortLibrary
    }

    fn begin(&mut self, start: SessionStart) {
        self.dragged = start.dragged;
        self.hover = None;
    }

    fn moved(&mut self, event: &PointerMove) {
        if self.dragged.is_none() {
            return;
        }
        self.hover = event.hover;
    }

    fn end(&mut self, spot: ReleaseSpot) -> Option<SessionDrop> {
        let dragged = self.dragged.take()?;
        self.hover = None;
        let spot = match spot {
            ReleaseSpot::OverEntry {
                target,
                index,
                fraction_x,
            } => ReleaseSpot::OverEntry {
                target,
                index,
                fraction_x: if fraction_x < 0.5 { 0.0 } else { 1.0 },
            },
            other => other,
        };
        Some(SessionDrop { dragged, spot })
    }

    fn cancel(&mut self) {
        self.dragged = None;
        self.hover = None;
    }

    fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    fn clear_transients(&mut self) {
        self.hover = None;
    }
}

// ============================================================================
// Range selection
// ============================================================================

/// Rubber-band selection over empty grid background. Owns its session like
/// any other driver (so no drag driver can hijack the pointer stream) but
/// never yields a drop.
#[derive(Debug, Default)]
pub struct RangeSelectDriver {
    active: bool,
    origin: (f32, f32),
    current: (f32, f32),
}

impl RangeSelectDriver {
    /// The current selection rectangle as `(min, max)` corners, if a
    /// session is running.
    pub fn selection_rect(&self) -> Option<((f32, f32), (f32, f32))> {
        if !self.active {
            return None;
        }
        let min = (
            self.origin.0.min(self.current.0),
            self.origin.1.min(self.current.1),
        );
        let max = (
            self.origin.0.max(self.current.0),
            self.origin.1.max(self.current.1),
        );
        Some((min, max))
    }
}

impl DragDriver for RangeSelectDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::RangeSelect
    }

    fn begin(&mut self, start: SessionStart) {
        self.active = true;
        self.origin = start.position;
        self.current = start.position;
    }

    fn moved(&mut self, event: &PointerMove) {
        if !self.active {
            return;
        }
        self.current = event.position;
    }

    fn end(&mut self, _spot: ReleaseSpot) -> Option<SessionDrop> {
        self.active = false;
        None
    }

    fn cancel(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn clear_transients(&mut self) {
        self.current = self.origin;
    }
}
