//! Driver arbitration - one gesture interpretation per pointer session.
//!
//! Several input strategies subscribe to the same pointer stream. The
//! arbiter is the single state machine deciding which of them owns a
//! session, replacing scattered `is_disabled` flags:
//!
//! ```text
//! Idle -> Armed(driver)   (pointer-down; background arms range selection,
//!                          otherwise the drag driver of the surface)
//! Armed -> Resolving      (pointer-up - drop is classified and applied)
//! Resolving -> Idle       (always, clearing transient hover state)
//! Armed -> Idle           (cancellation - visual state reverted, no mutation)
//! ```
//!
//! Only the armed driver sees pointer-move for the session; this is the
//! de-facto mutual exclusion that keeps two interpretations from mutating
//! the collection for one pointer stream.

use crate::engine::ReorganizationEngine;
use crate::gesture::{Intent, ReleaseSpot};
use crate::input::driver::{DragDriver, DriverKind, PointerMove, SessionStart, Surface};
use crate::store::StoreResult;
use crate::types::EntryId;

/// Arbiter session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArbiterState {
    /// No pointer session in flight
    Idle,
    /// One driver owns the current session
    Armed { slot: usize },
    /// Drop is being classified and applied
    Resolving,
}

/// Pointer-down parameters, as observed by the embedder.
#[derive(Clone, Copy, Debug)]
pub struct PointerDown {
    /// Which grid the press landed on
    pub surface: Surface,
    /// True when the press hit empty grid background (arms range selection)
    pub on_background: bool,
    /// The entry under the pointer, if any
    pub dragged: Option<EntryId>,
    pub position: (f32, f32),
}

struct Registration {
    /// `None` registers the session-wide range-selection driver
    surface: Option<Surface>,
    driver: Box<dyn DragDriver>,
}

/// Mediates the competing input drivers.
pub struct DriverArbiter {
    state: ArbiterState,
    registrations: Vec<Registration>,
}

impl Default for DriverArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverArbiter {
    pub fn new() -> Self {
        Self {
            state: ArbiterState::Idle,
            registrations: Vec::new(),
        }
    }

    /// Register the drag driver owning sessions that start on `surface`.
    pub fn register_drag_driver(&mut self, surface: Surface, driver: Box<dyn DragDriver>) {
        self.registrations.push(Registration {
            surface: Some(surface),
            driver,
        });
    }

    /// Register the range-selection driver, armed for background presses
    /// on any surface.
    pub fn register_range_selection(&mut self, driver: Box<dyn DragDriver>) {
        self.registrations.push(Registration {
            surface: None,
            driver,
        });
    }

    pub fn state(&self) -> ArbiterState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ArbiterState::Idle
    }

    /// The driver owning the current session, if one is armed.
    pub fn armed_kind(&self) -> Option<DriverKind> {
        match self.state {
            ArbiterState::Armed { slot } => Some(self.registrations[slot].driver.kind()),
            _ => None,
        }
    }

    /// Borrow a registered driver by kind (for reading visual state such as
    /// the selection rectangle).
    pub fn driver(&self, kind: DriverKind) -> Option<&dyn DragDriver> {
        self.registrations
            .iter()
            .map(|r| r.driver.as_ref())
            .find(|d| d.kind() == kind)
    }

    /// Start a pointer session: pick and arm exactly one driver.
    ///
    /// A background press arms range selection; otherwise the drag driver
    /// registered for the pressed surface wins. A pointer-down while a
    /// session is still in flight cancels the stale session first.
    pub fn pointer_down(&mut self, down: PointerDown) {
        if !self.is_idle() {
            tracing::warn!("pointer-down during an active session; cancelling stale session");
            self.cancel();
        }

        let slot = if down.on_background {
            self.registrations
                .iter()
                .position(|r| r.surface.is_none())
        } else {
            self.registrations
                .iter()
                .position(|r| r.surface == Some(down.surface))
        };

        let Some(slot) = slot else {
            return;
        };
        self.registrations[slot].driver.begin(SessionStart {
            dragged: down.dragged,
            position: down.position,
        });
        self.state = ArbiterState::Armed { slot };
    }

    /// Route a pointer move to the armed driver. All other drivers never
    /// see the event.
    pub fn pointer_move(&mut self, event: &PointerMove) {
        if let ArbiterState::Armed { slot } = self.state {
            self.registrations[slot].driver.moved(event);
        }
    }

    /// Finish the session: the armed driver turns the release into a drop,
    /// the engine classifies and applies it, and every driver's transient
    /// state is cleared regardless of the outcome.
    ///
    /// Returns `None` when no mutation was attempted (no session, a plain
    /// click, or a selection), otherwise the resolution result.
    pub fn pointer_up(
        &mut self,
        spot: ReleaseSpot,
        engine: &mut ReorganizationEngine,
    ) -> Option<StoreResult<Intent>> {
        let ArbiterState::Armed { slot } = self.state else {
            return None;
        };
        self.state = ArbiterState::Resolving;

        let session_drop = self.registrations[slot].driver.end(spot);
        let result = session_drop.map(|d| engine.resolve_drop(d.dragged, d.spot));

        for registration in &mut self.registrations {
            registration.driver.clear_transients();
        }
        self.state = ArbiterState::Idle;
        result
    }

    /// Abort the session (Escape, pointer left the viewport). Visual-only
    /// state is reverted; the collection is never touched.
    pub fn cancel(&mut self) {
        if let ArbiterState::Armed { slot } = self.state {
            self.registrations[slot].driver.cancel();
        }
        for registration in &mut self.registrations {
            registration.driver.clear_transients();
        }
        self.state = ArbiterState::Idle;
    }
}
