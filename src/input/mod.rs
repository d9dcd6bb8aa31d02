//! Pointer input handling for the shortcut grid.
//!
//! Three drag strategies plus range selection compete for one pointer
//! stream. The arbiter is the explicit state machine that lets exactly one
//! of them own each pointer-down-to-pointer-up session.
//!
//! ## Modules
//!
//! - `driver` - the common `DragDriver` capability and session types
//! - `drivers` - the four concrete driver implementations
//! - `arbiter` - the per-session arbitration state machine

mod arbiter;
mod driver;
mod drivers;

pub use arbiter::{ArbiterState, DriverArbiter, PointerDown};
pub use driver::{DragDriver, DriverKind, HoverTarget, PointerMove, SessionDrop, SessionStart, Surface};
pub use drivers::{NativeDragDriver, RangeSelectDriver, SortLibraryDriver, SyntheticMouseDriver};
