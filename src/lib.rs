//! dialgrid - headless core for a shortcut grid.
//!
//! A flat ordered collection of shortcut entries is organized into ad-hoc
//! folders purely through pointer gestures: drag a shortcut onto another to
//! merge them into a folder, onto a folder to add, out of a folder to
//! remove, onto an edge to reorder. The crate owns the collection model,
//! the mutation operations preserving its invariants, the gesture
//! classifier, and the arbitration that lets exactly one input driver win
//! each pointer session. Rendering and real persistence/icon/i18n backends
//! live behind the traits in [`persist`], [`icons`] and [`i18n`].

pub mod constants;
pub mod engine;
pub mod gesture;
pub mod i18n;
pub mod icons;
pub mod input;
pub mod persist;
pub mod settings;
pub mod store;
pub mod trace;
pub mod transfer;
pub mod types;
pub mod view;

pub use engine::{EngineSnapshot, ReorganizationEngine};
pub use gesture::{DropEvent, GestureClassifier, Intent, ReleaseSpot};
pub use store::{EntryStore, StoreError, StoreResult};
pub use types::{Entry, EntryId, EntryKind, GroupId, ViewState};
pub use view::ViewProjector;
