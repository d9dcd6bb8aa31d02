//! The entry collection: ordered storage plus atomic mutation operations.
//!
//! ## Modules
//!
//! - `collection` - `EntryStore`, the owner of the ordered sequence
//! - `error` - the operation error taxonomy

mod collection;
mod error;

pub use collection::EntryStore;
pub use error::{StoreError, StoreResult};
