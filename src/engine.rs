//! The reorganization engine - orchestration of classification, mutation,
//! persistence and re-projection.
//!
//! The engine owns the store and the transient view state. Every resolved
//! drop produces at most one collection mutation; a rejected or invalid
//! intent leaves the collection byte-for-byte unchanged. Persistence is
//! fire-and-forget: failures are logged and implicitly retried by the next
//! mutation's save, never surfaced as blocking errors.

use parking_lot::Mutex;

use crate::gesture::{DropEvent, GestureClassifier, Intent, ReleaseSpot};
use crate::persist::BackgroundSaver;
use crate::store::{EntryStore, StoreError, StoreResult};
use crate::transfer;
use crate::types::{Entry, EntryId, GroupId, ViewState};
use crate::view::ViewProjector;

type CollectionListener = Box<dyn Fn(&[Entry]) + Send>;
type ViewListener = Box<dyn Fn(&ViewState) + Send>;

/// Read-only introspection snapshot, exposed instead of ambient globals.
#[derive(Clone, Debug)]
pub struct EngineSnapshot {
    pub entries: Vec<Entry>,
    pub view: ViewState,
    /// First invariant violation, if any (always `None` in healthy runs)
    pub invariant_violation: Option<String>,
}

/// Orchestrates gesture resolution against the collection.
pub struct ReorganizationEngine {
    store: EntryStore,
    view: ViewState,
    saver: Option<BackgroundSaver>,
    collection_listeners: Mutex<Vec<CollectionListener>>,
    view_listeners: Mutex<Vec<ViewListener>>,
}

impl ReorganizationEngine {
    pub fn new(store: EntryStore) -> Self {
        Self {
            store,
            view: ViewState::default(),
            saver: None,
            collection_listeners: Mutex::new(Vec::new()),
            view_listeners: Mutex::new(Vec::new()),
        }
    }

    /// Build an engine from whatever the external store has persisted.
    /// An empty or absent payload yields an empty collection; malformed
    /// rows are healed by the load pass.
    pub fn load(store: &dyn crate::persist::CollectionStore) -> anyhow::Result<Self> {
        let records = store.load()?.unwrap_or_default();
        Ok(Self::new(EntryStore::from_entries(transfer::from_records(
            records,
        ))))
    }

    /// Attach a background saver; every successful mutation enqueues a full
    /// snapshot of the collection (last-write-wins).
    pub fn with_saver(mut self, saver: BackgroundSaver) -> Self {
        self.saver = Some(saver);
        self
    }

    /// Block until every queued save has been written. Shutdown and test
    /// hook; the normal mutation path never waits on persistence.
    pub fn flush_saves(&self) {
        if let Some(saver) = &self.saver {
            saver.flush();
        }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Register a listener invoked after every collection mutation.
    pub fn on_collection_changed(&self, listener: impl Fn(&[Entry]) + Send + 'static) {
        self.collection_listeners.lock().push(Box::new(listener));
    }

    /// Register a listener invoked after every view-state change.
    pub fn on_view_changed(&self, listener: impl Fn(&ViewState) + Send + 'static) {
        self.view_listeners.lock().push(Box::new(listener));
    }

    /// Read-only snapshot for debugging and introspection.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            entries: self.store.entries().to_vec(),
            view: self.view.clone(),
            invariant_violation: self.store.verify_invariants().err(),
        }
    }

    // ========================================================================
    // View state
    // ========================================================================

    pub fn set_search(&mut self, keyword: &str) {
        self.view.set_search(keyword);
        self.notify_view();
    }

    /// Open a folder view. Fails when the group has no marker.
    pub fn open_folder(&mut self, group: GroupId) -> StoreResult<()> {
        if self.store.marker_of(group).is_none() {
            return Err(StoreError::FolderNotFound(group));
        }
        self.view.active_folder = Some(group);
        self.notify_view();
        Ok(())
    }

    pub fn close_folder(&mut self) {
        if self.view.active_folder.take().is_some() {
            self.notify_view();
        }
    }

    /// The currently visible root sequence.
    pub fn root_sequence(&self) -> Vec<&Entry> {
        ViewProjector::root_sequence(&self.store, &self.view)
    }

    /// The member sequence of the open folder, or empty when none is open.
    pub fn open_folder_members(&self) -> Vec<&Entry> {
        match self.view.active_folder {
            Some(group) => ViewProjector::folder_members(&self.store, group),
            None => Vec::new(),
        }
    }

    // ========================================================================
    // Drop resolution
    // ========================================================================

    /// Resolve a finished drag session: classify the drop, apply the single
    /// matching store mutation, persist and notify.
    ///
    /// Errors are recovered locally - a diagnostic is emitted and the
    /// collection stays untouched.
    pub fn resolve_drop(&mut self, dragged: EntryId, spot: ReleaseSpot) -> StoreResult<Intent> {
        let dragged_entry = self.store.get(dragged).ok_or(StoreError::NotFound(dragged))?;

        let intent = match spot {
            ReleaseSpot::OverEntry {
                target,
                index,
                fraction_x,
            } => {
                let target_entry =
                    self.store.get(target).ok_or(StoreError::NotFound(target))?;
                GestureClassifier::classify(
                    dragged_entry,
                    DropEvent::OnEntry {
                        target: target_entry,
                        index,
                        fraction_x,
                    },
                )
            }
            ReleaseSpot::Surface => GestureClassifier::classify(dragged_entry, DropEvent::OnSurface),
            ReleaseSpot::Chrome => GestureClassifier::classify(dragged_entry, DropEvent::OnChrome),
            ReleaseSpot::OutsideFolderModal => {
                GestureClassifier::classify(dragged_entry, DropEvent::OutsideFolderModal)
            }
        };

        match self.apply_intent(dragged, intent) {
            Ok(mutated) => {
                if mutated {
                    self.finish_mutation();
                }
                Ok(intent)
            }
            Err(err) => {
                tracing::debug!(%dragged, ?intent, %err, "drop intent rejected");
                Err(err)
            }
        }
    }

    /// Apply one classified intent. Returns whether the collection mutated.
    fn apply_intent(&mut self, dragged: EntryId, intent: Intent) -> StoreResult<bool> {
        match intent {
            Intent::NoOp | Intent::Reject => Ok(false),
            Intent::Reorder { to } => {
                self.apply_reorder(dragged, to)?;
                Ok(true)
            }
            Intent::ReorderToEnd => {
                let from = self
                    .store
                    .index_of(dragged)
                    .ok_or(StoreError::NotFound(dragged))?;
                self.store.move_to_end(from)?;
                Ok(true)
            }
            Intent::CreateFolder { dragged, target } => {
                let index_a = self
                    .store
                    .index_of(dragged)
                    .ok_or(StoreError::NotFound(dragged))?;
                let index_b = self
                    .store
                    .index_of(target)
                    .ok_or(StoreError::NotFound(target))?;
                self.store.create_folder(index_a, index_b)?;
                Ok(true)
            }
            Intent::AddToFolder { group } => {
                self.store.add_to_folder(dragged, group)?;
                Ok(true)
            }
            Intent::MoveOutOfFolder { dragged } => {
                self.store.move_out_of_folder(dragged)?;
                self.close_folder_if_gone();
                Ok(true)
            }
        }
    }

    /// Translate an insertion slot in the projected sequence the gesture
    /// happened in (folder view when one is open, root grid otherwise) into
    /// a collection reorder.
    fn apply_reorder(&mut self, dragged: EntryId, to: usize) -> StoreResult<()> {
        let from = self
            .store
            .index_of(dragged)
            .ok_or(StoreError::NotFound(dragged))?;

        let projected: Vec<EntryId> = match self.view.active_folder {
            Some(group) => ViewProjector::folder_members(&self.store, group)
                .iter()
                .map(|e| e.id)
                .collect(),
            None => ViewProjector::root_sequence(&self.store, &self.view)
                .iter()
                .map(|e| e.id)
                .collect(),
        };

        if to < projected.len() {
            // Land immediately before the entry currently in that slot.
            let anchor = self
                .store
                .index_of(projected[to])
                .ok_or(StoreError::NotFound(projected[to]))?;
            self.store.reorder(from, anchor)
        } else {
            // Past the last projected slot: land after the final projected
            // entry, which within either projection is the collection end
            // for the dragged entry's relative order.
            let Some(last) = projected.last() else {
                return Err(StoreError::InvalidIndex { index: to, len: 0 });
            };
            let anchor = self
                .store
                .index_of(*last)
                .ok_or(StoreError::NotFound(*last))?;
            if anchor + 1 >= self.store.len() {
                self.store.move_to_end(from)
            } else {
                self.store.reorder(from, anchor + 1)
            }
        }
    }

    /// After a member left its folder, the marker may have been
    /// auto-deleted; an open view of that folder must close with it.
    fn close_folder_if_gone(&mut self) {
        if let Some(group) = self.view.active_folder {
            if self.store.marker_of(group).is_none() {
                self.close_folder();
            }
        }
    }

    // ========================================================================
    // Direct operations (context-menu equivalents)
    // ========================================================================

    pub fn add_shortcut(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        group: Option<GroupId>,
    ) -> StoreResult<EntryId> {
        let id = self.store.add(name, url, group)?;
        self.finish_mutation();
        Ok(id)
    }

    pub fn edit_entry(
        &mut self,
        id: EntryId,
        name: impl Into<String>,
        url: impl Into<String>,
        group: Option<GroupId>,
    ) -> StoreResult<()> {
        self.store.edit(id, name, url, group)?;
        self.close_folder_if_gone();
        self.finish_mutation();
        Ok(())
    }

    pub fn delete_entry(&mut self, id: EntryId) -> StoreResult<()> {
        self.store.delete(id)?;
        self.close_folder_if_gone();
        self.finish_mutation();
        Ok(())
    }

    pub fn rename_folder(&mut self, group: GroupId, name: impl Into<String>) -> StoreResult<()> {
        self.store.rename_folder(group, name)?;
        self.finish_mutation();
        Ok(())
    }

    pub fn delete_folder(&mut self, group: GroupId) -> StoreResult<()> {
        self.store.delete_folder(group)?;
        self.close_folder_if_gone();
        self.finish_mutation();
        Ok(())
    }

    /// Replace the collection with an imported payload. A malformed payload
    /// fails without touching the current collection.
    pub fn import_collection(&mut self, json: &str) -> StoreResult<usize> {
        let entries = transfer::import(json)?;
        self.store = EntryStore::from_entries(entries);
        self.close_folder_if_gone();
        self.finish_mutation();
        Ok(self.store.len())
    }

    /// Serialize the full collection in the wire format.
    pub fn export_collection(&self) -> String {
        transfer::export_json(&self.store)
    }

    /// Persist + notify after any successful mutation.
    fn finish_mutation(&mut self) {
        if let Some(saver) = &self.saver {
            saver.enqueue(transfer::to_records(&self.store));
        }
        let listeners = self.collection_listeners.lock();
        for listener in listeners.iter() {
            listener(self.store.entries());
        }
    }

    fn notify_view(&self) {
        let listeners = self.view_listeners.lock();
        for listener in listeners.iter() {
            listener(&self.view);
        }
    }
}
