//! Persistence boundary - the external collection store and the
//! fire-and-forget background saver.
//!
//! Saves always carry the full current collection; a rapid mutation burst
//! may race on the persisted copy and the design tolerates it by
//! last-write-wins (pending snapshots are coalesced to the newest one).
//! Save failures are logged and implicitly retried by the next mutation's
//! save; they never block the caller.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::constants::{APP_DIR_NAME, COLLECTION_FILE_NAME, SAVE_DEBOUNCE_MS};
use crate::transfer::EntryRecord;

/// External persistent store for the collection.
pub trait CollectionStore: Send {
    /// Load the persisted rows, or `None` when nothing was saved yet.
    fn load(&self) -> anyhow::Result<Option<Vec<EntryRecord>>>;
    /// Persist the full row list (best-effort, last-write-wins).
    fn save(&self, records: &[EntryRecord]) -> anyhow::Result<()>;
}

// ============================================================================
// JSON file store
// ============================================================================

/// Stores the collection as a JSON file under the user data directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The platform-default location: `<data_dir>/dialgrid/collection.json`.
    pub fn at_default_location() -> anyhow::Result<Self> {
        let dir = dirs::data_dir()
            .context("no platform data directory")?
            .join(APP_DIR_NAME);
        Ok(Self::new(dir.join(COLLECTION_FILE_NAME)))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CollectionStore for JsonFileStore {
    fn load(&self) -> anyhow::Result<Option<Vec<EntryRecord>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let records = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(records))
    }

    fn save(&self, records: &[EntryRecord]) -> anyhow::Result<()> {
        let dir = self.path.parent().context("store path has no parent")?;
        std::fs::create_dir_all(dir)?;

        // Write to a temp file in the same directory, then rename into
        // place, so a crash mid-write never corrupts the stored copy.
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, records)?;
        tmp.persist(&self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

// ============================================================================
// In-memory store (tests, embedders without a disk)
// ============================================================================

/// Keeps saved rows in memory. Clones share the same backing storage.
#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Option<Vec<EntryRecord>>>>,
    save_count: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently saved rows.
    pub fn saved(&self) -> Option<Vec<EntryRecord>> {
        self.rows.lock().clone()
    }

    /// How many saves have been performed.
    pub fn save_count(&self) -> usize {
        *self.save_count.lock()
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<Vec<EntryRecord>>> {
        Ok(self.rows.lock().clone())
    }

    fn save(&self, records: &[EntryRecord]) -> anyhow::Result<()> {
        *self.rows.lock() = Some(records.to_vec());
        *self.save_count.lock() += 1;
        Ok(())
    }
}

// ============================================================================
// Background saver
// ============================================================================

enum SaveCommand {
    Save(Vec<EntryRecord>),
    Flush(mpsc::SyncSender<()>),
}

/// Worker thread that performs saves off the main event path.
///
/// `enqueue` never blocks; pending snapshots are coalesced so only the
/// newest one is written after the debounce window.
pub struct BackgroundSaver {
    tx: mpsc::Sender<SaveCommand>,
    handle: Option<thread::JoinHandle<()>>,
}

impl BackgroundSaver {
    /// Spawn a saver with the default debounce window.
    pub fn spawn(store: Box<dyn CollectionStore>) -> Self {
        Self::spawn_with_debounce(store, Duration::from_millis(SAVE_DEBOUNCE_MS))
    }

    pub fn spawn_with_debounce(store: Box<dyn CollectionStore>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<SaveCommand>();
        let handle = thread::Builder::new()
            .name("dialgrid-saver".into())
            .spawn(move || worker(store, rx, debounce))
            .expect("spawn saver thread");
        Self {
            tx,
            handle: Some(handle),
        }
    }

    /// Queue a snapshot for saving. Fire-and-forget.
    pub fn enqueue(&self, records: Vec<EntryRecord>) {
        if self.tx.send(SaveCommand::Save(records)).is_err() {
            tracing::error!("saver thread is gone; snapshot dropped");
        }
    }

    /// Block until every queued snapshot has been written. Test and
    /// shutdown hook; normal operation never waits on saves.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = mpsc::sync_channel(1);
        if self.tx.send(SaveCommand::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for BackgroundSaver {
    fn drop(&mut self) {
        self.flush();
        // Closing the channel ends the worker loop.
        let (tx, _) = mpsc::channel();
        drop(std::mem::replace(&mut self.tx, tx));
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn worker(store: Box<dyn CollectionStore>, rx: mpsc::Receiver<SaveCommand>, debounce: Duration) {
    let mut last_save: Option<Instant> = None;
    while let Ok(command) = rx.recv() {
        let mut pending = None;
        let mut acks = Vec::new();
        match command {
            SaveCommand::Save(records) => pending = Some(records),
            SaveCommand::Flush(ack) => acks.push(ack),
        }

        if pending.is_some() {
            if let Some(at) = last_save {
                let elapsed = at.elapsed();
                if elapsed < debounce {
                    thread::sleep(debounce - elapsed);
                }
            }
        }

        // Coalesce everything queued while we debounced: only the newest
        // snapshot matters (last-write-wins).
        while let Ok(next) = rx.try_recv() {
            match next {
                SaveCommand::Save(records) => pending = Some(records),
                SaveCommand::Flush(ack) => acks.push(ack),
            }
        }

        if let Some(records) = pending {
            if let Err(err) = store.save(&records) {
                tracing::error!(%err, "collection save failed; will retry on next mutation");
            }
            last_save = Some(Instant::now());
        }
        for ack in acks {
            let _ = ack.send(());
        }
    }
}
