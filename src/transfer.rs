//! Import/export of the collection as ordered entry records.
//!
//! The record shape doubles as the storage format: a flat ordered list of
//! rows `{name, url, icon, groupId, kind, id}`. Old payloads encoded
//! folders as shortcut rows whose url carries the `folder:` placeholder and
//! no `kind` column; import recognizes both encodings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{EntryStore, StoreError, StoreResult};
use crate::types::{parse_folder_url, Entry, EntryId, EntryKind, GroupId};

/// One serialized entry row, in wire column order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "groupId", default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub kind: RecordKind,
    pub id: EntryId,
}

/// Wire encoding of the entry kind. Absent in legacy payloads, where a
/// folder is recognized by its placeholder url instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Shortcut,
    Folder,
}

/// Serialize the collection to wire records, in collection order.
pub fn to_records(store: &EntryStore) -> Vec<EntryRecord> {
    store.entries().iter().map(record_of).collect()
}

fn record_of(entry: &Entry) -> EntryRecord {
    let (kind, group_id) = match &entry.kind {
        EntryKind::Shortcut { group, .. } => (RecordKind::Shortcut, *group),
        EntryKind::FolderMarker { group } => (RecordKind::Folder, Some(*group)),
    };
    EntryRecord {
        name: entry.name.clone(),
        url: entry.wire_url(),
        icon: entry.icon.clone(),
        group_id,
        kind,
        id: entry.id,
    }
}

/// Materialize wire records into entries, dropping rows that fail
/// validation (missing name or url). Each dropped row gets a diagnostic.
pub fn from_records(records: Vec<EntryRecord>) -> Vec<Entry> {
    records
        .into_iter()
        .filter_map(|record| {
            if record.name.trim().is_empty() || record.url.trim().is_empty() {
                tracing::warn!(id = %record.id, "dropping record without name or url");
                return None;
            }
            Some(entry_of(record))
        })
        .collect()
}

fn entry_of(record: EntryRecord) -> Entry {
    let legacy_group = parse_folder_url(&record.url);
    let kind = if record.kind == RecordKind::Folder || legacy_group.is_some() {
        let group = record
            .group_id
            .or(legacy_group)
            .unwrap_or_else(Uuid::new_v4);
        EntryKind::FolderMarker { group }
    } else {
        EntryKind::Shortcut {
            url: record.url,
            group: record.group_id,
        }
    };
    Entry {
        id: record.id,
        name: record.name,
        icon: record.icon,
        kind,
    }
}

/// Serialize the collection as a JSON array of records.
pub fn export_json(store: &EntryStore) -> String {
    // Records are plain data; serialization cannot fail.
    serde_json::to_string_pretty(&to_records(store)).expect("records serialize")
}

/// Parse a JSON payload into entries. Fails with `MalformedImport` on a
/// parse error, leaving the caller's collection untouched; rows missing
/// name or url are dropped, not fatal.
pub fn import(json: &str) -> StoreResult<Vec<Entry>> {
    let records: Vec<EntryRecord> = serde_json::from_str(json)
        .map_err(|e| StoreError::MalformedImport(e.to_string()))?;
    Ok(from_records(records))
}
