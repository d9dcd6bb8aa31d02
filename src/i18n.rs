//! Localized string lookup.
//!
//! The core ships an English table; embedders layer real localization on
//! top of the same keys. Missing keys return `None` so callers can fall
//! back explicitly.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static STRINGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("folder.default_name", "New folder"),
        ("folder.deleted", "Folder removed"),
        ("entry.deleted", "Shortcut removed"),
        ("import.malformed", "Could not import shortcuts: the file is not valid"),
        ("import.done", "Shortcuts imported"),
        ("export.done", "Shortcuts exported"),
    ])
});

/// Look up a localized string by key.
pub fn lookup(key: &str) -> Option<&'static str> {
    STRINGS.get(key).copied()
}
