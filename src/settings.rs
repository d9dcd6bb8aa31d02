//! Application settings.
//!
//! Loaded once at startup from the user config directory. A missing or
//! malformed file is never fatal: defaults apply and a diagnostic is
//! logged.

use std::path::PathBuf;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::constants::{APP_DIR_NAME, SAVE_DEBOUNCE_MS};

/// User-tunable settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds the background saver waits between writes
    pub save_debounce_ms: u64,
    /// Overrides the platform data directory for the collection file
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_debounce_ms: SAVE_DEBOUNCE_MS,
            data_dir: None,
        }
    }
}

impl Settings {
    /// `<config_dir>/dialgrid/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("settings.json"))
    }

    /// Load settings from the default location, falling back to defaults
    /// when the file is absent or unreadable.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("no platform config directory; using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|raw| serde_json::from_str(&raw).map_err(anyhow::Error::from))
        {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "malformed settings; using defaults");
                Self::default()
            }
        }
    }

    /// Persist settings, creating the config directory if needed.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))
    }
}
