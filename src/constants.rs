//! Crate-wide constants.
//!
//! Centralizes policy values and magic numbers to make the codebase
//! more maintainable and self-documenting.

// ============================================================================
// Gesture Classification
// ============================================================================

/// Left boundary of the drop zones: a drop at or left of this fraction of
/// the target's width is an edge drop (reorder before the target).
pub const EDGE_ZONE_LEFT: f32 = 0.2;

/// Right boundary of the drop zones: a drop at or right of this fraction of
/// the target's width is an edge drop (reorder after the target).
pub const EDGE_ZONE_RIGHT: f32 = 0.8;

/// Fraction below which an edge drop inserts before the target rather than
/// after it.
pub const INSERT_LEFT_BELOW: f32 = 0.5;

// ============================================================================
// Input Handling
// ============================================================================

/// Minimum pointer travel (in pixels) before the synthetic mouse driver
/// treats a session as a drag rather than a click.
pub const DRAG_START_THRESHOLD: f32 = 5.0;

// ============================================================================
// Persistence
// ============================================================================

/// Save debounce delay in milliseconds
pub const SAVE_DEBOUNCE_MS: u64 = 500;

/// File name of the persisted collection inside the data directory
pub const COLLECTION_FILE_NAME: &str = "collection.json";

/// Directory name under the platform data/config dirs
pub const APP_DIR_NAME: &str = "dialgrid";

// ============================================================================
// Icon Cache
// ============================================================================

/// Time-to-live for cached icon resolutions, in seconds (7 days).
pub const ICON_CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

// ============================================================================
// Legacy Encoding
// ============================================================================

/// Url scheme of the synthetic placeholder a folder marker carries on the
/// wire. Old payloads encoded folders as shortcut rows with this prefix.
pub const FOLDER_URL_SCHEME: &str = "folder:";

/// i18n key of the default name given to a freshly created folder
pub const DEFAULT_FOLDER_NAME_KEY: &str = "folder.default_name";
