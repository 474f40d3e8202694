//! # taskdeck-settings
//!
//! Configuration for the taskdeck client, loaded from three layers (in
//! priority order):
//! 1. **Compiled defaults**: [`TaskdeckSettings::default()`]
//! 2. **User file**: `~/.taskdeck/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `TASKDECK_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use taskdeck_settings::get_settings;
//!
//! let settings = get_settings();
//! println!("API: {}", settings.api.base_url);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::OnceLock;

static SETTINGS: OnceLock<TaskdeckSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// Loaded on first call; falls back to compiled defaults if loading fails.
pub fn get_settings() -> &'static TaskdeckSettings {
    SETTINGS.get_or_init(|| {
        load_settings().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            TaskdeckSettings::default()
        })
    })
}

/// Initialize the global settings with a specific value.
///
/// # Errors
///
/// Returns the provided settings back if the global was already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: TaskdeckSettings) -> std::result::Result<(), TaskdeckSettings> {
    SETTINGS.set(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::{QueryEncoding, SortDirection};

    #[test]
    fn default_settings_are_valid() {
        let settings = TaskdeckSettings::default();
        assert_eq!(settings.api.base_url, DEFAULT_API_URL);
        assert_eq!(settings.api.base_url, "http://localhost:3002");
        assert!(settings.api.timeout_ms.is_none());
        assert!(settings.session.file.is_none());
        assert_eq!(settings.lists.per_page, 10);
        assert_eq!(settings.lists.order_by, "created_at");
        assert_eq!(settings.lists.order_type, SortDirection::Desc);
        assert_eq!(settings.lists.query_encoding, QueryEncoding::Joined);
        assert_eq!(settings.logging.level, "warn");
    }
}
