//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]`, so a settings
//! file may be partial; missing fields get their default value.

mod api;
mod lists;

pub use api::*;
pub use lists::*;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// ```json
/// {
///   "api": { "baseUrl": "https://tasks.example.com" },
///   "lists": { "perPage": 25 }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskdeckSettings {
    /// REST API endpoint and transport.
    pub api: ApiSettings,
    /// Where the session is persisted.
    pub session: SessionSettings,
    /// Defaults for list fetches.
    pub lists: ListSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Session persistence settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSettings {
    /// Session file path. `None` means `~/.taskdeck/session.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl SessionSettings {
    /// Configured session file, or `~/.taskdeck/session.json`.
    pub fn resolved_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| crate::loader::data_dir().join("session.json"))
    }
}

/// Logging settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}
