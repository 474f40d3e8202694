//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TaskdeckSettings::default()`]
//! 2. If `~/.taskdeck/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::TaskdeckSettings;

/// Base URL of the REST API.
pub const ENV_API_URL: &str = "TASKDECK_API_URL";
/// Request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "TASKDECK_TIMEOUT_MS";
/// Session file path.
pub const ENV_SESSION_FILE: &str = "TASKDECK_SESSION_FILE";
/// Default page size.
pub const ENV_PER_PAGE: &str = "TASKDECK_PER_PAGE";
/// Log level directive.
pub const ENV_LOG_LEVEL: &str = "TASKDECK_LOG_LEVEL";
/// Filter clause layout (`joined` or `repeated`).
pub const ENV_QUERY_ENCODING: &str = "TASKDECK_QUERY_ENCODING";

/// Directory holding settings and the session file (`~/.taskdeck`).
pub fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".taskdeck")
}

/// Resolve the path to the settings file (`~/.taskdeck/settings.json`).
pub fn settings_path() -> PathBuf {
    data_dir().join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TaskdeckSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults; invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<TaskdeckSettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

fn load_file_layer(path: &Path) -> Result<TaskdeckSettings> {
    let defaults = serde_json::to_value(TaskdeckSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply process environment overrides.
pub fn apply_env_overrides(settings: &mut TaskdeckSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides read through `lookup`.
///
/// Empty values are treated as unset. Values that fail to parse are ignored
/// with a warning, keeping the file/default value.
pub fn apply_overrides_from<F>(settings: &mut TaskdeckSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = read(ENV_API_URL) {
        settings.api.base_url = v;
    }
    if let Some(v) = read(ENV_TIMEOUT_MS) {
        match parse_u64_range(&v, 1, 3_600_000) {
            Some(ms) => settings.api.timeout_ms = Some(ms),
            None => warn_invalid(ENV_TIMEOUT_MS, &v),
        }
    }
    if let Some(v) = read(ENV_SESSION_FILE) {
        settings.session.file = Some(PathBuf::from(v));
    }
    if let Some(v) = read(ENV_PER_PAGE) {
        match parse_u32_range(&v, 1, 1000) {
            Some(n) => settings.lists.per_page = n,
            None => warn_invalid(ENV_PER_PAGE, &v),
        }
    }
    if let Some(v) = read(ENV_LOG_LEVEL) {
        settings.logging.level = v;
    }
    if let Some(v) = read(ENV_QUERY_ENCODING) {
        match v.parse() {
            Ok(encoding) => settings.lists.query_encoding = encoding,
            Err(_) => warn_invalid(ENV_QUERY_ENCODING, &v),
        }
    }
}

fn warn_invalid(key: &str, value: &str) {
    tracing::warn!(key, value, "invalid env var, ignoring");
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a string as a `u32` within a range.
pub fn parse_u32_range(val: &str, min: u32, max: u32) -> Option<u32> {
    let n: u32 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SettingsError;
    use std::collections::HashMap;
    use taskdeck_core::QueryEncoding;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"api": {"baseUrl": "a", "timeoutMs": 1}});
        let source = serde_json::json!({"api": {"baseUrl": "b"}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["api"]["baseUrl"], "b");
        assert_eq!(merged["api"]["timeoutMs"], 1);
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1});
        let merged = deep_merge(target, serde_json::json!({"a": null}));
        assert_eq!(merged["a"], 1);
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"items": [1, 2, 3]});
        let merged = deep_merge(target, serde_json::json!({"items": [4]}));
        assert_eq!(merged["items"], serde_json::json!([4]));
    }

    // ── File layer ──────────────────────────────────────────────────

    #[test]
    fn missing_file_returns_defaults() {
        let settings = load_file_layer(Path::new("/nonexistent/settings.json")).unwrap();
        assert_eq!(settings.api.base_url, "http://localhost:3002");
    }

    #[test]
    fn partial_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"api": {"baseUrl": "https://tasks.example.com"}, "lists": {"perPage": 50}}"#,
        )
        .unwrap();

        let settings = load_file_layer(&path).unwrap();
        assert_eq!(settings.api.base_url, "https://tasks.example.com");
        assert_eq!(settings.lists.per_page, 50);
        assert_eq!(settings.lists.order_by, "created_at");
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_file_layer(&path).unwrap_err(),
            SettingsError::Json(_)
        ));
    }

    // ── Env overrides ───────────────────────────────────────────────

    #[test]
    fn env_overrides_apply() {
        let mut settings = TaskdeckSettings::default();
        apply_overrides_from(
            &mut settings,
            env(&[
                (ENV_API_URL, "https://api.example.com"),
                (ENV_TIMEOUT_MS, "15000"),
                (ENV_SESSION_FILE, "/tmp/s.json"),
                (ENV_PER_PAGE, "25"),
                (ENV_LOG_LEVEL, "debug"),
                (ENV_QUERY_ENCODING, "repeated"),
            ]),
        );
        assert_eq!(settings.api.base_url, "https://api.example.com");
        assert_eq!(settings.api.timeout_ms, Some(15_000));
        assert_eq!(settings.session.file, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(settings.lists.per_page, 25);
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.lists.query_encoding, QueryEncoding::Repeated);
    }

    #[test]
    fn empty_api_url_falls_back_to_default() {
        let mut settings = TaskdeckSettings::default();
        apply_overrides_from(&mut settings, env(&[(ENV_API_URL, "")]));
        assert_eq!(settings.api.base_url, "http://localhost:3002");
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut settings = TaskdeckSettings::default();
        apply_overrides_from(
            &mut settings,
            env(&[
                (ENV_TIMEOUT_MS, "soon"),
                (ENV_PER_PAGE, "0"),
                (ENV_QUERY_ENCODING, "json"),
            ]),
        );
        assert!(settings.api.timeout_ms.is_none());
        assert_eq!(settings.lists.per_page, 10);
        assert_eq!(settings.lists.query_encoding, QueryEncoding::Joined);
    }

    // ── Parsing ─────────────────────────────────────────────────────

    #[test]
    fn parse_ranges() {
        assert_eq!(parse_u32_range("25", 1, 1000), Some(25));
        assert_eq!(parse_u32_range("1001", 1, 1000), None);
        assert_eq!(parse_u64_range("abc", 1, 10), None);
        assert_eq!(parse_u64_range("10", 1, 10), Some(10));
    }

    #[test]
    fn settings_path_under_data_dir() {
        assert!(settings_path().starts_with(data_dir()));
        assert!(settings_path().ends_with("settings.json"));
    }
}
