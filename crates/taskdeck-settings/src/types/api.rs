//! API endpoint settings.

use serde::{Deserialize, Serialize};

/// Endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3002";

/// REST API endpoint and transport settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSettings {
    /// Base URL every resource path is appended to.
    pub base_url: String,
    /// Request timeout. `None` leaves the transport default in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_round_trip() {
        let api: ApiSettings =
            serde_json::from_str(r#"{"baseUrl":"https://x.io","timeoutMs":5000}"#).unwrap();
        assert_eq!(api.base_url, "https://x.io");
        assert_eq!(api.timeout_ms, Some(5000));

        let json = serde_json::to_value(ApiSettings::default()).unwrap();
        assert_eq!(json, serde_json::json!({"baseUrl": DEFAULT_API_URL}));
    }
}
