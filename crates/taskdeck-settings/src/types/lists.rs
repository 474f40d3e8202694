//! Defaults applied to list fetches.

use serde::{Deserialize, Serialize};
use taskdeck_core::{QueryEncoding, SortDirection};

/// Defaults for paginated list requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListSettings {
    /// Page size.
    pub per_page: u32,
    /// Sort field.
    pub order_by: String,
    /// Sort direction.
    pub order_type: SortDirection,
    /// Filter clause layout.
    pub query_encoding: QueryEncoding,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            per_page: 10,
            order_by: "created_at".to_string(),
            order_type: SortDirection::Desc,
            query_encoding: QueryEncoding::Joined,
        }
    }
}
