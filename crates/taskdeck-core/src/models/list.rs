//! Paginated list envelope.

use serde::{Deserialize, Serialize};

/// Body of every collection `GET`: one page of items plus the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    /// Items on the requested page.
    #[serde(default)]
    pub result: Vec<T>,
    /// Total number of items matching the filters.
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            result: Vec::new(),
            total: 0,
        }
    }
}
