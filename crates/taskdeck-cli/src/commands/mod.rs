//! Subcommand implementations. Each returns the JSON document to print.

pub mod auth;
pub mod dashboard;
pub mod projects;
pub mod tasks;
pub mod users;

use anyhow::{Result, bail};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use taskdeck_client::FetchPhase;
use taskdeck_client::fetch::{ListFetcher, ListParams, ListSource};
use taskdeck_core::models::ListResponse;
use taskdeck_core::{FilterCriterion, QueryEncoding, SortDirection};
use taskdeck_settings::ListSettings;

/// Pagination, filtering, and ordering flags shared by `list` commands.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Page number (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size (defaults to `lists.perPage`).
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Filter as `field:op:value`, op is `eq` or `like`. Repeatable.
    #[arg(long = "filter", value_name = "FIELD:OP:VALUE")]
    pub filters: Vec<FilterCriterion>,

    /// Field to sort by (defaults to `lists.orderBy`).
    #[arg(long)]
    pub order_by: Option<String>,

    /// `ASC` or `DESC` (defaults to `lists.orderType`).
    #[arg(long)]
    pub order_type: Option<SortDirection>,

    /// Send one filterBy/filterValue/filterType triple per filter instead of
    /// comma-joined lists.
    #[arg(long)]
    pub repeated_filters: bool,
}

impl ListArgs {
    /// Fetch parameters: flags over settings defaults.
    pub fn params(&self, lists: &ListSettings) -> ListParams {
        let mut params = ListParams::from_settings(lists);
        params.page = self.page;
        if let Some(per_page) = self.per_page {
            params.per_page = per_page;
        }
        params.filters.clone_from(&self.filters);
        if let Some(order_by) = &self.order_by {
            params.orderers.order_by.clone_from(order_by);
        }
        if let Some(order_type) = self.order_type {
            params.orderers.order_type = Some(order_type);
        }
        params
    }

    pub fn encoding(&self, lists: &ListSettings) -> QueryEncoding {
        if self.repeated_filters {
            QueryEncoding::Repeated
        } else {
            lists.query_encoding
        }
    }
}

/// Run the first fetch of `fetcher` and return the page.
pub async fn fetch_page<S>(fetcher: &ListFetcher<S>) -> Result<ListResponse<S::Item>>
where
    S: ListSource,
{
    let _ = fetcher.start().await;
    let snapshot = fetcher.snapshot();
    if let FetchPhase::Error(message) = snapshot.phase {
        bail!(message);
    }
    Ok(ListResponse {
        result: snapshot.items,
        total: snapshot.total,
    })
}

pub fn to_json(value: &impl Serialize) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}


#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::Orderers;

    fn args() -> ListArgs {
        ListArgs {
            page: 1,
            per_page: None,
            filters: Vec::new(),
            order_by: None,
            order_type: None,
            repeated_filters: false,
        }
    }

    #[test]
    fn defaults_come_from_settings() {
        let lists = ListSettings {
            per_page: 20,
            ..ListSettings::default()
        };
        let params = args().params(&lists);
        assert_eq!(params.per_page, 20);
        assert_eq!(params.orderers, Orderers::default());
        assert_eq!(args().encoding(&lists), QueryEncoding::Joined);
    }

    #[test]
    fn flags_override_settings() {
        let lists = ListSettings::default();
        let args = ListArgs {
            page: 3,
            per_page: Some(5),
            filters: vec!["name:like:web".parse().unwrap()],
            order_by: Some("name".into()),
            order_type: Some(SortDirection::Asc),
            repeated_filters: true,
        };
        let params = args.params(&lists);
        assert_eq!(params.page, 3);
        assert_eq!(params.per_page, 5);
        assert_eq!(params.filters, vec![FilterCriterion::like("name", "web")]);
        assert_eq!(params.orderers, Orderers::new("name", SortDirection::Asc));
        assert_eq!(args.encoding(&lists), QueryEncoding::Repeated);
    }
}
