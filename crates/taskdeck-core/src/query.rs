//! List-query serialization.
//!
//! Turns filter criteria, orderers and pagination into the query string the
//! collection endpoints expect. Clause order is fixed: pagination, then
//! filters, then ordering. The first clause is prefixed with `?`, every
//! later one with `&`.
//!
//! Two encodings are available:
//!
//! - [`QueryEncoding::Joined`] (default): the three filter lists
//!   (`filterBy`, `filterValue`, `filterType`) are each comma-joined across
//!   all criteria, and nothing is escaped. This is what the API parses today.
//!   A comma inside a value shifts every later value by one position on the
//!   server; `&`, `=`, `?` and non-ASCII text are sent raw.
//! - [`QueryEncoding::Repeated`]: one `filterBy`/`filterValue`/`filterType`
//!   triple per criterion, every key and value percent-encoded. Only use it
//!   against servers that read repeated keys as arrays.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Characters escaped by the repeated encoding (RFC 3986 unreserved are kept).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Errors raised when parsing query parts from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A criterion was not in `field:operator:value` form.
    #[error("invalid filter `{0}`: expected field:operator:value")]
    InvalidCriterion(String),
    /// Operator other than `eq` or `like`.
    #[error("unknown filter operator `{0}`")]
    UnknownOperator(String),
    /// Direction other than `ASC` or `DESC`.
    #[error("unknown sort direction `{0}`")]
    UnknownDirection(String),
    /// Encoding other than `joined` or `repeated`.
    #[error("unknown query encoding `{0}`")]
    UnknownEncoding(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Filters
// ─────────────────────────────────────────────────────────────────────────────

/// How the server compares a field against a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Exact match.
    Eq,
    /// Substring match.
    Like,
}

impl FilterOperator {
    /// Wire string representation.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Like => "like",
        }
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Ok(Self::Eq),
            "like" => Ok(Self::Like),
            _ => Err(QueryError::UnknownOperator(s.to_owned())),
        }
    }
}

/// A single `(field, value, operator)` predicate applied server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriterion {
    /// Field to filter on (`filterBy`).
    pub field: String,
    /// Value to compare against (`filterValue`).
    pub value: String,
    /// Comparison (`filterType`).
    pub operator: FilterOperator,
}

impl FilterCriterion {
    /// Exact-match criterion.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator: FilterOperator::Eq,
        }
    }

    /// Substring-match criterion.
    pub fn like(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator: FilterOperator::Like,
        }
    }

    /// Whether this criterion would mis-align the joined encoding.
    pub fn breaks_joined_encoding(&self) -> bool {
        self.field.contains(',') || self.value.contains(',')
    }
}

/// Parses `field:operator:value`. The value may itself contain `:`.
impl FromStr for FilterCriterion {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(field), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(QueryError::InvalidCriterion(s.to_owned()));
        };
        if field.is_empty() {
            return Err(QueryError::InvalidCriterion(s.to_owned()));
        }
        Ok(Self {
            field: field.to_owned(),
            value: value.to_owned(),
            operator: op.parse()?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ordering
// ─────────────────────────────────────────────────────────────────────────────

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Wire string representation.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(QueryError::UnknownDirection(s.to_owned())),
        }
    }
}

/// Sort directive applied server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Orderers {
    /// Field to sort by. Empty means no ordering clause.
    pub order_by: String,
    /// Direction; `ASC` is sent when unset.
    pub order_type: Option<SortDirection>,
}

impl Orderers {
    /// Build an orderer with an explicit direction.
    pub fn new(order_by: impl Into<String>, order_type: SortDirection) -> Self {
        Self {
            order_by: order_by.into(),
            order_type: Some(order_type),
        }
    }
}

/// Newest first: `created_at DESC`.
impl Default for Orderers {
    fn default() -> Self {
        Self::new("created_at", SortDirection::Desc)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Wire layout of the filter clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryEncoding {
    /// Comma-joined parallel lists, unescaped.
    #[default]
    Joined,
    /// One percent-encoded triple per criterion.
    Repeated,
}

impl FromStr for QueryEncoding {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "joined" => Ok(Self::Joined),
            "repeated" => Ok(Self::Repeated),
            _ => Err(QueryError::UnknownEncoding(s.to_owned())),
        }
    }
}

impl fmt::Display for QueryEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Joined => "joined",
            Self::Repeated => "repeated",
        })
    }
}

/// Serialize filters, ordering and pagination in the joined encoding.
///
/// Returns `""` when nothing is present. The pagination clause is emitted
/// only when both `page` and `per_page` are non-zero.
pub fn serialize(
    filters: &[FilterCriterion],
    orderers: Option<&Orderers>,
    page: Option<u32>,
    per_page: Option<u32>,
) -> String {
    build(filters, orderers, page, per_page, QueryEncoding::Joined)
}

fn build(
    filters: &[FilterCriterion],
    orderers: Option<&Orderers>,
    page: Option<u32>,
    per_page: Option<u32>,
    encoding: QueryEncoding,
) -> String {
    let mut query = String::new();

    if let (Some(page), Some(per_page)) = (page, per_page) {
        if page > 0 && per_page > 0 {
            push_clause(&mut query, &format!("page={page}&per_page={per_page}"));
        }
    }

    if !filters.is_empty() {
        let clause = match encoding {
            QueryEncoding::Joined => joined_filters(filters),
            QueryEncoding::Repeated => repeated_filters(filters),
        };
        push_clause(&mut query, &clause);
    }

    if let Some(orderers) = orderers.filter(|o| !o.order_by.is_empty()) {
        let direction = orderers.order_type.unwrap_or(SortDirection::Asc).as_wire();
        let order_by = match encoding {
            QueryEncoding::Joined => orderers.order_by.clone(),
            QueryEncoding::Repeated => encode(&orderers.order_by),
        };
        push_clause(&mut query, &format!("orderBy={order_by}&orderType={direction}"));
    }

    query
}

fn push_clause(query: &mut String, clause: &str) {
    query.push(if query.is_empty() { '?' } else { '&' });
    query.push_str(clause);
}

fn joined_filters(filters: &[FilterCriterion]) -> String {
    let join = |pick: fn(&FilterCriterion) -> &str| {
        filters.iter().map(pick).collect::<Vec<_>>().join(",")
    };
    format!(
        "filterBy={}&filterValue={}&filterType={}",
        join(|f| &f.field),
        join(|f| &f.value),
        join(|f| f.operator.as_wire()),
    )
}

fn repeated_filters(filters: &[FilterCriterion]) -> String {
    filters
        .iter()
        .map(|f| {
            format!(
                "filterBy={}&filterValue={}&filterType={}",
                encode(&f.field),
                encode(&f.value),
                f.operator.as_wire(),
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// ListQuery
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a collection request can carry, bundled for reuse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    /// Filter criteria; order determines positional alignment.
    pub filters: Vec<FilterCriterion>,
    /// Optional ordering.
    pub orderers: Option<Orderers>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

impl ListQuery {
    /// Empty query (serializes to `""`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a criterion.
    #[must_use]
    pub fn filter(mut self, criterion: FilterCriterion) -> Self {
        self.filters.push(criterion);
        self
    }

    /// Set the ordering.
    #[must_use]
    pub fn order(mut self, orderers: Orderers) -> Self {
        self.orderers = Some(orderers);
        self
    }

    /// Set pagination.
    #[must_use]
    pub fn paginate(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// Serialize with the given encoding.
    pub fn to_query_string(&self, encoding: QueryEncoding) -> String {
        build(
            &self.filters,
            self.orderers.as_ref(),
            self.page,
            self.per_page,
            encoding,
        )
    }

    /// Criteria that would shift positions under the joined encoding.
    pub fn ambiguities(&self) -> Vec<&FilterCriterion> {
        self.filters
            .iter()
            .filter(|f| f.breaks_joined_encoding())
            .collect()
    }
}

/// Joined encoding, same as [`serialize`].
impl fmt::Display for ListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string(QueryEncoding::Joined))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
