//! Paginated, filtered list state.

use parking_lot::Mutex;
use taskdeck_core::{FilterCriterion, ListQuery, Orderers, QueryEncoding};
use taskdeck_settings::ListSettings;
use tokio::sync::watch;

use super::source::ListSource;
use super::{FetchOutcome, FetchPhase};

/// Parameters of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Server-side filters.
    pub filters: Vec<FilterCriterion>,
    /// Server-side ordering.
    pub orderers: Orderers,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            filters: Vec::new(),
            orderers: Orderers::default(),
        }
    }
}

impl ListParams {
    /// First page with the configured page size and ordering.
    pub fn from_settings(lists: &ListSettings) -> Self {
        Self {
            per_page: lists.per_page,
            orderers: Orderers::new(lists.order_by.clone(), lists.order_type),
            ..Self::default()
        }
    }

    /// The query these parameters describe.
    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            filters: self.filters.clone(),
            orderers: Some(self.orderers.clone()),
            page: Some(self.page),
            per_page: Some(self.per_page),
        }
    }

    /// Whether moving from `self` to `next` needs a new request.
    ///
    /// Ordering is deliberately not part of this: a changed sort only takes
    /// effect on the next page change, filter change, or refresh.
    fn needs_refetch(&self, next: &Self) -> bool {
        self.page != next.page || self.per_page != next.per_page || self.filters != next.filters
    }
}

/// Observable state of a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    /// Items of the last applied page.
    pub items: Vec<T>,
    /// Total matching items on the server.
    pub total: u64,
    /// Whether a request is in flight.
    pub loading: bool,
    /// Outcome of the latest request.
    pub phase: FetchPhase,
}

impl<T> Default for ListSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            loading: false,
            phase: FetchPhase::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    /// Mount or parameter change.
    Auto,
    /// Explicit user refresh.
    Refresh,
}

#[derive(Debug)]
struct InFlight {
    seq: u64,
    query: String,
}

#[derive(Debug)]
struct State {
    params: ListParams,
    latest_seq: u64,
    in_flight: Option<InFlight>,
}

/// Coordinates fetches of one list view against a [`ListSource`].
pub struct ListFetcher<S: ListSource> {
    source: S,
    encoding: QueryEncoding,
    state: Mutex<State>,
    snapshot: watch::Sender<ListSnapshot<S::Item>>,
}

impl<S: ListSource> ListFetcher<S> {
    /// Idle fetcher. Nothing is requested until [`start`](Self::start).
    pub fn new(source: S, params: ListParams) -> Self {
        let (snapshot, _) = watch::channel(ListSnapshot::default());
        Self {
            source,
            encoding: QueryEncoding::default(),
            state: Mutex::new(State {
                params,
                latest_seq: 0,
                in_flight: None,
            }),
            snapshot,
        }
    }

    /// Use `encoding` for the filter clause.
    #[must_use]
    pub fn with_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Current parameters.
    pub fn params(&self) -> ListParams {
        self.state.lock().params.clone()
    }

    /// Current state.
    pub fn snapshot(&self) -> ListSnapshot<S::Item> {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<S::Item>> {
        self.snapshot.subscribe()
    }

    /// Initial fetch with the current parameters.
    pub async fn start(&self) -> FetchOutcome {
        self.fetch(Trigger::Auto).await
    }

    /// Replace the parameters. Fetches when the page, page size, or filter
    /// contents changed; an ordering-only change is stored without a fetch.
    pub async fn set_params(&self, params: ListParams) -> FetchOutcome {
        let refetch = {
            let mut state = self.state.lock();
            let refetch = state.params.needs_refetch(&params);
            state.params = params;
            refetch
        };
        if !refetch {
            return FetchOutcome::Skipped;
        }
        self.fetch(Trigger::Auto).await
    }

    /// Move to `page`, keeping everything else.
    pub async fn set_page(&self, page: u32) -> FetchOutcome {
        let mut params = self.params();
        params.page = page;
        self.set_params(params).await
    }

    /// Replace the filters, keeping everything else.
    pub async fn set_filters(&self, filters: Vec<FilterCriterion>) -> FetchOutcome {
        let mut params = self.params();
        params.filters = filters;
        self.set_params(params).await
    }

    /// Re-issue the current query. A no-op while a request is in flight.
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch(Trigger::Refresh).await
    }

    async fn fetch(&self, trigger: Trigger) -> FetchOutcome {
        let (seq, query) = {
            let mut state = self.state.lock();
            let list_query = state.params.to_query();
            let query = list_query.to_query_string(self.encoding);

            match (&state.in_flight, trigger) {
                (Some(_), Trigger::Refresh) => {
                    tracing::debug!("refresh ignored while a request is in flight");
                    return FetchOutcome::Skipped;
                }
                (Some(in_flight), Trigger::Auto) if in_flight.query == query => {
                    tracing::debug!(%query, "identical request already in flight");
                    return FetchOutcome::Skipped;
                }
                _ => {}
            }

            if self.encoding == QueryEncoding::Joined {
                for criterion in list_query.ambiguities() {
                    tracing::warn!(
                        field = %criterion.field,
                        value = %criterion.value,
                        "filter contains a comma; the server will misalign joined filter lists"
                    );
                }
            }

            state.latest_seq += 1;
            let seq = state.latest_seq;
            state.in_flight = Some(InFlight {
                seq,
                query: query.clone(),
            });
            (seq, query)
        };

        let previous = self.snapshot.borrow().phase.clone();
        self.snapshot.send_modify(|s| {
            s.loading = true;
            s.phase = FetchPhase::Loading;
        });

        let slot = Slot {
            fetcher: self,
            seq,
            previous,
            armed: true,
        };
        let result = self.source.fetch_list(&query).await;
        slot.disarm();

        {
            let mut state = self.state.lock();
            if state.latest_seq != seq {
                tracing::debug!(seq, latest = state.latest_seq, "discarding stale list response");
                return FetchOutcome::Stale;
            }
            if state.in_flight.as_ref().is_some_and(|f| f.seq == seq) {
                state.in_flight = None;
            }
        }

        match result {
            Ok(page) => {
                self.snapshot.send_modify(|s| {
                    s.items = page.result;
                    s.total = page.total;
                    s.loading = false;
                    s.phase = FetchPhase::Success;
                });
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::error!(category = %e.category(), %query, "failed to fetch list: {e}");
                self.snapshot.send_modify(|s| {
                    s.loading = false;
                    s.phase = FetchPhase::Error(e.to_string());
                });
                FetchOutcome::Failed
            }
        }
    }
}

/// Holds the in-flight slot of request `seq` while it is awaited.
///
/// Dropped without [`disarm`](Self::disarm) means the caller abandoned the
/// future: the slot is released and the previous phase restored, unless a
/// newer request already owns it.
struct Slot<'a, S: ListSource> {
    fetcher: &'a ListFetcher<S>,
    seq: u64,
    previous: FetchPhase,
    armed: bool,
}

impl<S: ListSource> Slot<'_, S> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: ListSource> Drop for Slot<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        {
            let mut state = self.fetcher.state.lock();
            if !state.in_flight.as_ref().is_some_and(|f| f.seq == self.seq) {
                return;
            }
            state.in_flight = None;
        }
        tracing::debug!(seq = self.seq, "list request cancelled");
        let previous = match std::mem::take(&mut self.previous) {
            FetchPhase::Loading => FetchPhase::Idle,
            phase => phase,
        };
        self.fetcher.snapshot.send_modify(|s| {
            s.loading = false;
            s.phase = previous;
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
