//! Single-entity state for detail views.

use parking_lot::Mutex;
use tokio::sync::watch;

use super::source::EntitySource;
use super::{FetchOutcome, FetchPhase};

/// Observable state of a detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot<E> {
    /// The loaded entity, `None` before the first load or after a failure.
    pub entity: Option<E>,
    /// Whether a request is in flight.
    pub loading: bool,
    /// Outcome of the latest request.
    pub phase: FetchPhase,
}

impl<E> Default for EntitySnapshot<E> {
    fn default() -> Self {
        Self {
            entity: None,
            loading: false,
            phase: FetchPhase::Idle,
        }
    }
}

#[derive(Debug)]
struct State<I> {
    id: Option<I>,
    latest_seq: u64,
    in_flight: Option<u64>,
}

/// Coordinates loading one entity at a time from an [`EntitySource`].
pub struct EntityFetcher<S: EntitySource> {
    source: S,
    state: Mutex<State<S::Id>>,
    snapshot: watch::Sender<EntitySnapshot<S::Entity>>,
}

impl<S: EntitySource> EntityFetcher<S> {
    /// Fetcher with nothing selected.
    pub fn new(source: S) -> Self {
        let (snapshot, _) = watch::channel(EntitySnapshot::default());
        Self {
            source,
            state: Mutex::new(State {
                id: None,
                latest_seq: 0,
                in_flight: None,
            }),
            snapshot,
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> EntitySnapshot<S::Entity> {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<EntitySnapshot<S::Entity>> {
        self.snapshot.subscribe()
    }

    /// Select `id` and load it.
    ///
    /// An empty ID clears the selection without a request: the snapshot
    /// reports no entity and not loading.
    pub async fn load(&self, id: S::Id) -> FetchOutcome {
        if id.as_ref().is_empty() {
            {
                let mut state = self.state.lock();
                state.id = None;
                // Invalidate anything still in flight
                state.latest_seq += 1;
                state.in_flight = None;
            }
            let _ = self.snapshot.send_replace(EntitySnapshot::default());
            return FetchOutcome::Skipped;
        }

        let seq = {
            let mut state = self.state.lock();
            if state.in_flight.is_some() && state.id.as_ref() == Some(&id) {
                return FetchOutcome::Skipped;
            }
            state.id = Some(id.clone());
            Self::issue(&mut state)
        };
        self.fetch(seq, id).await
    }

    /// Reload the selected entity. A no-op while loading or when nothing is
    /// selected.
    pub async fn refresh(&self) -> FetchOutcome {
        let (seq, id) = {
            let mut state = self.state.lock();
            let Some(id) = state.id.clone() else {
                return FetchOutcome::Skipped;
            };
            if state.in_flight.is_some() {
                return FetchOutcome::Skipped;
            }
            (Self::issue(&mut state), id)
        };
        self.fetch(seq, id).await
    }

    fn issue(state: &mut State<S::Id>) -> u64 {
        state.latest_seq += 1;
        state.in_flight = Some(state.latest_seq);
        state.latest_seq
    }

    async fn fetch(&self, seq: u64, id: S::Id) -> FetchOutcome {
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
        let result = self.source.fetch_one(&id).await;
        slot.disarm();

        {
            let mut state = self.state.lock();
            if state.latest_seq != seq {
                tracing::debug!(seq, latest = state.latest_seq, "discarding stale entity response");
                return FetchOutcome::Stale;
            }
            state.in_flight = None;
        }

        match result {
            Ok(entity) => {
                let _ = self.snapshot.send_replace(EntitySnapshot {
                    entity: Some(entity),
                    loading: false,
                    phase: FetchPhase::Success,
                });
                FetchOutcome::Applied
            }
            Err(e) => {
                let id: &str = id.as_ref();
                tracing::error!(id, category = %e.category(), "failed to fetch entity: {e}");
                let _ = self.snapshot.send_replace(EntitySnapshot {
                    entity: None,
                    loading: false,
                    phase: FetchPhase::Error(e.to_string()),
                });
                FetchOutcome::Failed
            }
        }
    }
}

/// Releases the in-flight slot if the load future is dropped mid-request.
struct Slot<'a, S: EntitySource> {
    fetcher: &'a EntityFetcher<S>,
    seq: u64,
    previous: FetchPhase,
    armed: bool,
}

impl<S: EntitySource> Slot<'_, S> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: EntitySource> Drop for Slot<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        {
            let mut state = self.fetcher.state.lock();
            if state.in_flight != Some(self.seq) {
                return;
            }
            state.in_flight = None;
        }
        tracing::debug!(seq = self.seq, "entity request cancelled");
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use taskdeck_core::ProjectId;
    use taskdeck_core::logging::capture_logs;
    use tokio::sync::oneshot;
    use tracing::Level;

    use crate::errors::ApiError;

    type Reply = Result<String, ApiError>;

    #[derive(Default)]
    struct FakeInner {
        calls: parking_lot::Mutex<Vec<String>>,
        gates: parking_lot::Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    }

    #[derive(Clone, Default)]
    struct FakeSource {
        inner: Arc<FakeInner>,
    }

    impl FakeSource {
        fn gate(&self) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.inner.gates.lock().push_back(rx);
            tx
        }

        fn calls(&self) -> Vec<String> {
            self.inner.calls.lock().clone()
        }

        async fn wait_for_calls(&self, n: usize) {
            while self.inner.calls.lock().len() < n {
                tokio::task::yield_now().await;
            }
        }
    }

    #[async_trait]
    impl EntitySource for FakeSource {
        type Id = ProjectId;
        type Entity = String;

        async fn fetch_one(&self, id: &ProjectId) -> Reply {
            self.inner.calls.lock().push(id.to_string());
            let gate = self.inner.gates.lock().pop_front();
            match gate {
                Some(rx) => rx.await.unwrap_or_else(|_| Ok(String::new())),
                None => Ok(format!("project {id}")),
            }
        }
    }

    #[tokio::test]
    async fn load_fetches_entity() {
        let source = FakeSource::default();
        let fetcher = EntityFetcher::new(source.clone());

        assert_eq!(fetcher.load("p1".into()).await, FetchOutcome::Applied);
        let snap = fetcher.snapshot();
        assert_eq!(snap.entity.as_deref(), Some("project p1"));
        assert!(!snap.loading);
        assert_eq!(snap.phase, FetchPhase::Success);
        assert_eq!(source.calls(), vec!["p1"]);
    }

    #[tokio::test]
    async fn abandoned_load_can_be_refreshed() {
        let source = FakeSource::default();
        let fetcher = EntityFetcher::new(source.clone());
        let _gate = source.gate();

        let abandoned = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            fetcher.load("p1".into()),
        )
        .await;
        assert!(abandoned.is_err());
        assert_eq!(fetcher.snapshot(), EntitySnapshot::default());

        assert_eq!(fetcher.refresh().await, FetchOutcome::Applied);
        assert_eq!(fetcher.snapshot().entity.as_deref(), Some("project p1"));
        assert_eq!(source.calls(), vec!["p1", "p1"]);
    }

    #[tokio::test]
    async fn empty_id_skips_fetch() {
        let source = FakeSource::default();
        let fetcher = EntityFetcher::new(source.clone());
        let _ = fetcher.load("p1".into()).await;

        assert_eq!(fetcher.load(ProjectId::default()).await, FetchOutcome::Skipped);
        assert_eq!(fetcher.snapshot(), EntitySnapshot::default());
        assert_eq!(source.calls().len(), 1);
        assert_eq!(fetcher.refresh().await, FetchOutcome::Skipped);
    }

    #[tokio::test]
    async fn error_resets_entity() {
        let (logs, _guard) = capture_logs();
        let source = FakeSource::default();
        let fetcher = EntityFetcher::new(source.clone());
        let _ = fetcher.load("p1".into()).await;

        source
            .gate()
            .send(Err(ApiError::Status {
                status: 404,
                message: "Project not found".into(),
            }))
            .unwrap();
        assert_eq!(fetcher.refresh().await, FetchOutcome::Failed);

        let snap = fetcher.snapshot();
        assert!(snap.entity.is_none());
        assert!(!snap.loading);
        assert_matches::assert_matches!(snap.phase, FetchPhase::Error(ref m) if m.contains("404"));
        assert!(logs.has_event(Level::ERROR, "failed to fetch entity"));
    }

    #[tokio::test]
    async fn switching_ids_discards_older_response() {
        let source = FakeSource::default();
        let fetcher = Arc::new(EntityFetcher::new(source.clone()));
        let slow = source.gate();
        let fast = source.gate();

        let first = tokio::spawn({
            let fetcher = fetcher.clone();
            async move { fetcher.load("p1".into()).await }
        });
        source.wait_for_calls(1).await;
        let second = tokio::spawn({
            let fetcher = fetcher.clone();
            async move { fetcher.load("p2".into()).await }
        });
        source.wait_for_calls(2).await;

        fast.send(Ok("two".into())).unwrap();
        assert_eq!(second.await.unwrap(), FetchOutcome::Applied);
        slow.send(Ok("one".into())).unwrap();
        assert_eq!(first.await.unwrap(), FetchOutcome::Stale);

        assert_eq!(fetcher.snapshot().entity.as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn refresh_while_loading_is_skipped() {
        let source = FakeSource::default();
        let fetcher = Arc::new(EntityFetcher::new(source.clone()));
        let gate = source.gate();

        let load = tokio::spawn({
            let fetcher = fetcher.clone();
            async move { fetcher.load("p1".into()).await }
        });
        source.wait_for_calls(1).await;
        assert!(fetcher.snapshot().loading);
        assert_eq!(fetcher.refresh().await, FetchOutcome::Skipped);
        assert_eq!(fetcher.load("p1".into()).await, FetchOutcome::Skipped);

        gate.send(Ok("one".into())).unwrap();
        assert_eq!(load.await.unwrap(), FetchOutcome::Applied);
        assert_eq!(source.calls().len(), 1);
    }
}
