// src/services/collection_store.rs
//
// Collection Store - the single owner of the client's library state
//
// CRITICAL RULES:
// - State changes only after the network call resolves (no optimistic updates)
// - Each transition swaps in a whole new snapshot under a short lock
// - The lock is never held across an await
// - Drafts are validated before anything reaches the network
// - Concurrent calls are not de-duplicated: the last response to resolve wins
// - Every snapshot carries a generation; listeners never go backwards

use log::{info, warn};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::collection_state::{CollectionState, StoreAction};
use crate::domain::{Book, BookDraft, BookQuery};
use crate::error::{AppError, AppResult, TransportError};
use crate::events::{EventBus, HealthChecked, StateChanged};
use crate::integrations::BookApi;

/// How a transition affects the count of outstanding requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flight {
    Start,
    Finish,
    Unchanged,
}

struct StoreInner {
    snapshot: Arc<CollectionState>,
    generation: u64,
    in_flight: usize,
    last_query: BookQuery,
    /// Typed cause of `snapshot.error`, when it came from the network
    last_failure: Option<TransportError>,
}

pub struct CollectionStore {
    api: Arc<dyn BookApi>,
    event_bus: Arc<EventBus>,
    inner: Mutex<StoreInner>,
}

impl CollectionStore {
    pub fn new(api: Arc<dyn BookApi>, event_bus: Arc<EventBus>) -> Self {
        Self {
            api,
            event_bus,
            inner: Mutex::new(StoreInner {
                snapshot: Arc::new(CollectionState::default()),
                generation: 0,
                in_flight: 0,
                last_query: BookQuery::default(),
                last_failure: None,
            }),
        }
    }

    /// Current snapshot. Never changes after it is returned.
    pub fn snapshot(&self) -> Arc<CollectionState> {
        Arc::clone(&self.lock().snapshot)
    }

    /// Calls `listener` with new snapshots in transition order. A snapshot
    /// superseded before it could be delivered is skipped, so the last call
    /// always sees the newest state. Calls never overlap.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&CollectionState) + Send + Sync + 'static,
    {
        let relay = SnapshotRelay::new(listener);
        self.event_bus
            .subscribe::<StateChanged, _>(move |event| relay.offer(event.generation, &event.snapshot));
    }

    /// Why the current `error` was set, if a request failed
    pub fn last_failure(&self) -> Option<TransportError> {
        self.lock().last_failure.clone()
    }

    /// Query used by the most recent `fetch_all`
    pub fn last_query(&self) -> BookQuery {
        self.lock().last_query.clone()
    }

    // ========================================================================
    // FETCHING (errors are stored, not returned)
    // ========================================================================

    /// Replaces `books` with the server's collection for `query`
    pub async fn fetch_all(&self, query: BookQuery) -> Arc<CollectionState> {
        self.lock().last_query = query.clone();
        self.apply(StoreAction::FetchStarted, Flight::Start);

        match self.api.list_books(&query).await {
            Ok(books) => {
                info!("Loaded {} books", books.len());
                self.apply(StoreAction::BooksLoaded(books), Flight::Finish)
            }
            Err(err) => self.fail(&err),
        }
    }

    /// Retry action: repeats the last `fetch_all` with the same query
    pub async fn refetch(&self) -> Arc<CollectionState> {
        let query = self.last_query();
        self.fetch_all(query).await
    }

    /// Loads one book into `selected`
    pub async fn fetch_one(&self, id: u64) -> Arc<CollectionState> {
        self.apply(StoreAction::FetchStarted, Flight::Start);

        match self.api.get_book(id).await {
            Ok(book) => self.apply(StoreAction::BookSelected(book), Flight::Finish),
            Err(err) => self.fail(&err),
        }
    }

    // ========================================================================
    // MUTATIONS (errors are stored AND returned)
    // ========================================================================

    /// Validates `draft`, creates it on the server and puts the confirmed
    /// book first in the list.
    pub async fn create(&self, draft: &BookDraft) -> AppResult<Book> {
        let input = draft.parse().map_err(AppError::Validation)?;
        self.apply(StoreAction::FetchStarted, Flight::Start);

        match self.api.create_book(&input).await {
            Ok(book) => {
                info!("Created book {} '{}'", book.id, book.title);
                self.apply(StoreAction::BookAdded(book.clone()), Flight::Finish);
                Ok(book)
            }
            Err(err) => {
                self.fail(&err);
                Err(err.into())
            }
        }
    }

    /// Validates `draft` and replaces book `id` with the server's version
    pub async fn update(&self, id: u64, draft: &BookDraft) -> AppResult<Book> {
        let input = draft.parse().map_err(AppError::Validation)?;
        self.apply(StoreAction::FetchStarted, Flight::Start);

        match self.api.update_book(id, &input).await {
            Ok(book) => {
                info!("Updated book {}", book.id);
                self.apply(StoreAction::BookUpdated(book.clone()), Flight::Finish);
                Ok(book)
            }
            Err(err) => {
                self.fail(&err);
                Err(err.into())
            }
        }
    }

    /// Deletes book `id`; it leaves the list only once the server confirms
    pub async fn remove(&self, id: u64) -> AppResult<()> {
        self.apply(StoreAction::FetchStarted, Flight::Start);

        match self.api.delete_book(id).await {
            Ok(()) => {
                info!("Removed book {}", id);
                self.apply(StoreAction::BookRemoved(id), Flight::Finish);
                Ok(())
            }
            Err(err) => {
                self.fail(&err);
                Err(err.into())
            }
        }
    }

    // ========================================================================
    // LOCAL ACTIONS
    // ========================================================================

    /// Dismiss action. Does not wait for, or affect, in-flight requests.
    pub fn clear_error(&self) -> Arc<CollectionState> {
        self.apply(StoreAction::ErrorCleared, Flight::Unchanged)
    }

    pub fn clear_selected(&self) -> Arc<CollectionState> {
        self.apply(StoreAction::SelectionCleared, Flight::Unchanged)
    }

    /// Liveness probe; does not touch the collection state
    pub async fn health(&self) -> bool {
        let healthy = self.api.health_check().await;
        self.event_bus.emit(HealthChecked::new(healthy));
        healthy
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn fail(&self, err: &TransportError) -> Arc<CollectionState> {
        warn!("{:?} failed: {}", err.operation(), err);
        self.transition(
            StoreAction::OperationFailed(err.to_string()),
            Flight::Finish,
            Some(err.clone()),
        )
    }

    fn apply(&self, action: StoreAction, flight: Flight) -> Arc<CollectionState> {
        self.transition(action, flight, None)
    }

    fn transition(
        &self,
        action: StoreAction,
        flight: Flight,
        failure: Option<TransportError>,
    ) -> Arc<CollectionState> {
        let (snapshot, generation) = {
            let mut inner = self.lock();
            match flight {
                Flight::Start => inner.in_flight += 1,
                Flight::Finish => inner.in_flight = inner.in_flight.saturating_sub(1),
                Flight::Unchanged => {}
            }
            let next = Arc::new(inner.snapshot.reduce(&action, inner.in_flight));
            if failure.is_some() || next.error.is_none() {
                inner.last_failure = failure;
            }
            inner.generation += 1;
            inner.snapshot = Arc::clone(&next);
            (next, inner.generation)
        };

        // Emitted outside the lock so listeners may call back into the store
        self.event_bus
            .emit(StateChanged::new(action, Arc::clone(&snapshot), generation));
        snapshot
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// SUBSCRIPTION DELIVERY
// ============================================================================

/// Hands snapshots to one listener, newest last and one call at a time.
/// Whoever is already delivering picks up snapshots offered meanwhile,
/// from another thread or from inside the listener itself.
struct SnapshotRelay<F> {
    listener: F,
    slot: Mutex<RelaySlot>,
}

#[derive(Default)]
struct RelaySlot {
    latest: u64,
    pending: Option<Arc<CollectionState>>,
    busy: bool,
}

impl<F> SnapshotRelay<F>
where
    F: Fn(&CollectionState),
{
    fn new(listener: F) -> Self {
        Self {
            listener,
            slot: Mutex::new(RelaySlot::default()),
        }
    }

    fn offer(&self, generation: u64, snapshot: &Arc<CollectionState>) {
        {
            let mut slot = self.lock_slot();
            if generation <= slot.latest {
                return;
            }
            slot.latest = generation;
            slot.pending = Some(Arc::clone(snapshot));
            if slot.busy {
                return;
            }
            slot.busy = true;
        }

        loop {
            let next = {
                let mut slot = self.lock_slot();
                match slot.pending.take() {
                    Some(next) => next,
                    None => {
                        slot.busy = false;
                        return;
                    }
                }
            };

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.listener)(&next)));
            if let Err(payload) = outcome {
                let mut slot = self.lock_slot();
                slot.busy = false;
                slot.pending = None;
                drop(slot);
                panic::resume_unwind(payload);
            }
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, RelaySlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("CollectionStore")
            .field("books", &inner.snapshot.books.len())
            .field("in_flight", &inner.in_flight)
            .finish()
    }
}
