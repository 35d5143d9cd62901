// src/events/bus/event_bus.rs
//
// Core event bus implementation.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers execute immediately in subscription order
// 2. Deterministic - same events → same result
// 3. Observable - every emission is logged
// 4. Type-safe - events are strongly typed

use log::{debug, error};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased event handler function
/// Takes a reference to Any (downcasted to concrete event type inside)
type EventHandler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Oldest entries are dropped once the log holds this many
pub const EVENT_LOG_CAPACITY: usize = 256;

/// The Event Bus
///
/// Lets the collection store publish its transitions without knowing who
/// listens.
///
/// Key characteristics:
/// - Synchronous execution (no threads)
/// - Handlers execute in subscription order
/// - A panicking handler never breaks the others
/// - Handlers may subscribe or emit from inside a handler
pub struct EventBus {
    /// Map from event TypeId to list of handlers
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,

    /// Most recent emissions, capped at `EVENT_LOG_CAPACITY`
    event_log: Arc<RwLock<Vec<EventLogEntry>>>,
}

/// A logged event for debugging and tracing
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Subscribe to a specific event type
    ///
    /// Handlers are executed in the order they are subscribed.
    ///
    /// Example:
    /// ```ignore
    /// bus.subscribe::<StateChanged, _>(|event| {
    ///     println!("{} books", event.snapshot.books.len());
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();

        let wrapped: EventHandler = Arc::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        handlers.entry(type_id).or_default().push(wrapped);
    }

    /// Emit an event
    ///
    /// This will:
    /// 1. Log the event
    /// 2. Execute all handlers for this event type (in subscription order)
    /// 3. Return once every handler has run
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let type_id = TypeId::of::<E>();

        // Handlers are cloned out so none of them runs under the lock
        let event_handlers: Vec<EventHandler> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
            .unwrap_or_default();

        let log_entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count: event_handlers.len(),
        };

        debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            log_entry.event_type, log_entry.event_id, log_entry.handler_count
        );

        {
            let mut log = self.event_log.write().unwrap_or_else(PoisonError::into_inner);
            if log.len() >= EVENT_LOG_CAPACITY {
                let overflow = log.len() + 1 - EVENT_LOG_CAPACITY;
                log.drain(..overflow);
            }
            log.push(log_entry);
        }

        for (idx, handler) in event_handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&event as &dyn Any);
            }));

            if let Err(e) = result {
                error!(
                    "Handler {} for {} panicked: {:?}",
                    idx,
                    event.event_type(),
                    e
                );
            }
        }
    }

    /// Snapshot of the retained log, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clear the event log
    pub fn clear_event_log(&self) {
        self.event_log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Get the number of subscribers for a specific event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let type_id = TypeId::of::<E>();
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .map(|h| h.len())
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Make EventBus cloneable (shared reference)
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            event_log: Arc::clone(&self.event_log),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("event_types", &self.handlers.read().map(|h| h.len()).unwrap_or(0))
            .finish()
    }
}
