// src/events/types.rs
//
// All events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::services::{CollectionState, StoreAction};

/// Trait that all events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// COLLECTION STORE EVENTS
// ============================================================================

/// Emitted after every store transition with the snapshot it produced
#[derive(Debug, Clone)]
pub struct StateChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub action: StoreAction,
    pub snapshot: Arc<CollectionState>,
    /// Position of this transition in the store's history, starting at 1
    pub generation: u64,
}

impl StateChanged {
    pub fn new(action: StoreAction, snapshot: Arc<CollectionState>, generation: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            action,
            snapshot,
            generation,
        }
    }
}

impl DomainEvent for StateChanged {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "StateChanged"
    }
}

/// Emitted when a liveness probe completes
#[derive(Debug, Clone)]
pub struct HealthChecked {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub healthy: bool,
}

impl HealthChecked {
    pub fn new(healthy: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            healthy,
        }
    }
}

impl DomainEvent for HealthChecked {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "HealthChecked"
    }
}
