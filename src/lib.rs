// src/lib.rs
// Bookshelf - Client for a personal book library service
//
// Architecture:
// - Domain-centric: Book records, drafts and validation live in the domain
// - Event-driven: Every store transition is published on the event bus
// - Explicit: No implicit behavior, no magic
// - Server-owned: The remote library service is the source of truth
// - Application Layer: Terminal boundary

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    check_book,
    max_publication_year,
    validate_draft,
    validate_draft_for_year,
    // Book
    Book,
    BookDraft,
    BookField,
    BookInput,
    FieldErrors,
    ReadingStatus,
    // Query
    BookFilter,
    BookOrder,
    BookQuery,
    OrderDirection,
    OrderField,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{ApiOperation, AppError, AppResult, TransportError};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{create_event_bus, DomainEvent, EventBus, EventLogEntry, HealthChecked, StateChanged};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::{init_logging, ApiConfig};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{CollectionState, CollectionStore, StoreAction};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse};

// Re-export application submodules
pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{BookApi, Envelope, LibraryApiClient};
