// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod book;
pub mod query;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Book Domain
pub use book::{
    check_book, max_publication_year, validate_draft, validate_draft_for_year, Book, BookDraft,
    BookField, BookInput, FieldErrors, ReadingStatus,
};

// Collection queries
pub use query::{BookFilter, BookOrder, BookQuery, OrderDirection, OrderField};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of the rules a stored book must satisfy
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unknown value '{value}' for {field}")]
    UnknownValue { field: &'static str, value: String },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
