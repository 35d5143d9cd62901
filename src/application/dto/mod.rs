// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Book, ReadingStatus};
use crate::services::CollectionState;

/// Description length shown on a book card
pub const EXCERPT_CHARS: usize = 120;

// ============================================================================
// BOOK DTOs
// ============================================================================

/// Full detail view of one book
#[derive(Debug, Clone, Serialize)]
pub struct BookDto {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub description: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Card view used in listings
#[derive(Debug, Clone, Serialize)]
pub struct BookSummaryDto {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: String,
    pub excerpt: String,
    pub added: String,
}

/// Counters shown above the book grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    pub to_read: usize,
    pub reading: usize,
    pub read: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionDto {
    pub stats: CollectionStats,
    pub books: Vec<BookSummaryDto>,
    pub selected: Option<BookDto>,
    pub loading: bool,
    pub error: Option<String>,
}

// ============================================================================
// FORMATTING HELPERS
// ============================================================================

/// Cuts `text` to `max_chars` characters, appending `...` when shortened
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}

/// e.g. "March 1, 2024, 10:05 AM"
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y, %I:%M %p").to_string()
}

// ============================================================================
// CONVERSION HELPERS (Domain → DTO)
// ============================================================================

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
            description: book.description.clone(),
            status: book.status.to_string(),
            created_at: format_date(&book.created_at),
            updated_at: format_date(&book.updated_at),
        }
    }
}

impl From<&Book> for BookSummaryDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
            status: book.status.to_string(),
            excerpt: truncate_text(&book.description, EXCERPT_CHARS),
            added: format_date(&book.created_at),
        }
    }
}

impl From<&CollectionState> for CollectionStats {
    fn from(state: &CollectionState) -> Self {
        Self {
            total: state.len(),
            to_read: state.count_by_status(ReadingStatus::WantToRead),
            reading: state.count_by_status(ReadingStatus::CurrentlyReading),
            read: state.count_by_status(ReadingStatus::Read),
        }
    }
}

impl From<&CollectionState> for CollectionDto {
    fn from(state: &CollectionState) -> Self {
        Self {
            stats: CollectionStats::from(state),
            books: state.books.iter().map(BookSummaryDto::from).collect(),
            selected: state.selected.as_ref().map(BookDto::from),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}
