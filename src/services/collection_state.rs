// src/services/collection_state.rs
//
// Collection state and its transitions
//
// CRITICAL RULES:
// - A transition never mutates the prior snapshot, it builds a new one
// - Only server-confirmed books ever enter `books` or `selected`
// - `books` stays unique by id

use serde::Serialize;

use crate::domain::{Book, ReadingStatus};

/// One immutable snapshot of the client's view of the library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionState {
    /// Server order
    pub books: Vec<Book>,

    /// Copy of a book, kept in sync with `books` by id
    pub selected: Option<Book>,

    /// True while at least one request is outstanding
    pub loading: bool,

    /// Last failure message, cleared when the next operation starts
    pub error: Option<String>,
}

/// Everything that can happen to the collection state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    FetchStarted,
    BooksLoaded(Vec<Book>),
    BookSelected(Book),
    BookAdded(Book),
    BookUpdated(Book),
    BookRemoved(u64),
    OperationFailed(String),
    ErrorCleared,
    SelectionCleared,
}

impl StoreAction {
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::FetchStarted => "FetchStarted",
            StoreAction::BooksLoaded(_) => "BooksLoaded",
            StoreAction::BookSelected(_) => "BookSelected",
            StoreAction::BookAdded(_) => "BookAdded",
            StoreAction::BookUpdated(_) => "BookUpdated",
            StoreAction::BookRemoved(_) => "BookRemoved",
            StoreAction::OperationFailed(_) => "OperationFailed",
            StoreAction::ErrorCleared => "ErrorCleared",
            StoreAction::SelectionCleared => "SelectionCleared",
        }
    }
}

impl CollectionState {
    pub fn find(&self, id: u64) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Number of listed books in `status`
    pub fn count_by_status(&self, status: ReadingStatus) -> usize {
        self.books.iter().filter(|book| book.status == status).count()
    }

    /// Computes the next snapshot. `in_flight` is the number of requests
    /// still outstanding once this action has been applied.
    pub fn reduce(&self, action: &StoreAction, in_flight: usize) -> CollectionState {
        let mut next = self.clone();
        next.loading = in_flight > 0;

        match action {
            StoreAction::FetchStarted => {
                next.error = None;
            }
            StoreAction::BooksLoaded(books) => {
                next.books = books.clone();
                next.error = None;
            }
            StoreAction::BookSelected(book) => {
                next.selected = Some(book.clone());
                next.error = None;
            }
            StoreAction::BookAdded(book) => {
                let mut books = Vec::with_capacity(self.books.len() + 1);
                books.push(book.clone());
                books.extend(self.books.iter().filter(|b| b.id != book.id).cloned());
                next.books = books;
                next.error = None;
            }
            StoreAction::BookUpdated(book) => {
                next.books = self
                    .books
                    .iter()
                    .map(|b| if b.id == book.id { book.clone() } else { b.clone() })
                    .collect();
                if self.selected.as_ref().is_some_and(|s| s.id == book.id) {
                    next.selected = Some(book.clone());
                }
                next.error = None;
            }
            StoreAction::BookRemoved(id) => {
                next.books = self.books.iter().filter(|b| b.id != *id).cloned().collect();
                if self.selected.as_ref().is_some_and(|s| s.id == *id) {
                    next.selected = None;
                }
                next.error = None;
            }
            StoreAction::OperationFailed(message) => {
                next.error = Some(message.clone());
            }
            StoreAction::ErrorCleared => {
                next.error = None;
            }
            StoreAction::SelectionCleared => {
                next.selected = None;
            }
        }

        next
    }
}
