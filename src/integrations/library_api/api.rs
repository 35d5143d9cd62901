// src/integrations/library_api/api.rs
//
// Transport seam between the collection store and the network.
//
// RULES:
// - One method per REST call, no retries
// - Every returned Book has already passed `check_book`
// - Failures are always a `TransportError`

use async_trait::async_trait;

use crate::domain::{Book, BookInput, BookQuery};
use crate::error::TransportError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookApi: Send + Sync {
    /// `GET /books` with optional filter and ordering
    async fn list_books(&self, query: &BookQuery) -> Result<Vec<Book>, TransportError>;

    /// `GET /books/{id}`. A missing record is `TransportError::NotFound`.
    async fn get_book(&self, id: u64) -> Result<Book, TransportError>;

    /// `POST /books`
    async fn create_book(&self, input: &BookInput) -> Result<Book, TransportError>;

    /// `PUT /books/{id}`
    async fn update_book(&self, id: u64, input: &BookInput) -> Result<Book, TransportError>;

    /// `DELETE /books/{id}`
    async fn delete_book(&self, id: u64) -> Result<(), TransportError>;

    /// `GET /health`. Never fails; an unreachable server is `false`.
    async fn health_check(&self) -> bool;
}
