// src/integrations/library_api/envelope.rs
//
// Decoding of the `{success, message, data, error}` wrapper every endpoint
// returns.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;

use crate::domain::{check_book, Book};
use crate::error::{ApiOperation, TransportError};

/// Uniform response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Loose shape used to dig an error message out of a failed response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Turns a raw HTTP response into an envelope, or the matching
/// `TransportError` when the status or the envelope reports failure.
pub fn decode_envelope<T>(
    operation: ApiOperation,
    status: u16,
    body: &[u8],
) -> Result<Envelope<T>, TransportError>
where
    T: DeserializeOwned,
{
    if !(200..300).contains(&status) {
        let message = server_error_message(body)
            .unwrap_or_else(|| operation.fallback_message().to_string());

        if status == 404 && operation == ApiOperation::GetBook {
            return Err(TransportError::NotFound { operation, message });
        }
        return Err(TransportError::Rejected {
            operation,
            status,
            message,
        });
    }

    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|e| TransportError::Malformed {
            operation,
            details: e.to_string(),
        })?;

    if !envelope.success {
        let message = envelope
            .error
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| operation.fallback_message().to_string());
        return Err(TransportError::Rejected {
            operation,
            status,
            message,
        });
    }

    Ok(envelope)
}

fn server_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
}

/// Unwraps a single book and checks it may be stored
pub fn single_book(
    operation: ApiOperation,
    envelope: Envelope<Book>,
) -> Result<Book, TransportError> {
    let book = envelope.data.ok_or_else(|| TransportError::Malformed {
        operation,
        details: "response envelope has no data".to_string(),
    })?;
    confirm(operation, book)
}

/// Unwraps a list of books. An absent `data` field is an empty collection.
pub fn book_list(
    operation: ApiOperation,
    envelope: Envelope<Vec<Book>>,
) -> Result<Vec<Book>, TransportError> {
    let books = envelope.data.unwrap_or_default();

    let mut seen = HashSet::with_capacity(books.len());
    for book in &books {
        if !seen.insert(book.id) {
            return Err(TransportError::Malformed {
                operation,
                details: format!("duplicate book id {}", book.id),
            });
        }
    }

    books
        .into_iter()
        .map(|book| confirm(operation, book))
        .collect()
}

fn confirm(operation: ApiOperation, book: Book) -> Result<Book, TransportError> {
    check_book(&book).map_err(|e| TransportError::Malformed {
        operation,
        details: e.to_string(),
    })?;
    Ok(book)
}
