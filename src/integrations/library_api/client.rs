// src/integrations/library_api/client.rs
//
// Library API Client
//
// ARCHITECTURE:
// - JSON-over-HTTP client for the book endpoints
// - Unwraps the response envelope and checks every returned Book
// - Maps every failure onto a TransportError (NO retries)
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not state
// - Never touches the collection store
// - Applies the configured timeout to every call

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{header, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::api::BookApi;
use super::envelope::{book_list, decode_envelope, single_book, Envelope};
use crate::domain::{Book, BookInput, BookQuery};
use crate::error::{ApiOperation, AppError, AppResult, TransportError};
use crate::infrastructure::ApiConfig;

/// Library API Client
#[derive(Debug, Clone)]
pub struct LibraryApiClient {
    base_url: String,
    http_client: Client,
    timeout: Duration,
}

impl LibraryApiClient {
    /// Create a new client for the configured server
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Creating library API client for {} (timeout {:?})",
            config.base_url, config.timeout
        );

        Ok(Self {
            base_url: config.base_url.clone(),
            http_client,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ========================================================================
    // INTERNAL: Request Execution
    // ========================================================================

    /// Send a request and decode its envelope
    async fn execute<T>(
        &self,
        operation: ApiOperation,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, TransportError>
    where
        T: DeserializeOwned,
    {
        let request = request
            .header(header::ACCEPT, "application/json")
            .build()
            .map_err(|e| self.classify(operation, e))?;

        debug!("API request: {} {}", request.method(), request.url());

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| self.classify(operation, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify(operation, e))?;

        decode_envelope(operation, status, &body).inspect_err(|err| log_failure(err))
    }

    fn classify(&self, operation: ApiOperation, err: reqwest::Error) -> TransportError {
        let transport = if err.is_timeout() {
            TransportError::Timeout {
                operation,
                after: self.timeout,
            }
        } else {
            TransportError::Network {
                operation,
                details: err.to_string(),
            }
        };
        log_failure(&transport);
        transport
    }
}

fn log_failure(err: &TransportError) {
    match err.details() {
        Some(details) => warn!("API {:?} failed: {} ({})", err.operation(), err, details),
        None => warn!("API {:?} failed: {}", err.operation(), err),
    }
}

#[async_trait]
impl BookApi for LibraryApiClient {
    async fn list_books(&self, query: &BookQuery) -> Result<Vec<Book>, TransportError> {
        let operation = ApiOperation::ListBooks;
        let request = self
            .http_client
            .get(self.url("books"))
            .query(&query.to_query_pairs());

        let envelope = self.execute::<Vec<Book>>(operation, request).await?;
        book_list(operation, envelope).inspect_err(log_failure)
    }

    async fn get_book(&self, id: u64) -> Result<Book, TransportError> {
        let operation = ApiOperation::GetBook;
        let request = self.http_client.get(self.url(&format!("books/{}", id)));

        let envelope = self.execute::<Book>(operation, request).await?;
        single_book(operation, envelope).inspect_err(log_failure)
    }

    async fn create_book(&self, input: &BookInput) -> Result<Book, TransportError> {
        let operation = ApiOperation::CreateBook;
        let request = self.http_client.post(self.url("books")).json(input);

        let envelope = self.execute::<Book>(operation, request).await?;
        single_book(operation, envelope).inspect_err(log_failure)
    }

    async fn update_book(&self, id: u64, input: &BookInput) -> Result<Book, TransportError> {
        let operation = ApiOperation::UpdateBook;
        let request = self
            .http_client
            .put(self.url(&format!("books/{}", id)))
            .json(input);

        let envelope = self.execute::<Book>(operation, request).await?;
        let book = single_book(operation, envelope).inspect_err(log_failure)?;
        if book.id != id {
            let err = TransportError::Malformed {
                operation,
                details: format!("asked to update book {} but server returned {}", id, book.id),
            };
            log_failure(&err);
            return Err(err);
        }
        Ok(book)
    }

    async fn delete_book(&self, id: u64) -> Result<(), TransportError> {
        let request = self.http_client.delete(self.url(&format!("books/{}", id)));

        // The delete payload (if any) carries nothing the client needs
        self.execute::<serde_json::Value>(ApiOperation::DeleteBook, request)
            .await
            .map(|_| ())
    }

    async fn health_check(&self) -> bool {
        let request = self.http_client.get(self.url("health"));
        match self
            .execute::<serde_json::Value>(ApiOperation::HealthCheck, request)
            .await
        {
            Ok(_) => true,
            Err(_) => false,
        }
    }
}
