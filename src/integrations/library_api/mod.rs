// src/integrations/library_api/mod.rs
//
// REST adapter for the book library server

pub mod api;
pub mod client;
pub mod envelope;

pub use api::BookApi;
#[cfg(test)]
pub use api::MockBookApi;
pub use client::LibraryApiClient;
pub use envelope::{decode_envelope, Envelope};
