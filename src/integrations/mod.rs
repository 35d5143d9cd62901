// src/integrations/mod.rs
//
// External Integrations Module
//
// The remote library server is the only external system this client talks to.

pub mod library_api;

pub use library_api::{BookApi, Envelope, LibraryApiClient};
