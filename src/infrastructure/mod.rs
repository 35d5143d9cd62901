// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Contains implementation details that support the client
// but are not part of the domain itself.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior
// - Infrastructure is replaceable

pub mod config;
pub mod logging;

pub use config::{normalize_base_url, ApiConfig};
pub use logging::init_logging;
