// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Provides the boundary between the terminal and the collection store
// - Translates between command arguments, drafts and DTOs
// - Maps every failure into an ErrorResponse

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, RecoveryAction};
pub use state::AppState;
