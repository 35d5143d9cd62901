// src/services/mod.rs
//
// Services Module - State Orchestration Layer

pub mod collection_state;
pub mod collection_store;

pub use collection_state::{CollectionState, StoreAction};
pub use collection_store::CollectionStore;
