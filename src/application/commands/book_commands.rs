// src/application/commands/book_commands.rs
//
// Book Command Handlers
//
// RULES:
// - Accept parsed arguments
// - Call the collection store
// - Return DTOs

use serde::Serialize;

use super::{BookArgs, Command, EditArgs, ListArgs};
use crate::application::dto::{BookDto, CollectionDto};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::{BookDraft, BookQuery, OrderDirection};
use crate::services::{CollectionState, CollectionStore};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Collection(CollectionDto),
    Book(BookDto),
    Removed { removed: u64 },
    Health { healthy: bool },
}

/// Run one parsed command against the store
pub async fn run_command(state: &AppState, command: Command) -> Result<CommandOutput, ErrorResponse> {
    match command {
        Command::List(args) => list_books(state, args).await,
        Command::Show { id } => show_book(state, id).await,
        Command::Add(args) => add_book(state, args).await,
        Command::Edit { id, changes } => edit_book(state, id, changes).await,
        Command::Remove { id } => remove_book(state, id).await,
        Command::Health => Ok(check_health(state).await),
    }
}

/// List books with optional filter and ordering
pub async fn list_books(state: &AppState, args: ListArgs) -> Result<CommandOutput, ErrorResponse> {
    let mut query = BookQuery::all();
    query.filter.title = args.title;
    query.filter.author = args.author;
    if let Some(field) = args.order_by {
        query = query.ordered_by(field, args.order_dir.unwrap_or(OrderDirection::Asc));
    }

    let snapshot = state.store.fetch_all(query).await;
    fetch_result(&state.store, &snapshot)?;
    Ok(CommandOutput::Collection(CollectionDto::from(snapshot.as_ref())))
}

/// Get a single book by ID
pub async fn show_book(state: &AppState, id: u64) -> Result<CommandOutput, ErrorResponse> {
    let snapshot = state.store.fetch_one(id).await;
    fetch_result(&state.store, &snapshot)?;
    selected_book(&snapshot, id)
}

/// Create a new book
pub async fn add_book(state: &AppState, args: BookArgs) -> Result<CommandOutput, ErrorResponse> {
    let draft = BookDraft::new(args.title, args.author, args.year, args.description, args.status);

    let book = state
        .store
        .create(&draft)
        .await
        .map_err(|e| ErrorResponse::from_app_error(&e))?;
    Ok(CommandOutput::Book(BookDto::from(&book)))
}

/// Update a book; unspecified fields keep the server's current value
pub async fn edit_book(
    state: &AppState,
    id: u64,
    changes: EditArgs,
) -> Result<CommandOutput, ErrorResponse> {
    let snapshot = state.store.fetch_one(id).await;
    fetch_result(&state.store, &snapshot)?;
    let current = snapshot
        .selected
        .as_ref()
        .filter(|book| book.id == id)
        .ok_or_else(|| ErrorResponse::not_found("Book"))?;

    let mut draft = BookDraft::from(current);
    if let Some(title) = changes.title {
        draft.title = title;
    }
    if let Some(author) = changes.author {
        draft.author = author;
    }
    if let Some(year) = changes.year {
        draft.year = year;
    }
    if let Some(description) = changes.description {
        draft.description = description;
    }
    if let Some(status) = changes.status {
        draft.status = status;
    }

    let book = state
        .store
        .update(id, &draft)
        .await
        .map_err(|e| ErrorResponse::from_app_error(&e))?;
    Ok(CommandOutput::Book(BookDto::from(&book)))
}

/// Delete a book
pub async fn remove_book(state: &AppState, id: u64) -> Result<CommandOutput, ErrorResponse> {
    state
        .store
        .remove(id)
        .await
        .map_err(|e| ErrorResponse::from_app_error(&e))?;
    Ok(CommandOutput::Removed { removed: id })
}

pub async fn check_health(state: &AppState) -> CommandOutput {
    CommandOutput::Health {
        healthy: state.store.health().await,
    }
}

/// Turns a stored fetch error back into a typed response
fn fetch_result(store: &CollectionStore, snapshot: &CollectionState) -> Result<(), ErrorResponse> {
    let Some(message) = &snapshot.error else {
        return Ok(());
    };
    Err(match store.last_failure() {
        Some(failure) => ErrorResponse::from_transport(&failure),
        None => ErrorResponse::fetch_failed(message),
    })
}

fn selected_book(snapshot: &CollectionState, id: u64) -> Result<CommandOutput, ErrorResponse> {
    snapshot
        .selected
        .as_ref()
        .filter(|book| book.id == id)
        .map(|book| CommandOutput::Book(BookDto::from(book)))
        .ok_or_else(|| ErrorResponse::not_found("Book"))
}
