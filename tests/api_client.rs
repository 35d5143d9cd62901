// tests/api_client.rs
//
// LibraryApiClient against a local HTTP server

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde_json::json;

use bookshelf::{
    ApiOperation, BookApi, BookDraft, BookQuery, OrderDirection, OrderField, ReadingStatus,
    TransportError,
};
use common::{client_for, client_with_timeout, failure, ok, serve, FakeLibrary};

fn input(title: &str, author: &str, year: &str) -> bookshelf::BookInput {
    BookDraft::new(title, author, year, "", "reading")
        .parse()
        .expect("valid draft")
}

#[tokio::test]
async fn test_list_sends_filter_and_order() -> anyhow::Result<()> {
    let library = FakeLibrary::new();
    library.seed("Animal Farm", "George Orwell", 1945);
    library.seed("1984", "George Orwell", 1949);
    library.seed("Dune", "Frank Herbert", 1965);
    let client = client_for(&serve(library.router()).await);

    let query = BookQuery::all()
        .with_author("orwell")
        .ordered_by(OrderField::Year, OrderDirection::Desc);
    let books = client.list_books(&query).await?;

    let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["1984", "Animal Farm"]);

    let sent = library.queries().pop().expect("one list request");
    assert_eq!(sent.get("author").map(String::as_str), Some("orwell"));
    assert_eq!(sent.get("orderBy").map(String::as_str), Some("year"));
    assert_eq!(sent.get("orderDir").map(String::as_str), Some("desc"));
    assert!(!sent.contains_key("title"));
    Ok(())
}

#[tokio::test]
async fn test_list_without_query_sends_no_params() -> anyhow::Result<()> {
    let library = FakeLibrary::new();
    let client = client_for(&serve(library.router()).await);

    let books = client.list_books(&BookQuery::all()).await?;

    assert!(books.is_empty());
    assert!(library.queries()[0].is_empty());
    Ok(())
}

#[tokio::test]
async fn test_create_then_get_round_trip() -> anyhow::Result<()> {
    let library = FakeLibrary::new();
    let client = client_for(&serve(library.router()).await);

    let created = client
        .create_book(&input("The Hobbit", "Tolkien", "1937"))
        .await?;
    assert_eq!(created.title, "The Hobbit");
    assert_eq!(created.status, ReadingStatus::CurrentlyReading);

    let fetched = client.get_book(created.id).await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn test_update_returns_server_version() -> anyhow::Result<()> {
    let library = FakeLibrary::new();
    let id = library.seed("Dune", "Herbert", 1965);
    let client = client_for(&serve(library.router()).await);

    let updated = client
        .update_book(id, &input("Dune Messiah", "Frank Herbert", "1969"))
        .await?;

    assert_eq!(updated.id, id);
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.year, 1969);
    Ok(())
}

#[tokio::test]
async fn test_get_missing_book_is_not_found() {
    let library = FakeLibrary::new();
    let client = client_for(&serve(library.router()).await);

    let err = client.get_book(42).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Book not found");
}

#[tokio::test]
async fn test_delete_missing_book_keeps_server_message() {
    let library = FakeLibrary::new();
    let client = client_for(&serve(library.router()).await);

    let err = client.delete_book(7).await.unwrap_err();

    assert_eq!(
        err,
        TransportError::Rejected {
            operation: ApiOperation::DeleteBook,
            status: 404,
            message: "not found".to_string(),
        }
    );
}

#[tokio::test]
async fn test_delete_existing_book() -> anyhow::Result<()> {
    let library = FakeLibrary::new();
    let id = library.seed("Emma", "Austen", 1815);
    let client = client_for(&serve(library.router()).await);

    client.delete_book(id).await?;

    assert_eq!(library.len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_error_without_message_uses_fallback() {
    let router = Router::new().route(
        "/api/books",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = client_for(&serve(router).await);

    let err = client.list_books(&BookQuery::all()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Failed to fetch books");
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_rejected() {
    let router = Router::new().route(
        "/api/books",
        get(|| async {
            (
                StatusCode::OK,
                axum::Json(json!({ "success": false, "message": "", "error": "database locked" })),
            )
        }),
    );
    let client = client_for(&serve(router).await);

    let err = client.list_books(&BookQuery::all()).await.unwrap_err();

    assert_eq!(err.to_string(), "database locked");
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let router = Router::new().route(
        "/api/books",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            ok("late", json!([]))
        }),
    );
    let base_url = serve(router).await;
    let client = client_with_timeout(&base_url, Duration::from_millis(200));

    let err = client.list_books(&BookQuery::all()).await.unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.operation(), ApiOperation::ListBooks);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = client_for(&format!("http://{}/api", addr));

    let err = client.get_book(1).await.unwrap_err();

    assert!(matches!(err, TransportError::Network { .. }));
    assert_eq!(err.to_string(), "Failed to fetch book");
    assert!(!client.health_check().await);
}

#[tokio::test]
async fn test_invalid_book_from_server_is_malformed() {
    let router = Router::new().route(
        "/api/books/{id}",
        get(|| async {
            ok(
                "Book retrieved",
                json!({
                    "id": 1,
                    "title": "",
                    "author": "Nobody",
                    "year": 2000,
                    "status": "read",
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-01-01T00:00:00Z",
                }),
            )
        }),
    );
    let client = client_for(&serve(router).await);

    let err = client.get_book(1).await.unwrap_err();

    assert!(matches!(err, TransportError::Malformed { .. }));
}

#[tokio::test]
async fn test_unknown_status_is_malformed() {
    let router = Router::new().route(
        "/api/books",
        get(|| async {
            ok(
                "Books retrieved",
                json!([{
                    "id": 1,
                    "title": "Dune",
                    "author": "Herbert",
                    "year": 1965,
                    "status": "abandoned",
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-01-01T00:00:00Z",
                }]),
            )
        }),
    );
    let client = client_for(&serve(router).await);

    let err = client.list_books(&BookQuery::all()).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch books: malformed server response");
}

#[tokio::test]
async fn test_health_check() {
    let library = FakeLibrary::new();
    let client = client_for(&serve(library.router()).await);
    assert!(client.health_check().await);

    let down = Router::new().route(
        "/api/health",
        get(|| async { failure(StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let client = client_for(&serve(down).await);
    assert!(!client.health_check().await);
}
