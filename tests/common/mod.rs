// tests/common/mod.rs
//
// In-process stand-in for the library server, served by axum on a random
// local port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use bookshelf::{ApiConfig, LibraryApiClient};

pub type Reply = (StatusCode, Json<Value>);

pub fn ok(message: &str, data: Value) -> Reply {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": message, "data": data })),
    )
}

pub fn failure(status: StatusCode, error: &str) -> Reply {
    (
        status,
        Json(json!({ "success": false, "message": "Request failed", "error": error })),
    )
}

/// Serve `router` on 127.0.0.1 and return its `/api` base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test router");
    });
    format!("http://{}/api", addr)
}

pub fn client_for(base_url: &str) -> LibraryApiClient {
    client_with_timeout(base_url, Duration::from_secs(5))
}

pub fn client_with_timeout(base_url: &str, timeout: Duration) -> LibraryApiClient {
    let config = ApiConfig::new(base_url, timeout).expect("valid test config");
    LibraryApiClient::new(&config).expect("client")
}

// ============================================================================
// FAKE LIBRARY
// ============================================================================

#[derive(Default)]
pub struct FakeLibrary {
    books: Mutex<Vec<Value>>,
    next_id: Mutex<u64>,
    queries: Mutex<Vec<HashMap<String, String>>>,
}

impl FakeLibrary {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: Mutex::new(1),
            ..Self::default()
        })
    }

    /// Adds a stored book directly, bypassing the HTTP surface
    pub fn seed(&self, title: &str, author: &str, year: i32) -> u64 {
        let id = self.allocate_id();
        let now = Utc::now().to_rfc3339();
        self.books.lock().unwrap().push(json!({
            "id": id,
            "title": title,
            "author": author,
            "year": year,
            "description": "",
            "status": "to-read",
            "created_at": now,
            "updated_at": now,
        }));
        id
    }

    /// Query strings received by `GET /books`, oldest first
    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.books.lock().unwrap().len()
    }

    pub fn router(self: &Arc<Self>) -> Router {
        Router::new()
            .route("/api/books", get(list_books).post(create_book))
            .route(
                "/api/books/{id}",
                get(get_book).put(update_book).delete(delete_book),
            )
            .route("/api/health", get(|| async { ok("OK", json!({ "status": "ok" })) }))
            .with_state(Arc::clone(self))
    }

    fn allocate_id(&self) -> u64 {
        let mut next = self.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    }
}

fn field<'a>(book: &'a Value, key: &str) -> &'a str {
    book.get(key).and_then(Value::as_str).unwrap_or_default()
}

async fn list_books(
    State(library): State<Arc<FakeLibrary>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    library.queries.lock().unwrap().push(params.clone());

    let mut books: Vec<Value> = library
        .books
        .lock()
        .unwrap()
        .iter()
        .filter(|book| {
            ["title", "author"].iter().all(|key| match params.get(*key) {
                Some(needle) => field(book, key)
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                None => true,
            })
        })
        .cloned()
        .collect();

    if let Some(order_by) = params.get("orderBy") {
        let key = order_by.clone();
        books.sort_by(|a, b| match key.as_str() {
            "year" => a["year"].as_i64().cmp(&b["year"].as_i64()),
            other => field(a, other).cmp(field(b, other)),
        });
        if params.get("orderDir").map(String::as_str) == Some("desc") {
            books.reverse();
        }
    }

    ok("Books retrieved", Value::Array(books))
}

async fn get_book(State(library): State<Arc<FakeLibrary>>, Path(id): Path<u64>) -> Reply {
    let books = library.books.lock().unwrap();
    match books.iter().find(|book| book["id"] == json!(id)) {
        Some(book) => ok("Book retrieved", book.clone()),
        None => failure(StatusCode::NOT_FOUND, "Book not found"),
    }
}

async fn create_book(State(library): State<Arc<FakeLibrary>>, Json(input): Json<Value>) -> Reply {
    let id = library.allocate_id();
    let now = Utc::now().to_rfc3339();
    let mut book = input;
    book["id"] = json!(id);
    book["created_at"] = json!(now);
    book["updated_at"] = json!(now);

    library.books.lock().unwrap().push(book.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Book created", "data": book })),
    )
}

async fn update_book(
    State(library): State<Arc<FakeLibrary>>,
    Path(id): Path<u64>,
    Json(input): Json<Value>,
) -> Reply {
    let mut books = library.books.lock().unwrap();
    let Some(book) = books.iter_mut().find(|book| book["id"] == json!(id)) else {
        return failure(StatusCode::NOT_FOUND, "Book not found");
    };

    for key in ["title", "author", "year", "description", "status"] {
        if let Some(value) = input.get(key) {
            book[key] = value.clone();
        }
    }
    book["updated_at"] = json!(Utc::now().to_rfc3339());
    ok("Book updated", book.clone())
}

async fn delete_book(State(library): State<Arc<FakeLibrary>>, Path(id): Path<u64>) -> Reply {
    let mut books = library.books.lock().unwrap();
    let before = books.len();
    books.retain(|book| book["id"] != json!(id));
    if books.len() == before {
        return failure(StatusCode::NOT_FOUND, "not found");
    }
    ok("Book deleted", json!({ "id": id }))
}
