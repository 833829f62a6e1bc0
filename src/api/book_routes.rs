//! Book HTTP Routes
//!
//! Handlers orchestrating the request pipeline:
//! Received → Decoded → Validated → Persisted → Responded, with an error
//! exit from any state. Every failure is terminal and reported once; there
//! are no retries.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::correlation::CorrelationContext;
use crate::errors::ApiError;
use crate::model::{validate, Book, BookDraft};
use crate::observability::{Logger, Severity};

use super::envelope::{ErrorReply, Reply};
use super::server::AppState;

/// Book routes under /books
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/books", get(list_books).post(create_book))
}

// ==================
// Request/Response Types
// ==================

/// Decoded request body for POST /books.
///
/// Fields are `Option` so that an absent parameter is reported as its own
/// taxonomy kind rather than a generic decode failure; a body that is not
/// JSON of this shape at all is the malformed-body error.
#[derive(Debug, Deserialize)]
struct BookPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    price: Option<i64>,
}

/// A book as it appears in response payloads
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub created_at: String,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            price: book.price,
            created_at: book.created_at_wire(),
        }
    }
}

/// Payload for GET /books
#[derive(Debug, Clone, Serialize)]
pub struct BookListPayload {
    pub books: Vec<BookView>,
}

// ==================
// Handlers
// ==================

/// POST /books — decode, validate and persist one book
async fn create_book(
    State(state): State<Arc<AppState>>,
    ctx: CorrelationContext,
    body: Bytes,
) -> Result<Reply, ErrorReply> {
    // Received → Decoded
    let payload: BookPayload = serde_json::from_slice(&body).map_err(|err| {
        Logger::request(
            Severity::Error,
            &ctx,
            "decode_failed",
            &[("detail", &err.to_string())],
        );
        ErrorReply::new(ctx.clone(), ApiError::MalformedBody)
    })?;

    let name = payload.name.ok_or_else(|| {
        Logger::request(Severity::Error, &ctx, "param_missing", &[("param", "name")]);
        ErrorReply::new(ctx.clone(), ApiError::NameMissing)
    })?;
    let price = payload.price.ok_or_else(|| {
        Logger::request(Severity::Error, &ctx, "param_missing", &[("param", "price")]);
        ErrorReply::new(ctx.clone(), ApiError::PriceMissing)
    })?;
    let draft = BookDraft { name, price };

    // Decoded → Validated
    validate(&draft).map_err(|err| {
        Logger::request(
            Severity::Error,
            &ctx,
            "validation_failed",
            &[("code", err.code())],
        );
        ErrorReply::new(ctx.clone(), err)
    })?;

    // Validated → Persisted
    let book = state.store.insert(&draft).map_err(|err| {
        Logger::request(
            Severity::Error,
            &ctx,
            "store_insert_failed",
            &[("detail", &err.to_string())],
        );
        ErrorReply::new(ctx.clone(), ApiError::from(err))
    })?;

    // Persisted → Responded
    Logger::request(Severity::Info, &ctx, "book_created", &[("id", &book.id)]);
    Ok(Reply::created(&ctx, BookView::from(&book)))
}

/// GET /books — list all books; an empty store is the no-data-found error
async fn list_books(
    State(state): State<Arc<AppState>>,
    ctx: CorrelationContext,
) -> Result<Reply, ErrorReply> {
    let books = state.store.list().map_err(|err| {
        Logger::request(
            Severity::Error,
            &ctx,
            "store_select_failed",
            &[("detail", &err.to_string())],
        );
        ErrorReply::new(ctx.clone(), ApiError::from(err))
    })?;

    if books.is_empty() {
        Logger::request(Severity::Warn, &ctx, "no_books_found", &[]);
        return Err(ErrorReply::new(ctx, ApiError::NoDataFound));
    }

    Logger::request(
        Severity::Info,
        &ctx,
        "books_listed",
        &[("count", &books.len().to_string())],
    );
    let payload = BookListPayload {
        books: books.iter().map(BookView::from).collect(),
    };
    Ok(Reply::ok(&ctx, payload))
}
