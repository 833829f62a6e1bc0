//! # Book API
//!
//! HTTP surface: configuration, the response envelope, API key middleware,
//! route handlers and the server itself.

mod auth;
mod book_routes;
mod config;
mod envelope;
mod server;

pub use auth::API_KEY_HEADER;
pub use book_routes::{BookListPayload, BookView};
pub use config::ApiConfig;
pub use envelope::{Envelope, EnvelopeResult, ErrorReply, Reply};
pub use server::{ApiServer, AppState};
