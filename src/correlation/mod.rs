//! # Correlation Context
//!
//! Request-scoped identity that ties log lines and the response envelope
//! to one request.
//!
//! A fresh context is created at request entry and carried by value through
//! the call chain. It is never stored in process-wide state: promoting it to
//! a global would make every concurrent request report the same identifier.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Per-request correlation identity. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationContext {
    /// Opaque unique token for this request
    pub id: String,
    /// Timestamp captured when the request entered the pipeline
    pub issued_at: DateTime<Utc>,
}

impl CorrelationContext {
    /// Begin a new correlation context for one inbound request
    pub fn begin() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            issued_at: Utc::now(),
        }
    }

    /// Timestamp in the wire format used by the envelope (`trn_time`)
    pub fn issued_at_rfc3339(&self) -> String {
        self.issued_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Middleware that attaches a fresh context to every inbound request
pub async fn correlation_layer(mut request: Request<axum::body::Body>, next: Next) -> Response {
    request.extensions_mut().insert(CorrelationContext::begin());
    next.run(request).await
}

/// Extractor pulling the context attached by [`correlation_layer`].
///
/// Falls back to a fresh context when the layer is absent (e.g. a route
/// mounted without it in tests), so every response still carries an identity.
#[axum::async_trait]
impl<S> FromRequestParts<S> for CorrelationContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CorrelationContext>()
            .cloned()
            .unwrap_or_else(CorrelationContext::begin))
    }
}
