//! # API Key Middleware
//!
//! Static shared-secret check on the `X-API-KEY` header, applied to every
//! book route. Failures are answered with a full envelope carrying the
//! request's correlation identity.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use crate::correlation::CorrelationContext;
use crate::errors::ApiError;
use crate::observability::{Logger, Severity};

use super::envelope::ErrorReply;
use super::server::AppState;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject requests without a valid API key.
///
/// Absent or empty header → missing-key error; mismatch → invalid-key
/// error. The comparison is constant-time.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    ctx: CorrelationContext,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if provided.is_empty() {
        Logger::request(Severity::Warn, &ctx, "api_key_missing", &[]);
        return ErrorReply::new(ctx, ApiError::ApiKeyMissing).into_response();
    }

    if !keys_match(provided, &state.config.api_key) {
        Logger::request(Severity::Warn, &ctx, "api_key_invalid", &[]);
        return ErrorReply::new(ctx, ApiError::ApiKeyInvalid).into_response();
    }

    next.run(request).await
}

fn keys_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
