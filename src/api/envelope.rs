//! # Response Envelope
//!
//! The uniform wrapper around every response body, success or failure.
//! No handler emits a bare payload or a bare error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::correlation::CorrelationContext;
use crate::errors::ApiError;

/// Wire envelope: `{trn_id, trn_time, result}`
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub trn_id: String,
    pub trn_time: String,
    pub result: EnvelopeResult,
}

/// Exactly one of a success payload or an error pair.
///
/// Serializes as `{"payload": ...}` or `{"error_code": ..., "error_message": ...}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EnvelopeResult {
    Success { payload: Value },
    Failure {
        error_code: String,
        error_message: String,
    },
}

impl Envelope {
    /// Wrap a success payload. Built fresh per response.
    pub fn success(ctx: &CorrelationContext, payload: impl Serialize) -> Self {
        Self {
            trn_id: ctx.id.clone(),
            trn_time: ctx.issued_at_rfc3339(),
            result: EnvelopeResult::Success {
                // Payloads are locally-defined types; serialization cannot fail
                payload: serde_json::to_value(payload).unwrap_or(Value::Null),
            },
        }
    }

    /// Wrap a taxonomy error
    pub fn failure(ctx: &CorrelationContext, err: &ApiError) -> Self {
        Self {
            trn_id: ctx.id.clone(),
            trn_time: ctx.issued_at_rfc3339(),
            result: EnvelopeResult::Failure {
                error_code: err.code().to_string(),
                error_message: err.message().to_string(),
            },
        }
    }
}

/// A success response: caller-chosen 2xx status plus envelope.
///
/// Status line and body are written once, by `into_response`.
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    envelope: Envelope,
}

impl Reply {
    /// 200 OK with the given payload
    pub fn ok(ctx: &CorrelationContext, payload: impl Serialize) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Envelope::success(ctx, payload),
        }
    }

    /// 201 Created with the given payload
    pub fn created(ctx: &CorrelationContext, payload: impl Serialize) -> Self {
        Self {
            status: StatusCode::CREATED,
            envelope: Envelope::success(ctx, payload),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// A failure response: the error's declared status plus a failure envelope
#[derive(Debug, Clone)]
pub struct ErrorReply {
    ctx: CorrelationContext,
    error: ApiError,
}

impl ErrorReply {
    pub fn new(ctx: CorrelationContext, error: ApiError) -> Self {
        Self { ctx, error }
    }
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = Json(Envelope::failure(&self.ctx, &self.error));
        (status, body).into_response()
    }
}
