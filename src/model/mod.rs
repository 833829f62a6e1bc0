//! # Book Model
//!
//! The book record, its pre-persistence draft form, and the validation
//! engine applied before any storage attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, ApiResult};

/// Maximum accepted name length, in Unicode code points
pub const MAX_NAME_CHARS: usize = 50;

/// Maximum accepted price
pub const MAX_PRICE: i64 = 20_000;

/// Wire format for `created_at` fields
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A persisted book. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// `created_at` rendered as `YYYY-MM-DD HH:MM:SS`
    pub fn created_at_wire(&self) -> String {
        self.created_at.format(CREATED_AT_FORMAT).to_string()
    }
}

/// A candidate book, decoded from a request but not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDraft {
    pub name: String,
    pub price: i64,
}

impl BookDraft {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Validate a draft against the catalog rules.
///
/// Pure and deterministic; the first failing rule wins, and the rule order
/// is part of the contract:
/// 1. empty name
/// 2. zero price
/// 3. name longer than [`MAX_NAME_CHARS`] code points
/// 4. negative price
/// 5. price above [`MAX_PRICE`]
pub fn validate(draft: &BookDraft) -> ApiResult<()> {
    if draft.name.is_empty() {
        return Err(ApiError::NameEmpty);
    }
    if draft.price == 0 {
        return Err(ApiError::PriceZero);
    }
    if draft.name.chars().count() > MAX_NAME_CHARS {
        return Err(ApiError::NameTooLong);
    }
    if draft.price < 0 {
        return Err(ApiError::PriceNegative);
    }
    if draft.price > MAX_PRICE {
        return Err(ApiError::PriceTooHigh);
    }
    Ok(())
}
