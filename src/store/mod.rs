//! # Book Store
//!
//! Storage collaborator seam. The pipeline talks to storage only through
//! the [`BookStore`] trait; failures cross the seam as [`StoreError`] and
//! are remapped to taxonomy codes at the handler boundary.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::errors::ApiError;
use crate::model::{Book, BookDraft};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failures, one variant per taxonomy kind.
///
/// The message carries driver detail for the log; it never reaches a client.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Connection could not be established
    #[error("store connection failed: {0}")]
    Connection(String),

    /// Query execution failed
    #[error("query failed: {0}")]
    Query(String),

    /// A result row could not be read
    #[error("row scan failed: {0}")]
    Scan(String),

    /// Result set could not be closed
    #[error("result close failed: {0}")]
    Close(String),

    /// Statement preparation failed
    #[error("statement preparation failed: {0}")]
    Prepare(String),

    /// Insert failed
    #[error("insert failed: {0}")]
    Insert(String),

    /// Assigned id could not be retrieved after insert
    #[error("last insert id unavailable: {0}")]
    LastInsertId(String),

    /// Select failed
    #[error("select failed: {0}")]
    Select(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Connection(_) => ApiError::StoreConnection,
            StoreError::Query(_) => ApiError::StoreQuery,
            StoreError::Scan(_) => ApiError::StoreScan,
            StoreError::Close(_) => ApiError::StoreClose,
            StoreError::Prepare(_) => ApiError::StatementPrepare,
            StoreError::Insert(_) => ApiError::StoreInsert,
            StoreError::LastInsertId(_) => ApiError::LastInsertId,
            StoreError::Select(_) => ApiError::StoreSelect,
        }
    }
}

/// Book persistence operations.
///
/// One synchronous unit of work per call; no retries, no internal timeout.
/// Implementations must be safe to share across concurrent requests.
pub trait BookStore: Send + Sync {
    /// Persist a validated draft. The store assigns `id` and `created_at`.
    fn insert(&self, draft: &BookDraft) -> StoreResult<Book>;

    /// Fetch all books in insertion order. An empty store yields an empty
    /// vec; classifying that as a failure is the caller's policy.
    fn list(&self) -> StoreResult<Vec<Book>>;
}
