//! # Error Taxonomy
//!
//! The closed catalog of failures this service can report to a client.
//!
//! Every failure that crosses the handler boundary is one of these kinds,
//! carrying a stable machine-readable code and a fixed HTTP status. Codes
//! are part of the wire contract: once shipped, a code is never reassigned
//! to a different condition.

use std::fmt;

use axum::http::StatusCode;

/// Result type for pipeline operations
pub type ApiResult<T> = Result<T, ApiError>;

/// All failure kinds the service reports, by class:
/// client input (400), authentication (401), absent data (404),
/// and store/internal (500).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    // ==================
    // Internal (500)
    // ==================
    /// Catch-all for failures with no more specific kind
    Unexpected,
    /// Required environment configuration could not be loaded
    EnvLoad,

    // ==================
    // Store (500 / 404)
    // ==================
    /// Store connection could not be established
    StoreConnection,
    /// Store query execution failed
    StoreQuery,
    /// Store result row could not be read
    StoreScan,
    /// Store result set could not be closed
    StoreClose,
    /// Statement preparation failed
    StatementPrepare,
    /// Insert into the store failed
    StoreInsert,
    /// Assigned id could not be retrieved after insert
    LastInsertId,
    /// Select from the store failed
    StoreSelect,
    /// Query succeeded but produced no rows
    NoDataFound,

    // ==================
    // Server lifecycle (500)
    // ==================
    /// Server failed to start
    ServerStart,
    /// Server failed to shut down cleanly
    ServerShutdown,

    // ==================
    // Authentication (401)
    // ==================
    /// X-API-KEY header absent or empty
    ApiKeyMissing,
    /// X-API-KEY header does not match the configured key
    ApiKeyInvalid,

    // ==================
    // Client input (400)
    // ==================
    /// Parameter 'name' absent from the request body
    NameMissing,
    /// Parameter 'price' absent from the request body
    PriceMissing,
    /// Parameter 'name' present but empty
    NameEmpty,
    /// Parameter 'price' is zero
    PriceZero,
    /// Parameter 'name' exceeds 50 characters
    NameTooLong,
    /// Parameter 'price' is negative
    PriceNegative,
    /// Parameter 'price' exceeds 20000
    PriceTooHigh,
    /// Request body is not decodable JSON
    MalformedBody,
}

impl ApiError {
    /// Stable machine-readable code. Clients match on these literals;
    /// a code is never reassigned.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unexpected => "BUSN-ERR-500-00",
            ApiError::EnvLoad => "ENV-ERR-500-00",
            ApiError::StoreConnection => "DB-ERR-500-00",
            ApiError::StoreQuery => "DB-ERR-500-01",
            ApiError::StoreScan => "DB-ERR-500-02",
            ApiError::StoreClose => "DB-ERR-500-03",
            ApiError::StatementPrepare => "DB-ERR-500-04",
            ApiError::StoreInsert => "DB-ERR-500-05",
            ApiError::LastInsertId => "DB-ERR-500-06",
            ApiError::StoreSelect => "DB-ERR-500-07",
            ApiError::NoDataFound => "DB-ERR-404-00",
            ApiError::ServerStart => "SRV-ERR-500-00",
            ApiError::ServerShutdown => "SRV-ERR-500-01",
            ApiError::ApiKeyMissing => "AUTH-ERR-401-00",
            ApiError::ApiKeyInvalid => "AUTH-ERR-401-01",
            ApiError::NameMissing => "VAL-ERR-400-00",
            ApiError::PriceMissing => "VAL-ERR-400-01",
            ApiError::NameEmpty => "VAL-ERR-400-02",
            ApiError::PriceZero => "VAL-ERR-400-03",
            ApiError::NameTooLong => "VAL-ERR-400-04",
            ApiError::PriceNegative => "VAL-ERR-400-05",
            ApiError::PriceTooHigh => "VAL-ERR-400-06",
            ApiError::MalformedBody => "VAL-ERR-400-07",
        }
    }

    /// Fixed human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Unexpected => "An unexpected error occurred",
            ApiError::EnvLoad => "Failed to load environment configuration",
            ApiError::StoreConnection => "Failed to connect to the database",
            ApiError::StoreQuery => "Failed to execute the database query",
            ApiError::StoreScan => "Failed to scan the database result",
            ApiError::StoreClose => "Failed to close the database result",
            ApiError::StatementPrepare => "Failed to prepare the statement",
            ApiError::StoreInsert => "Failed to insert into the database",
            ApiError::LastInsertId => "Failed to retrieve the last inserted id",
            ApiError::StoreSelect => "Failed to fetch from the database",
            ApiError::NoDataFound => "No data found",
            ApiError::ServerStart => "Failed to start the server",
            ApiError::ServerShutdown => "Failed to shut down the server",
            ApiError::ApiKeyMissing => "API key is empty",
            ApiError::ApiKeyInvalid => "API key is invalid",
            ApiError::NameMissing => {
                "Parameter 'name' is missing. Set the parameter and provide a value"
            }
            ApiError::PriceMissing => {
                "Parameter 'price' is missing. Set the parameter and provide a value"
            }
            ApiError::NameEmpty => "Parameter 'name' is empty. Provide a book name",
            ApiError::PriceZero => "Parameter 'price' is zero. Provide a book price",
            ApiError::NameTooLong => "Parameter 'name' is too long. Use at most 50 characters",
            ApiError::PriceNegative => "Parameter 'price' is negative. Provide a positive integer",
            ApiError::PriceTooHigh => "Parameter 'price' is too high. Use at most 20000",
            ApiError::MalformedBody => "Failed to decode the request body",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::NameMissing
            | ApiError::PriceMissing
            | ApiError::NameEmpty
            | ApiError::PriceZero
            | ApiError::NameTooLong
            | ApiError::PriceNegative
            | ApiError::PriceTooHigh
            | ApiError::MalformedBody => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            ApiError::ApiKeyMissing | ApiError::ApiKeyInvalid => StatusCode::UNAUTHORIZED,

            // 404 Not Found
            ApiError::NoDataFound => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            ApiError::Unexpected
            | ApiError::EnvLoad
            | ApiError::StoreConnection
            | ApiError::StoreQuery
            | ApiError::StoreScan
            | ApiError::StoreClose
            | ApiError::StatementPrepare
            | ApiError::StoreInsert
            | ApiError::LastInsertId
            | ApiError::StoreSelect
            | ApiError::ServerStart
            | ApiError::ServerShutdown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Rendering contract: "[<status>] [<code>] <message>". Hand-written because
// the format interleaves derived fields rather than per-variant text.
impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {}",
            self.status_code().as_u16(),
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every kind, for exhaustive contract checks
    const ALL: [ApiError; 23] = [
        ApiError::Unexpected,
        ApiError::EnvLoad,
        ApiError::StoreConnection,
        ApiError::StoreQuery,
        ApiError::StoreScan,
        ApiError::StoreClose,
        ApiError::StatementPrepare,
        ApiError::StoreInsert,
        ApiError::LastInsertId,
        ApiError::StoreSelect,
        ApiError::NoDataFound,
        ApiError::ServerStart,
        ApiError::ServerShutdown,
        ApiError::ApiKeyMissing,
        ApiError::ApiKeyInvalid,
        ApiError::NameMissing,
        ApiError::PriceMissing,
        ApiError::NameEmpty,
        ApiError::PriceZero,
        ApiError::NameTooLong,
        ApiError::PriceNegative,
        ApiError::PriceTooHigh,
        ApiError::MalformedBody,
    ];

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NameEmpty.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::PriceTooHigh.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ApiKeyMissing.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::NoDataFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::StoreInsert.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a.code(), b.code(), "{:?} and {:?} share a code", a, b);
            }
        }
    }

    #[test]
    fn test_code_class_matches_status() {
        // The embedded status digits in each code track the HTTP status
        for err in &ALL {
            let status = err.status_code().as_u16().to_string();
            assert!(
                err.code().contains(&status),
                "code {} does not carry status {}",
                err.code(),
                status
            );
        }
    }

    #[test]
    fn test_display_format() {
        assert_eq!(
            ApiError::NameEmpty.to_string(),
            "[400] [VAL-ERR-400-02] Parameter 'name' is empty. Provide a book name"
        );
        assert_eq!(
            ApiError::NoDataFound.to_string(),
            "[404] [DB-ERR-404-00] No data found"
        );
        for err in &ALL {
            let rendered = err.to_string();
            assert_eq!(
                rendered,
                format!(
                    "[{}] [{}] {}",
                    err.status_code().as_u16(),
                    err.code(),
                    err.message()
                )
            );
        }
    }

    #[test]
    fn test_stable_wire_codes() {
        // Spot-check literals that clients are known to match on
        assert_eq!(ApiError::PriceZero.code(), "VAL-ERR-400-03");
        assert_eq!(ApiError::MalformedBody.code(), "VAL-ERR-400-07");
        assert_eq!(ApiError::NoDataFound.code(), "DB-ERR-404-00");
        assert_eq!(ApiError::ApiKeyInvalid.code(), "AUTH-ERR-401-01");
        assert_eq!(ApiError::StoreSelect.code(), "DB-ERR-500-07");
    }
}
