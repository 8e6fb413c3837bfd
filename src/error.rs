//! Error types and HTTP error response handling.
//!
//! [`StoreError`] is the failure taxonomy of the ledger core (store, executor
//! and transfer orchestrator). [`AppError`] is what HTTP handlers return; it
//! wraps `StoreError` and maps every variant to a status code and JSON body.

use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failure of a ledger store operation or database transaction.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A referenced row (usually an account) does not exist.
    ///
    /// Never retried: the same request will fail the same way.
    #[error("record not found")]
    NotFound,

    /// Any other backend failure: connectivity, constraint or statement error.
    #[error("data access failure: {0}")]
    Database(#[source] sqlx::Error),

    /// Rolling back after a failed unit of work also failed.
    ///
    /// Both causes are kept; the connection that carried the transaction
    /// should be considered unusable.
    #[error("transaction failed: {source}; rollback failed: {rollback}")]
    Rollback {
        source: Box<StoreError>,
        rollback: sqlx::Error,
    },

    /// The unit of work did not finish within the configured bound and was rolled back.
    #[error("transaction timed out after {0:?}")]
    Timeout(Duration),

    /// Transfer parameters rejected before any transaction was opened.
    #[error("invalid transfer: {0}")]
    InvalidTransfer(String),
}

impl StoreError {
    /// Whether a caller may safely retry the whole operation.
    ///
    /// A failed transfer never leaves partial state behind, so transient
    /// backend failures are retryable. Missing accounts and invalid
    /// parameters are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Database(_) | StoreError::Timeout(_) => true,
            StoreError::Rollback { .. } => false,
            StoreError::NotFound | StoreError::InvalidTransfer(_) => false,
        }
    }

    /// Classify an error from an INSERT that references accounts.
    ///
    /// A foreign key violation there means the referenced account does not
    /// exist, which callers must see as `NotFound`.
    pub fn from_insert(err: sqlx::Error) -> Self {
        let missing_reference = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_foreign_key_violation());

        if missing_reference {
            StoreError::NotFound
        } else {
            StoreError::from(err)
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

/// Application-wide error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Error raised by the ledger core.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Account exists but is not denominated in the requested currency.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("account [{account_id}] currency mismatch: {actual} vs {expected}")]
    CurrencyMismatch {
        account_id: i64,
        expected: String,
        actual: String,
    },
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `NotFound` → 404 Not Found
/// - `InvalidRequest`, `InvalidTransfer`, `CurrencyMismatch` → 400 Bad Request
/// - `Timeout` → 504 Gateway Timeout
/// - `Database`, `Rollback` → 500 Internal Server Error (details are logged, not returned)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Store(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, "not_found", self.to_string())
            }
            AppError::Store(StoreError::InvalidTransfer(msg)) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Store(StoreError::Timeout(_)) => {
                (StatusCode::GATEWAY_TIMEOUT, "timeout", self.to_string())
            }
            AppError::Store(err) => {
                tracing::error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::CurrencyMismatch { .. } => {
                (StatusCode::BAD_REQUEST, "currency_mismatch", self.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
