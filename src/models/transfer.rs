//! Transfer data models and API request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one movement of funds between two accounts.
///
/// Every committed transfer has exactly two entries: `-amount` on the source
/// account and `+amount` on the destination account.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,

    /// Always positive (CHECK constraint)
    pub amount: i64,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct CreateTransferParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// Matches transfers leaving `from_account_id` or arriving at `to_account_id`.
#[derive(Debug, Clone, Copy)]
pub struct ListTransfersParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Request to transfer money between accounts.
///
/// # JSON Example
///
/// ```json
/// {
///   "from_account_id": 1,
///   "to_account_id": 2,
///   "amount": 2500,
///   "currency": "USD"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,

    /// Amount in minor units, must be positive
    pub amount: i64,

    /// Both accounts must be denominated in this currency
    pub currency: String,
}
