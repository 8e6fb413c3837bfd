//! Ledger entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One account's signed half of a balance movement.
///
/// Negative amounts are debits, positive amounts credits. Entries are
/// append-only; nothing updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct CreateEntryParams {
    pub account_id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct ListEntriesParams {
    pub account_id: i64,
    pub limit: i64,
    pub offset: i64,
}
