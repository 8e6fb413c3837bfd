//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Database entity representing an account
//! - Parameter structs for the account store operations
//! - `CreateAccountRequest` / `PageQuery`: HTTP inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents an account record from the database.
///
/// # Balance Storage
///
/// Balances are `i64` minor currency units (cents), never floats. The
/// balance only changes through [`Queries::add_account_balance`] or an
/// explicit [`Queries::update_account`].
///
/// [`Queries::add_account_balance`]: crate::store::Queries::add_account_balance
/// [`Queries::update_account`]: crate::store::Queries::update_account
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,

    /// Name of the account holder
    pub owner: String,

    /// Current balance in minor units
    ///
    /// May go negative: overdraft limits are not enforced by the ledger.
    pub balance: i64,

    /// Currency code, one of [`Currency`](super::currency::Currency)
    pub currency: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateAccountParams {
    pub owner: String,
    pub balance: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy)]
pub struct UpdateAccountParams {
    pub id: i64,
    pub balance: i64,
}

/// Input of the balance mutator: add `amount` (signed) to account `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddAccountBalanceParams {
    pub id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct ListAccountsParams {
    pub limit: i64,
    pub offset: i64,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "owner": "alice",
///   "currency": "USD",
///   "initial_balance": 10000
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub owner: String,

    pub currency: String,

    /// Opening balance in minor units (defaults to 0, must not be negative)
    #[serde(default)]
    pub initial_balance: i64,
}

/// Pagination query for list endpoints.
///
/// `page_id` starts at 1 and is capped at `i32::MAX`; `page_size` must be
/// between 5 and 10.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page_id: i64,
    pub page_size: i64,
}

impl PageQuery {
    pub const MIN_PAGE_SIZE: i64 = 5;
    pub const MAX_PAGE_SIZE: i64 = 10;
    pub const MAX_PAGE_ID: i64 = i32::MAX as i64;

    /// Validate and convert into `(limit, offset)`.
    pub fn limit_offset(&self) -> Result<(i64, i64), String> {
        if self.page_id < 1 {
            return Err("page_id must be at least 1".to_string());
        }
        if self.page_id > Self::MAX_PAGE_ID {
            return Err("page_id out of range".to_string());
        }
        if !(Self::MIN_PAGE_SIZE..=Self::MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(format!(
                "page_size must be between {} and {}",
                Self::MIN_PAGE_SIZE,
                Self::MAX_PAGE_SIZE
            ));
        }

        let offset = (self.page_id - 1)
            .checked_mul(self.page_size)
            .ok_or_else(|| "page_id out of range".to_string())?;

        Ok((self.page_size, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_offsets() {
        let page = PageQuery {
            page_id: 3,
            page_size: 5,
        };
        assert_eq!(page.limit_offset(), Ok((5, 10)));

        let first = PageQuery {
            page_id: 1,
            page_size: 10,
        };
        assert_eq!(first.limit_offset(), Ok((10, 0)));
    }

    #[test]
    fn test_page_query_bounds() {
        let zero_page = PageQuery {
            page_id: 0,
            page_size: 5,
        };
        assert!(zero_page.limit_offset().is_err());

        let too_small = PageQuery {
            page_id: 1,
            page_size: 4,
        };
        assert!(too_small.limit_offset().is_err());

        let too_large = PageQuery {
            page_id: 1,
            page_size: 11,
        };
        assert!(too_large.limit_offset().is_err());
    }

    #[test]
    fn test_page_query_huge_page_id() {
        let huge = PageQuery {
            page_id: i64::MAX,
            page_size: 10,
        };
        assert_eq!(huge.limit_offset(), Err("page_id out of range".to_string()));

        let last = PageQuery {
            page_id: PageQuery::MAX_PAGE_ID,
            page_size: 10,
        };
        assert_eq!(
            last.limit_offset(),
            Ok((10, (PageQuery::MAX_PAGE_ID - 1) * 10))
        );
    }
}
