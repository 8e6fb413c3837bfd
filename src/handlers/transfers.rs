//! Transfer HTTP handlers.
//!
//! - POST /transfers - Move money between two accounts
//! - GET /transfers/{id} - Get transfer record

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::AppError,
    models::{Currency, Transfer, transfer::TransferRequest},
    services::transfer_service::{self, TransferTxParams, TransferTxResult},
    store::{Queries, Store},
};

/// Transfer money between accounts.
///
/// # Request Body
///
/// ```json
/// {
///   "from_account_id": 1,
///   "to_account_id": 2,
///   "amount": 2500,
///   "currency": "USD"
/// }
/// ```
///
/// # Validation
///
/// - `currency` must be supported
/// - `amount` must be positive and the accounts must differ
/// - Both accounts must exist (404) and be denominated in `currency` (400)
///
/// # Atomicity
///
/// The transfer record, both entries and both balances are written in one
/// database transaction. Either all of them are persisted or none.
pub async fn create_transfer(
    State(store): State<Store>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferTxResult>, AppError> {
    if !Currency::is_supported(&request.currency) {
        return Err(AppError::InvalidRequest(format!(
            "unsupported currency: {}",
            request.currency
        )));
    }

    let params = TransferTxParams {
        from_account_id: request.from_account_id,
        to_account_id: request.to_account_id,
        amount: request.amount,
    };
    params.validate()?;

    ensure_account_currency(&store, params.from_account_id, &request.currency).await?;
    ensure_account_currency(&store, params.to_account_id, &request.currency).await?;

    let result = transfer_service::transfer_tx(&store, params).await?;

    Ok(Json(result))
}

/// Get transfer by ID.
pub async fn get_transfer(
    State(store): State<Store>,
    Path(transfer_id): Path<i64>,
) -> Result<Json<Transfer>, AppError> {
    let mut conn = store.acquire().await?;
    let transfer = conn.get_transfer(transfer_id).await?;

    Ok(Json(transfer))
}

/// Fail unless the account exists and uses `currency`.
async fn ensure_account_currency(
    store: &Store,
    account_id: i64,
    currency: &str,
) -> Result<(), AppError> {
    let mut conn = store.acquire().await?;
    let account = conn.get_account(account_id).await?;

    if account.currency != currency {
        return Err(AppError::CurrencyMismatch {
            account_id,
            expected: currency.to_string(),
            actual: account.currency,
        });
    }

    Ok(())
}
