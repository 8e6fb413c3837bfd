//! Account HTTP handlers.
//!
//! - POST /accounts - Create new account
//! - GET /accounts/{id} - Get account by ID
//! - GET /accounts - List accounts (paginated)
//! - GET /accounts/{id}/entries - List an account's ledger entries (paginated)

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    error::AppError,
    models::{
        Account, Currency, Entry,
        account::{CreateAccountParams, CreateAccountRequest, ListAccountsParams, PageQuery},
        entry::ListEntriesParams,
    },
    store::{Queries, Store},
};

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// {
///   "owner": "alice",
///   "currency": "USD",
///   "initial_balance": 0
/// }
/// ```
///
/// # Response
///
/// - **200 OK**: the created account
/// - **400**: empty owner, unsupported currency or negative opening balance
pub async fn create_account(
    State(store): State<Store>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    if request.owner.trim().is_empty() {
        return Err(AppError::InvalidRequest("owner is required".to_string()));
    }
    if !Currency::is_supported(&request.currency) {
        return Err(AppError::InvalidRequest(format!(
            "unsupported currency: {}",
            request.currency
        )));
    }
    if request.initial_balance < 0 {
        return Err(AppError::InvalidRequest(
            "initial_balance must not be negative".to_string(),
        ));
    }

    let mut conn = store.acquire().await?;
    let account = conn
        .create_account(CreateAccountParams {
            owner: request.owner,
            balance: request.initial_balance,
            currency: request.currency,
        })
        .await?;

    tracing::info!(account_id = account.id, "Account created");

    Ok(Json(account))
}

/// Get a specific account by ID.
///
/// Returns 404 if the account does not exist.
pub async fn get_account(
    State(store): State<Store>,
    Path(account_id): Path<i64>,
) -> Result<Json<Account>, AppError> {
    let mut conn = store.acquire().await?;
    let account = conn.get_account(account_id).await?;

    Ok(Json(account))
}

/// List accounts ordered by id.
///
/// # Query Parameters
///
/// - `page_id` - 1-based page number
/// - `page_size` - between 5 and 10
pub async fn list_accounts(
    State(store): State<Store>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Account>>, AppError> {
    let (limit, offset) = page.limit_offset().map_err(AppError::InvalidRequest)?;

    let mut conn = store.acquire().await?;
    let accounts = conn
        .list_accounts(ListAccountsParams { limit, offset })
        .await?;

    Ok(Json(accounts))
}

/// List ledger entries of one account, oldest first.
///
/// Returns 404 if the account does not exist (an empty list means the
/// account exists but has no entries on that page).
pub async fn list_entries(
    State(store): State<Store>,
    Path(account_id): Path<i64>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Entry>>, AppError> {
    let (limit, offset) = page.limit_offset().map_err(AppError::InvalidRequest)?;

    let mut conn = store.acquire().await?;
    conn.get_account(account_id).await?;
    let entries = conn
        .list_entries(ListEntriesParams {
            account_id,
            limit,
            offset,
        })
        .await?;

    Ok(Json(entries))
}
