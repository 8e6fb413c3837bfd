//! Row-level ledger operations.
//!
//! [`Queries`] is the capability set the rest of the crate depends on. It is
//! implemented once for [`PgConnection`]; a pooled connection and an open
//! `sqlx::Transaction` both dereference to `PgConnection`, so the same code
//! runs standalone or inside a unit of work.
//!
//! Each operation is a single SQL statement.

use async_trait::async_trait;
use sqlx::PgConnection;

use crate::{
    error::StoreError,
    models::{
        account::{
            Account, AddAccountBalanceParams, CreateAccountParams, ListAccountsParams,
            UpdateAccountParams,
        },
        entry::{CreateEntryParams, Entry, ListEntriesParams},
        transfer::{CreateTransferParams, ListTransfersParams, Transfer},
    },
};

/// Single-statement operations on accounts, entries and transfers.
///
/// Lookups of a missing id fail with [`StoreError::NotFound`]. Inserts that
/// reference a missing account fail with `NotFound` as well.
#[async_trait]
pub trait Queries: Send {
    async fn create_account(&mut self, params: CreateAccountParams)
    -> Result<Account, StoreError>;

    async fn get_account(&mut self, id: i64) -> Result<Account, StoreError>;

    async fn list_accounts(
        &mut self,
        params: ListAccountsParams,
    ) -> Result<Vec<Account>, StoreError>;

    /// Overwrite the balance of an account.
    async fn update_account(&mut self, params: UpdateAccountParams)
    -> Result<Account, StoreError>;

    async fn delete_account(&mut self, id: i64) -> Result<(), StoreError>;

    /// Add a signed delta to an account balance and return the updated row.
    ///
    /// The read-modify-write happens inside one `UPDATE` statement, which
    /// takes the row lock for the rest of the enclosing transaction.
    async fn add_account_balance(
        &mut self,
        params: AddAccountBalanceParams,
    ) -> Result<Account, StoreError>;

    async fn create_entry(&mut self, params: CreateEntryParams) -> Result<Entry, StoreError>;

    async fn get_entry(&mut self, id: i64) -> Result<Entry, StoreError>;

    async fn list_entries(&mut self, params: ListEntriesParams)
    -> Result<Vec<Entry>, StoreError>;

    async fn create_transfer(
        &mut self,
        params: CreateTransferParams,
    ) -> Result<Transfer, StoreError>;

    async fn get_transfer(&mut self, id: i64) -> Result<Transfer, StoreError>;

    async fn list_transfers(
        &mut self,
        params: ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError>;
}

#[async_trait]
impl Queries for PgConnection {
    async fn create_account(
        &mut self,
        params: CreateAccountParams,
    ) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (owner, balance, currency)
            VALUES ($1, $2, $3)
            RETURNING id, owner, balance, currency, created_at
            "#,
        )
        .bind(params.owner)
        .bind(params.balance)
        .bind(params.currency)
        .fetch_one(&mut *self)
        .await?;

        Ok(account)
    }

    async fn get_account(&mut self, id: i64) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(
            "SELECT id, owner, balance, currency, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn list_accounts(
        &mut self,
        params: ListAccountsParams,
    ) -> Result<Vec<Account>, StoreError> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, owner, balance, currency, created_at
            FROM accounts
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(&mut *self)
        .await?;

        Ok(accounts)
    }

    async fn update_account(
        &mut self,
        params: UpdateAccountParams,
    ) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET balance = $2
            WHERE id = $1
            RETURNING id, owner, balance, currency, created_at
            "#,
        )
        .bind(params.id)
        .bind(params.balance)
        .fetch_optional(&mut *self)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_account(&mut self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&mut *self)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn add_account_balance(
        &mut self,
        params: AddAccountBalanceParams,
    ) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET balance = balance + $2
            WHERE id = $1
            RETURNING id, owner, balance, currency, created_at
            "#,
        )
        .bind(params.id)
        .bind(params.amount)
        .fetch_optional(&mut *self)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn create_entry(&mut self, params: CreateEntryParams) -> Result<Entry, StoreError> {
        sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (account_id, amount)
            VALUES ($1, $2)
            RETURNING id, account_id, amount, created_at
            "#,
        )
        .bind(params.account_id)
        .bind(params.amount)
        .fetch_one(&mut *self)
        .await
        .map_err(StoreError::from_insert)
    }

    async fn get_entry(&mut self, id: i64) -> Result<Entry, StoreError> {
        sqlx::query_as::<_, Entry>(
            "SELECT id, account_id, amount, created_at FROM entries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn list_entries(
        &mut self,
        params: ListEntriesParams,
    ) -> Result<Vec<Entry>, StoreError> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, account_id, amount, created_at
            FROM entries
            WHERE account_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(params.account_id)
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(&mut *self)
        .await?;

        Ok(entries)
    }

    async fn create_transfer(
        &mut self,
        params: CreateTransferParams,
    ) -> Result<Transfer, StoreError> {
        sqlx::query_as::<_, Transfer>(
            r#"
            INSERT INTO transfers (from_account_id, to_account_id, amount)
            VALUES ($1, $2, $3)
            RETURNING id, from_account_id, to_account_id, amount, created_at
            "#,
        )
        .bind(params.from_account_id)
        .bind(params.to_account_id)
        .bind(params.amount)
        .fetch_one(&mut *self)
        .await
        .map_err(StoreError::from_insert)
    }

    async fn get_transfer(&mut self, id: i64) -> Result<Transfer, StoreError> {
        sqlx::query_as::<_, Transfer>(
            r#"
            SELECT id, from_account_id, to_account_id, amount, created_at
            FROM transfers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn list_transfers(
        &mut self,
        params: ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError> {
        let transfers = sqlx::query_as::<_, Transfer>(
            r#"
            SELECT id, from_account_id, to_account_id, amount, created_at
            FROM transfers
            WHERE from_account_id = $1 OR to_account_id = $2
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(params.from_account_id)
        .bind(params.to_account_id)
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(&mut *self)
        .await?;

        Ok(transfers)
    }
}
