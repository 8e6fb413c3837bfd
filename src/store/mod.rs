//! Ledger store: connection access and the transaction executor.
//!
//! # Atomicity Guarantees
//!
//! [`Store::exec_tx`] runs a unit of work inside one PostgreSQL transaction.
//! The work either commits as a whole or leaves nothing behind:
//! - `Ok` from the work → `COMMIT`
//! - `Err` from the work, or the timeout elapsing → explicit `ROLLBACK`
//! - the future being dropped (caller cancelled) → the transaction guard
//!   rolls back when the connection is returned to the pool

use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::{PgConnection, Postgres, pool::PoolConnection};

use crate::{db::DbPool, error::StoreError};

pub mod queries;

#[cfg(test)]
pub mod mock;

pub use queries::Queries;

/// Handle to the ledger database. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Store {
    pool: DbPool,
    tx_timeout: Duration,
}

impl Store {
    pub fn new(pool: DbPool, tx_timeout: Duration) -> Self {
        Self { pool, tx_timeout }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn tx_timeout(&self) -> Duration {
        self.tx_timeout
    }

    /// Check out a standalone connection for single-statement operations.
    ///
    /// The returned connection dereferences to `PgConnection` and therefore
    /// implements [`Queries`]. Each call runs in its own implicit transaction.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, StoreError> {
        Ok(self.pool.acquire().await?)
    }

    /// Execute `work` inside a single database transaction.
    ///
    /// `work` receives the transaction-bound connection. On success the
    /// transaction is committed and `work`'s value returned. On failure the
    /// transaction is rolled back and the original error returned; if the
    /// rollback fails too, both errors are returned as
    /// [`StoreError::Rollback`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let entry = store
    ///     .exec_tx(|conn| Box::pin(async move {
    ///         conn.create_entry(CreateEntryParams { account_id, amount }).await
    ///     }))
    ///     .await?;
    /// ```
    pub async fn exec_tx<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, StoreError>> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let outcome = match tokio::time::timeout(self.tx_timeout, work(&mut *tx)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.tx_timeout)),
        };

        match outcome {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!("Rolling back transaction: {}", err);
                Err(rollback_outcome(err, tx.rollback().await))
            }
        }
    }
}

/// Combine the error that aborted a unit of work with the result of its rollback.
///
/// The original error is never replaced: a failed rollback wraps it.
pub(crate) fn rollback_outcome(err: StoreError, rollback: Result<(), sqlx::Error>) -> StoreError {
    match rollback {
        Ok(()) => err,
        Err(rollback) => {
            tracing::error!("Rollback failed: {} (after: {})", rollback, err);
            StoreError::Rollback {
                source: Box::new(err),
                rollback,
            }
        }
    }
}
