//! Transfer service - moves money between two accounts atomically.
//!
//! A transfer writes one `transfers` row, two `entries` rows and two balance
//! updates inside a single database transaction (see [`Store::exec_tx`]).
//!
//! # Lock Ordering
//!
//! Updating an account balance takes that row's lock until commit. Two
//! transfers between the same pair of accounts in opposite directions would
//! deadlock if each locked its source first. Balances are therefore always
//! updated in ascending account id order, whatever the direction of the
//! transfer, which gives every transaction the same global lock order.

use serde::{Deserialize, Serialize};

use crate::{
    error::StoreError,
    models::{
        Account, Entry, Transfer, account::AddAccountBalanceParams, entry::CreateEntryParams,
        transfer::CreateTransferParams,
    },
    store::{Queries, Store},
};

/// Input of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

impl TransferTxParams {
    /// Reject parameters no transfer can be built from.
    ///
    /// - `amount` must be positive
    /// - source and destination must differ
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.amount <= 0 {
            return Err(StoreError::InvalidTransfer(
                "Amount must be positive".to_string(),
            ));
        }

        if self.from_account_id == self.to_account_id {
            return Err(StoreError::InvalidTransfer(
                "Cannot transfer to same account".to_string(),
            ));
        }

        Ok(())
    }
}

/// Everything a committed transfer wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}

/// The two balance mutations of a transfer, in lock order (ascending id).
pub fn balance_mutations(params: &TransferTxParams) -> [AddAccountBalanceParams; 2] {
    let debit = AddAccountBalanceParams {
        id: params.from_account_id,
        amount: -params.amount,
    };
    let credit = AddAccountBalanceParams {
        id: params.to_account_id,
        amount: params.amount,
    };

    if params.from_account_id < params.to_account_id {
        [debit, credit]
    } else {
        [credit, debit]
    }
}

/// Perform every write of a transfer through `q`.
///
/// Does not open a transaction itself; callers run it inside
/// [`Store::exec_tx`] so that a failure at any step discards all of them.
///
/// # Process
///
/// 1. Create the transfer record
/// 2. Create the debit entry (`-amount`) for the source account
/// 3. Create the credit entry (`+amount`) for the destination account
/// 4. Update both balances in ascending account id order
///
/// Parameters that fail [`TransferTxParams::validate`] are rejected before
/// the first write.
pub async fn apply_transfer<Q>(
    q: &mut Q,
    params: TransferTxParams,
) -> Result<TransferTxResult, StoreError>
where
    Q: Queries + ?Sized,
{
    params.validate()?;

    let transfer = q
        .create_transfer(CreateTransferParams {
            from_account_id: params.from_account_id,
            to_account_id: params.to_account_id,
            amount: params.amount,
        })
        .await?;

    let from_entry = q
        .create_entry(CreateEntryParams {
            account_id: params.from_account_id,
            amount: -params.amount,
        })
        .await?;

    let to_entry = q
        .create_entry(CreateEntryParams {
            account_id: params.to_account_id,
            amount: params.amount,
        })
        .await?;

    let [first, second] = balance_mutations(&params);
    let first_account = q.add_account_balance(first).await?;
    let second_account = q.add_account_balance(second).await?;

    let (from_account, to_account) = if first.id == params.from_account_id {
        (first_account, second_account)
    } else {
        (second_account, first_account)
    };

    Ok(TransferTxResult {
        transfer,
        from_account,
        to_account,
        from_entry,
        to_entry,
    })
}

/// Execute a transfer in its own database transaction.
///
/// # Errors
///
/// - `InvalidTransfer`: amount not positive, or source equals destination
/// - `NotFound`: either account does not exist
/// - `Database` / `Timeout`: backend failure; nothing was persisted and the
///   call may be retried
/// - `Rollback`: the failure above, plus a failed rollback
pub async fn transfer_tx(
    store: &Store,
    params: TransferTxParams,
) -> Result<TransferTxResult, StoreError> {
    params.validate()?;

    let result = store
        .exec_tx(move |conn| Box::pin(apply_transfer(conn, params)))
        .await?;

    tracing::info!(
        transfer_id = result.transfer.id,
        from_account_id = params.from_account_id,
        to_account_id = params.to_account_id,
        amount = params.amount,
        "Transfer committed"
    );

    Ok(result)
}
