//! In-memory [`Queries`] implementation for unit tests.
//!
//! Records the order of balance mutations and can be told to fail them.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;

use super::Queries;
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

#[derive(Debug, Default)]
pub struct MockQueries {
    pub accounts: BTreeMap<i64, Account>,
    pub entries: Vec<Entry>,
    pub transfers: Vec<Transfer>,
    /// Every balance mutation attempted, in call order
    pub balance_calls: Vec<AddAccountBalanceParams>,
    /// Fail the n-th (0-based) balance mutation with a data access error
    pub fail_balance_call: Option<usize>,
    next_id: i64,
}

impl MockQueries {
    /// Seed accounts with explicit ids and balances.
    pub fn with_accounts(accounts: &[(i64, i64)]) -> Self {
        let mut mock = Self::default();
        for &(id, balance) in accounts {
            mock.accounts.insert(
                id,
                Account {
                    id,
                    owner: format!("owner-{id}"),
                    balance,
                    currency: "USD".to_string(),
                    created_at: Utc::now(),
                },
            );
        }
        mock.next_id = accounts.iter().map(|&(id, _)| id).max().unwrap_or(0);
        mock
    }

    pub fn balance(&self, id: i64) -> i64 {
        self.accounts[&id].balance
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn require_account(&self, id: i64) -> Result<(), StoreError> {
        if self.accounts.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}

fn page<T: Clone>(rows: impl Iterator<Item = T>, limit: i64, offset: i64) -> Vec<T> {
    rows.skip(offset as usize).take(limit as usize).collect()
}

#[async_trait]
impl Queries for MockQueries {
    async fn create_account(
        &mut self,
        params: CreateAccountParams,
    ) -> Result<Account, StoreError> {
        let id = self.next_id();
        let account = Account {
            id,
            owner: params.owner,
            balance: params.balance,
            currency: params.currency,
            created_at: Utc::now(),
        };
        self.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn get_account(&mut self, id: i64) -> Result<Account, StoreError> {
        self.accounts.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list_accounts(
        &mut self,
        params: ListAccountsParams,
    ) -> Result<Vec<Account>, StoreError> {
        Ok(page(
            self.accounts.values().cloned(),
            params.limit,
            params.offset,
        ))
    }

    async fn update_account(
        &mut self,
        params: UpdateAccountParams,
    ) -> Result<Account, StoreError> {
        let account = self
            .accounts
            .get_mut(&params.id)
            .ok_or(StoreError::NotFound)?;
        account.balance = params.balance;
        Ok(account.clone())
    }

    async fn delete_account(&mut self, id: i64) -> Result<(), StoreError> {
        self.accounts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn add_account_balance(
        &mut self,
        params: AddAccountBalanceParams,
    ) -> Result<Account, StoreError> {
        let call = self.balance_calls.len();
        self.balance_calls.push(params);
        if self.fail_balance_call == Some(call) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }

        let account = self
            .accounts
            .get_mut(&params.id)
            .ok_or(StoreError::NotFound)?;
        account.balance += params.amount;
        Ok(account.clone())
    }

    async fn create_entry(&mut self, params: CreateEntryParams) -> Result<Entry, StoreError> {
        self.require_account(params.account_id)?;
        let entry = Entry {
            id: self.next_id(),
            account_id: params.account_id,
            amount: params.amount,
            created_at: Utc::now(),
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    async fn get_entry(&mut self, id: i64) -> Result<Entry, StoreError> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_entries(
        &mut self,
        params: ListEntriesParams,
    ) -> Result<Vec<Entry>, StoreError> {
        let rows = self
            .entries
            .iter()
            .filter(|e| e.account_id == params.account_id)
            .cloned();
        Ok(page(rows, params.limit, params.offset))
    }

    async fn create_transfer(
        &mut self,
        params: CreateTransferParams,
    ) -> Result<Transfer, StoreError> {
        self.require_account(params.from_account_id)?;
        self.require_account(params.to_account_id)?;
        let transfer = Transfer {
            id: self.next_id(),
            from_account_id: params.from_account_id,
            to_account_id: params.to_account_id,
            amount: params.amount,
            created_at: Utc::now(),
        };
        self.transfers.push(transfer.clone());
        Ok(transfer)
    }

    async fn get_transfer(&mut self, id: i64) -> Result<Transfer, StoreError> {
        self.transfers
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_transfers(
        &mut self,
        params: ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError> {
        let rows = self
            .transfers
            .iter()
            .filter(|t| {
                t.from_account_id == params.from_account_id
                    || t.to_account_id == params.to_account_id
            })
            .cloned();
        Ok(page(rows, params.limit, params.offset))
    }
}
