//! Simple Bank - ledger engine
//!
//! Maintains account balances and records every balance movement as an
//! immutable entry. Transfers between two accounts are executed atomically
//! and are safe to run concurrently.
//!
//! # Modules
//!
//! - [`store`] - Row-level queries and the transaction executor
//! - [`services::transfer_service`] - Atomic, deadlock-free transfers
//! - [`models`] - Accounts, entries, transfers
//! - [`handlers`] / [`app`] - HTTP surface
//! - [`config`] / [`db`] / [`error`] - Configuration, pool, error taxonomy

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

pub use error::{AppError, StoreError};
pub use services::transfer_service::{TransferTxParams, TransferTxResult, transfer_tx};
pub use store::{Queries, Store};
