//! Data models representing database entities.
//!
//! Accounts are the root rows. Entries and transfers are append-only and
//! reference accounts by id.

pub mod account;
pub mod currency;
pub mod entry;
pub mod transfer;

pub use account::Account;
pub use currency::Currency;
pub use entry::Entry;
pub use transfer::Transfer;
