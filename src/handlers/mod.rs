//! HTTP request handlers.
//!
//! Handlers validate the request, call into the store or a service and map
//! the outcome to JSON. Every handler receives the [`Store`](crate::store::Store)
//! as router state.

pub mod accounts;
pub mod health;
pub mod transfers;
