//! Business logic services.
//!
//! Services hold the multi-statement operations that need a database
//! transaction. HTTP handlers call into them.

pub mod transfer_service;
