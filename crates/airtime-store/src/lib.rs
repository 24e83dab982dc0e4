//! Storage layer for the airtime giveaway service.
//!
//! This crate owns all database operations, backed by SQLite through `sqlx`:
//!
//! - Connection pool management ([`Database`], [`DbConfig`])
//! - Embedded schema migrations
//! - Repositories for the phone number registry and the transaction log
//!
//! Consistency is provided entirely by the store's constraints: the unique
//! index on `phone_numbers.phone_number` is the actual gate against serving a
//! number twice, and the foreign key from `airtime_transactions` enforces the
//! number-first insert order. The layer holds no in-process locks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
mod migrations;
pub mod pool;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use repository::phone_number::PhoneNumberRepository;
pub use repository::transaction::TransactionRepository;
