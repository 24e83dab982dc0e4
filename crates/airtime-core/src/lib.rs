//! Core types for the airtime giveaway service.
//!
//! This crate provides the foundational types shared by the storage and HTTP
//! layers:
//!
//! - **Recipients**: [`Recipient`], validated and whitespace-normalized
//!   phone numbers
//! - **Money**: [`Amount`], fixed-point minor units, plus the giveaway
//!   constants [`TOPUP_AMOUNT`] and [`DEFAULT_CURRENCY`]
//! - **Transactions**: [`AirtimeTransaction`], [`TransactionStatus`]
//! - **Registry rows**: [`PhoneNumberRecord`]
//!
//! # Money representation
//!
//! Amounts are stored as `i64` minor units (1 unit = 0.01 of the currency) to
//! avoid floating point precision issues. The giveaway credits a fixed
//! `10.00` per number; the value is never caller-supplied.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod amount;
pub mod phone;
pub mod transaction;

pub use amount::{Amount, DEFAULT_CURRENCY, TOPUP_AMOUNT};
pub use phone::{PhoneNumberRecord, Recipient, RecipientError, MIN_RECIPIENT_LEN};
pub use transaction::{AirtimeTransaction, StatusError, TransactionStatus};
