//! Airtime giveaway HTTP API service.
//!
//! This crate provides the HTTP API for the one-time airtime giveaway:
//!
//! - Top-up requests with a persistent one-per-number anti-abuse check
//! - The external top-up provider adapter
//! - Admin listings of served numbers and transactions
//!
//! # Flow
//!
//! A top-up request runs a strictly sequential chain: validate → duplicate
//! check → register number → create pending transaction → provider call →
//! terminal status update → response. The registry's unique constraint is
//! the sole abuse-prevention mechanism; there is no in-process cooldown
//! state, so restarts and multiple instances behave identically.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod provider;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use provider::{ProviderClient, ProviderFailure, TopUpOutcome};
pub use routes::create_router;
pub use state::AppState;
