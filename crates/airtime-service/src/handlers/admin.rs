//! Admin listing handlers.
//!
//! JSON sources for the operator views: which numbers have been served and
//! what happened to each top-up attempt. Read-only.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use airtime_core::{AirtimeTransaction, Amount, PhoneNumberRecord, TransactionStatus};

use crate::error::ApiError;
use crate::state::AppState;

/// A served number, as listed.
#[derive(Debug, Serialize)]
pub struct NumberEntry {
    /// Registry row id.
    pub id: i64,
    /// The served phone number.
    pub phone_number: String,
    /// When the number was served.
    pub created_at: String,
}

impl From<&PhoneNumberRecord> for NumberEntry {
    fn from(record: &PhoneNumberRecord) -> Self {
        Self {
            id: record.id,
            phone_number: record.phone_number.clone(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Response for the number listing.
#[derive(Debug, Serialize)]
pub struct NumberListResponse {
    /// Total served numbers.
    pub count: usize,
    /// Numbers, most recently served first.
    pub numbers: Vec<NumberEntry>,
}

/// List all served numbers, most recent first.
pub async fn list_numbers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NumberListResponse>, ApiError> {
    let records = state.db.phone_numbers().get_all().await?;

    Ok(Json(NumberListResponse {
        count: records.len(),
        numbers: records.iter().map(NumberEntry::from).collect(),
    }))
}

/// A transaction, as listed.
#[derive(Debug, Serialize)]
pub struct TransactionEntry {
    /// Transaction row id.
    pub id: i64,
    /// The recipient phone number.
    pub phone_number: String,
    /// Credited amount, formatted with two decimals.
    pub amount: String,
    /// Currency code.
    pub currency: String,
    /// Lifecycle state.
    pub status: TransactionStatus,
    /// External correlation id, when assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Terminal-transition timestamp, when reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
}

impl From<&AirtimeTransaction> for TransactionEntry {
    fn from(tx: &AirtimeTransaction) -> Self {
        Self {
            id: tx.id,
            phone_number: tx.phone_number.clone(),
            amount: Amount::from_minor_units(tx.amount_cents).to_string(),
            currency: tx.currency.clone(),
            status: tx.status,
            reference: tx.transaction_reference.clone(),
            created_at: tx.created_at.to_rfc3339(),
            processed_at: tx.processed_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Response for the transaction listing.
#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    /// The queried phone number.
    pub phone_number: String,
    /// Total transactions for the number.
    pub count: usize,
    /// Transactions, most recent first.
    pub transactions: Vec<TransactionEntry>,
}

/// List a number's transactions, most recent first.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Path(phone_number): Path<String>,
) -> Result<Json<TransactionListResponse>, ApiError> {
    let txs = state
        .db
        .transactions()
        .get_by_phone_number(&phone_number)
        .await?;

    Ok(Json(TransactionListResponse {
        phone_number,
        count: txs.len(),
        transactions: txs.iter().map(TransactionEntry::from).collect(),
    }))
}
