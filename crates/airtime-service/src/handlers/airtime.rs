//! Top-up request handler.
//!
//! One POST endpoint drives the whole flow: validate the recipient, reject
//! numbers that were already served, register the number, record a pending
//! transaction, call the provider (or simulate it outside production) and
//! finalize the transaction with the outcome.
//!
//! The registration happens *before* the provider call so the number stays
//! ineligible even when the external call fails. The `find_by_number`
//! pre-check only exists to answer with a friendly 403 without writing; the
//! insert-or-ignore save is the actual gate, and a `None` result from it
//! means a concurrent request for the same number won the race.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use airtime_core::{Recipient, TransactionStatus, TOPUP_AMOUNT};

use crate::error::ApiError;
use crate::provider::{ProviderFailure, TopUpOutcome};
use crate::state::AppState;

/// Top-up request body.
#[derive(Debug, Deserialize)]
pub struct TopUpRequest {
    /// The phone number to credit.
    pub recipient: Option<String>,

    /// Legacy field still sent by older clients; accepted and ignored.
    #[serde(default)]
    pub retailer: Option<String>,

    /// Legacy field still sent by older clients; accepted and ignored.
    #[serde(default)]
    pub amount: Option<String>,
}

/// Top-up response body.
#[derive(Debug, Serialize)]
pub struct TopUpResponse {
    /// Whether the top-up was delivered.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Outcome details, absent on validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TopUpData>,
}

/// Outcome details relayed to the caller.
#[derive(Debug, Serialize)]
pub struct TopUpData {
    /// The normalized recipient.
    pub recipient: String,
    /// The credited amount, formatted with two decimals.
    pub amount: String,
    /// Provider outcome: `completed`, `pending` or `failed`.
    pub status: &'static str,
    /// External correlation id, when one was assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Remaining retailer balance, when the provider reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Value>,
}

/// Handle a top-up request.
pub async fn request_topup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TopUpRequest>,
) -> Result<(StatusCode, Json<TopUpResponse>), ApiError> {
    let raw = body.recipient.as_deref().unwrap_or_default();
    let recipient = Recipient::parse(raw).map_err(|_| ApiError::InvalidInput)?;

    tracing::debug!(recipient = %recipient, "Processing top-up request");

    // Advisory pre-check for the friendly 403; the save below is the gate.
    if state
        .db
        .phone_numbers()
        .find_by_number(recipient.as_str())
        .await?
        .is_some()
    {
        return Err(ApiError::AlreadyServed);
    }

    // Register before contacting the provider so the number is marked
    // ineligible even if the external call fails.
    if state
        .db
        .phone_numbers()
        .save(recipient.as_str())
        .await?
        .is_none()
    {
        // A concurrent request for the same number committed first.
        tracing::debug!(recipient = %recipient, "Number registered between check and save");
        return Err(ApiError::AlreadyServed);
    }

    let tx = state
        .db
        .transactions()
        .create(recipient.as_str(), TOPUP_AMOUNT, None)
        .await?;

    let outcome = if state.config.simulate_provider() {
        tracing::info!(
            recipient = %recipient,
            transaction_id = tx.id,
            "Simulating provider call"
        );
        TopUpOutcome::simulated(format!("SIM-{}", tx.id))
    } else if let Some(provider) = &state.provider {
        provider.send_airtime(recipient.as_str(), TOPUP_AMOUNT).await
    } else {
        TopUpOutcome::Failed {
            kind: ProviderFailure::Unreachable,
            message: "Airtime provider is not configured".to_string(),
        }
    };

    finalize_transaction(&state, tx.id, &outcome).await;

    let (status, response) = compose_response(&recipient, &outcome);

    tracing::info!(
        recipient = %recipient,
        transaction_id = tx.id,
        success = response.success,
        "Top-up request finished"
    );

    Ok((status, Json(response)))
}

/// Record the terminal transaction status.
///
/// Best-effort bookkeeping: the response is already decided from the
/// provider outcome, so a failure here is logged and swallowed rather than
/// turned into an error for the caller.
async fn finalize_transaction(state: &AppState, id: i64, outcome: &TopUpOutcome) {
    let (status, reference) = match outcome {
        TopUpOutcome::Delivered { reference, .. } => {
            (TransactionStatus::Completed, reference.clone())
        }
        TopUpOutcome::Pending { .. } | TopUpOutcome::Failed { .. } => {
            (TransactionStatus::Failed, None)
        }
    };

    match state
        .db
        .transactions()
        .update_status(id, status, reference.as_deref())
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::warn!(transaction_id = id, "Transaction vanished before status update");
        }
        Err(e) => {
            tracing::warn!(
                transaction_id = id,
                error = %e,
                "Failed to record transaction outcome"
            );
        }
    }
}

/// Map the provider outcome onto the HTTP response.
fn compose_response(
    recipient: &Recipient,
    outcome: &TopUpOutcome,
) -> (StatusCode, TopUpResponse) {
    let data = |status, reference: &Option<String>, balance: Option<Value>| TopUpData {
        recipient: recipient.as_str().to_string(),
        amount: TOPUP_AMOUNT.to_string(),
        status,
        reference: reference.clone(),
        balance,
    };

    match outcome {
        TopUpOutcome::Delivered {
            reference,
            message,
            balance,
        } => (
            StatusCode::OK,
            TopUpResponse {
                success: true,
                message: message.clone(),
                data: Some(data("completed", reference, balance.clone())),
            },
        ),
        TopUpOutcome::Pending { reference, message } => (
            StatusCode::OK,
            TopUpResponse {
                success: false,
                message: message.clone(),
                data: Some(data("pending", reference, None)),
            },
        ),
        TopUpOutcome::Failed { kind, message } => {
            let status = match kind {
                ProviderFailure::Declined => StatusCode::OK,
                ProviderFailure::Rejected(404) => StatusCode::NOT_FOUND,
                ProviderFailure::Rejected(_) => StatusCode::BAD_REQUEST,
                ProviderFailure::Unreachable | ProviderFailure::BadResponse => {
                    StatusCode::BAD_GATEWAY
                }
            };
            (
                status,
                TopUpResponse {
                    success: false,
                    message: message.clone(),
                    data: Some(data("failed", &None, None)),
                },
            )
        }
    }
}
