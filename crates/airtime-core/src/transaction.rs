//! Airtime transactions and their status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an airtime transaction.
///
/// A transaction starts `pending` and transitions exactly once to a terminal
/// state (`completed` or `failed`). `cancelled` exists in the schema but is
/// never assigned by the request handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
pub enum TransactionStatus {
    /// Created, provider outcome not yet known.
    Pending,
    /// Provider confirmed the top-up.
    Completed,
    /// Provider call failed or was declined.
    Failed,
    /// Reserved; unused by the request handler.
    Cancelled,
}

impl TransactionStatus {
    /// Lowercase string form, matching the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether this status is terminal (no further transition occurs).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(StatusError::Unknown(other.to_string())),
        }
    }
}

/// Errors produced when parsing a transaction status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    /// The value is not one of the four enumerated statuses.
    #[error("unknown transaction status: {0}")]
    Unknown(String),
}

/// A recorded top-up attempt.
///
/// Created in `pending` state once per attempt, then updated exactly once
/// with the terminal outcome of the provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AirtimeTransaction {
    /// Surrogate identity.
    pub id: i64,
    /// The recipient phone number (references the registry).
    pub phone_number: String,
    /// Credited value in minor units.
    pub amount_cents: i64,
    /// Currency code.
    pub currency: String,
    /// Current lifecycle state.
    pub status: TransactionStatus,
    /// Mobile network operator, when known. Not populated by current logic.
    pub network_provider: Option<String>,
    /// External correlation id, set when a terminal status is reached.
    pub transaction_reference: Option<String>,
    /// Creation timestamp, immutable.
    pub created_at: DateTime<Utc>,
    /// Set exactly when the status becomes terminal.
    pub processed_at: Option<DateTime<Utc>>,
}
