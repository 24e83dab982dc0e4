//! Provider wire types and the normalized call outcome.

use serde::Deserialize;
use serde_json::Value;

/// Provider status code indicating a delivered top-up.
pub const STATUS_DELIVERED: &str = "00";

/// Provider status code indicating the top-up was accepted but has not
/// completed yet.
pub const STATUS_PENDING: &str = "09";

/// Raw response body from the top-up API.
///
/// The provider is not consistent across endpoints and versions: some
/// responses use the simple `{success, message, transactionId}` shape,
/// others carry `status-code`, `trans-id`, a `pending` flag and balance
/// fields. Every field is optional so either shape decodes.
#[derive(Debug, Deserialize)]
pub struct RawTopUpResponse {
    /// Simple-shape success flag.
    #[serde(default)]
    pub success: Option<bool>,

    /// Human-readable provider message.
    #[serde(default)]
    pub message: Option<String>,

    /// External correlation id.
    #[serde(default, rename = "transactionId", alias = "trans-id")]
    pub transaction_id: Option<String>,

    /// Rich-shape status code (`"00"` delivered, `"09"` pending).
    #[serde(default, rename = "status-code")]
    pub status_code: Option<String>,

    /// Rich-shape pending flag.
    #[serde(default)]
    pub pending: Option<bool>,

    /// Remaining retailer balance after the top-up, relayed verbatim.
    #[serde(default, rename = "balance-after")]
    pub balance_after: Option<Value>,
}

impl RawTopUpResponse {
    /// Normalizes a decoded body into a [`TopUpOutcome`].
    #[must_use]
    pub fn into_outcome(self) -> TopUpOutcome {
        let pending = self.pending == Some(true)
            || self.status_code.as_deref() == Some(STATUS_PENDING);
        let delivered = self.success == Some(true)
            || self.status_code.as_deref() == Some(STATUS_DELIVERED);

        if pending {
            TopUpOutcome::Pending {
                reference: self.transaction_id,
                message: self
                    .message
                    .unwrap_or_else(|| "Top-up is pending at the provider".to_string()),
            }
        } else if delivered {
            TopUpOutcome::Delivered {
                reference: self.transaction_id,
                message: self
                    .message
                    .unwrap_or_else(|| "Airtime sent successfully".to_string()),
                balance: self.balance_after,
            }
        } else {
            TopUpOutcome::Failed {
                kind: ProviderFailure::Declined,
                message: self
                    .message
                    .unwrap_or_else(|| "Top-up was declined by the provider".to_string()),
            }
        }
    }
}

/// Normalized result of a provider call.
///
/// The adapter never returns an error: every failure mode is folded into
/// [`TopUpOutcome::Failed`] with a [`ProviderFailure`] class the handler maps
/// to an HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub enum TopUpOutcome {
    /// The provider confirmed the credit.
    Delivered {
        /// External correlation id, when the provider assigned one.
        reference: Option<String>,
        /// Provider message relayed to the caller.
        message: String,
        /// Remaining retailer balance, when reported.
        balance: Option<Value>,
    },

    /// The provider accepted the request but has not completed it.
    Pending {
        /// External correlation id, when already assigned.
        reference: Option<String>,
        /// Provider message relayed to the caller.
        message: String,
    },

    /// The top-up did not happen.
    Failed {
        /// Which failure shape was hit.
        kind: ProviderFailure,
        /// Message relayed to the caller.
        message: String,
    },
}

impl TopUpOutcome {
    /// A delivered outcome with the given deterministic reference, used when
    /// the service runs without provider I/O.
    #[must_use]
    pub fn simulated(reference: String) -> Self {
        TopUpOutcome::Delivered {
            reference: Some(reference),
            message: "Airtime sent successfully".to_string(),
            balance: None,
        }
    }
}

/// Classification of provider failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFailure {
    /// Well-formed 2xx response whose body indicates non-success.
    Declined,

    /// The provider answered with the given non-2xx HTTP status.
    Rejected(u16),

    /// The provider could not be reached (connect error, timeout).
    Unreachable,

    /// The response body could not be decoded.
    BadResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_success_shape() {
        let raw: RawTopUpResponse = serde_json::from_str(
            r#"{"success": true, "message": "Airtime sent successfully", "transactionId": "T1"}"#,
        )
        .unwrap();

        let outcome = raw.into_outcome();
        assert_eq!(
            outcome,
            TopUpOutcome::Delivered {
                reference: Some("T1".to_string()),
                message: "Airtime sent successfully".to_string(),
                balance: None,
            }
        );
    }

    #[test]
    fn rich_success_shape() {
        let raw: RawTopUpResponse = serde_json::from_str(
            r#"{"status-code": "00", "message": "ok", "trans-id": "ABC", "balance-after": 123.45}"#,
        )
        .unwrap();

        match raw.into_outcome() {
            TopUpOutcome::Delivered {
                reference, balance, ..
            } => {
                assert_eq!(reference.as_deref(), Some("ABC"));
                assert!(balance.is_some());
            }
            other => panic!("expected delivered, got {other:?}"),
        }
    }

    #[test]
    fn pending_status_code() {
        let raw: RawTopUpResponse =
            serde_json::from_str(r#"{"status-code": "09", "message": "TRANSACTION PENDING"}"#)
                .unwrap();

        assert!(matches!(raw.into_outcome(), TopUpOutcome::Pending { .. }));
    }

    #[test]
    fn pending_flag_wins_over_success() {
        let raw: RawTopUpResponse =
            serde_json::from_str(r#"{"success": true, "pending": true}"#).unwrap();

        assert!(matches!(raw.into_outcome(), TopUpOutcome::Pending { .. }));
    }

    #[test]
    fn embedded_failure_is_declined() {
        let raw: RawTopUpResponse =
            serde_json::from_str(r#"{"success": false, "message": "Invalid request"}"#).unwrap();

        assert_eq!(
            raw.into_outcome(),
            TopUpOutcome::Failed {
                kind: ProviderFailure::Declined,
                message: "Invalid request".to_string(),
            }
        );
    }

    #[test]
    fn empty_body_is_declined() {
        let raw: RawTopUpResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            raw.into_outcome(),
            TopUpOutcome::Failed {
                kind: ProviderFailure::Declined,
                ..
            }
        ));
    }
}
