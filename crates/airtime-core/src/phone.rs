//! Recipient phone numbers and the registry row type.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum length of a raw recipient string before it is accepted.
pub const MIN_RECIPIENT_LEN: usize = 10;

/// A validated, whitespace-normalized recipient phone number.
///
/// Construction goes through [`Recipient::parse`], which applies the two
/// intake steps in order: the raw input must be present and at least
/// [`MIN_RECIPIENT_LEN`] characters long, and the accepted value then has all
/// whitespace stripped. The normalized form is what reaches the store and the
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Recipient(String);

impl Recipient {
    /// Validate and normalize a raw recipient string.
    ///
    /// # Errors
    ///
    /// Returns [`RecipientError::TooShort`] when the raw input is empty or
    /// shorter than [`MIN_RECIPIENT_LEN`] characters.
    pub fn parse(raw: &str) -> Result<Self, RecipientError> {
        if raw.len() < MIN_RECIPIENT_LEN {
            return Err(RecipientError::TooShort);
        }
        let normalized: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        Ok(Self(normalized))
    }

    /// The normalized phone number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the recipient, returning the normalized string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Recipient {
    type Err = RecipientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors produced when validating a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecipientError {
    /// The recipient was absent or shorter than the minimum length.
    #[error("recipient must be at least {MIN_RECIPIENT_LEN} characters")]
    TooShort,
}

/// A row in the phone number registry.
///
/// One row per distinct number; presence of a row makes the number
/// permanently ineligible for another top-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PhoneNumberRecord {
    /// Surrogate identity assigned at insertion.
    pub id: i64,
    /// The normalized phone number (unique natural key).
    pub phone_number: String,
    /// Insertion timestamp, immutable.
    pub created_at: DateTime<Utc>,
}
