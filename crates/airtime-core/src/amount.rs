//! Monetary amounts in fixed-point minor units.

use std::fmt;

use serde::{Serialize, Serializer};

/// The fixed top-up value credited to each eligible number (10.00).
///
/// This is a constant owned by the service, never taken from caller input.
pub const TOPUP_AMOUNT: Amount = Amount::from_minor_units(1000);

/// Default currency code for recorded transactions.
pub const DEFAULT_CURRENCY: &str = "NGN";

/// A monetary amount in minor units (1 unit = 0.01 of the currency).
///
/// Serializes and displays as a two-decimal string (`"10.00"`), which is the
/// format the provider API and response payloads expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from minor units (e.g. 1000 → 10.00).
    #[must_use]
    pub const fn from_minor_units(units: i64) -> Self {
        Self(units)
    }

    /// Return the raw minor-unit value.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, (self.0 % 100).abs())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
