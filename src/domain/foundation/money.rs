//! Money value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount in US cents. Inventory prices are mock values, so a single currency is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Creates an amount from cents.
    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates an amount from whole dollars.
    pub fn from_dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Multiplies by a count (nights, guests, days).
    pub fn times(&self, count: u32) -> Self {
        Self(self.0 * u64::from(count))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0 / 100;
        let cents = self.0 % 100;
        if cents == 0 {
            write!(f, "${}", dollars)
        } else {
            write!(f, "${}.{:02}", dollars, cents)
        }
    }
}
