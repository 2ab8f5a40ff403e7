//! Fractional rates used for tax and percentage discounts.

use domain::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// A fraction in `[0, 1]`, e.g. `0.20` for 20%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rate(Decimal);

impl Rate {
    /// Creates a rate, failing with `InvalidRate` outside `[0, 1]`.
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(PricingError::InvalidRate { rate: value });
        }
        Ok(Self(value))
    }

    /// The zero rate.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the rate as a decimal fraction.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Applies the rate to an amount, rounding the result to cents.
    pub fn of(&self, amount: Money) -> Money {
        amount.portion(self.0)
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = PricingError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}
