//! Pricing error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while constructing cost stages or discount policies.
///
/// Every parameter is checked when the stage or policy is built, so a
/// pipeline that exists can always compute a total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A rate outside `[0, 1]`.
    #[error("Invalid rate: {rate} (must be between 0 and 1)")]
    InvalidRate { rate: Decimal },

    /// A fee, threshold or percentage outside its valid range.
    #[error("Invalid argument {argument}: {value} ({reason})")]
    InvalidArgument {
        argument: &'static str,
        value: Decimal,
        reason: &'static str,
    },
}

impl PricingError {
    /// Returns a short, stable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::InvalidRate { .. } => "InvalidRate",
            PricingError::InvalidArgument { .. } => "InvalidArgument",
        }
    }
}

/// Result type for pricing construction.
pub type Result<T> = std::result::Result<T, PricingError>;
