//! Discount policies.

use domain::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::rate::Rate;

/// Computes a discount from an order's raw subtotal.
///
/// Implementations are pure: the same subtotal always yields the same
/// discount, which lies in `[0, subtotal]`.
pub trait DiscountPolicy: std::fmt::Debug + Send + Sync {
    /// Returns the name shown in pipeline descriptions.
    fn name(&self) -> &'static str;

    /// Returns the discount for the given subtotal.
    fn discount_amount(&self, subtotal: Money) -> Money;
}

/// Policy that never discounts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoDiscount;

impl DiscountPolicy for NoDiscount {
    fn name(&self) -> &'static str {
        "no_discount"
    }

    fn discount_amount(&self, _subtotal: Money) -> Money {
        Money::zero()
    }
}

/// Takes a percentage off once the subtotal reaches a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPercentDiscount {
    threshold: Money,
    percent: Rate,
}

impl ThresholdPercentDiscount {
    /// Creates the policy. `threshold` must be non-negative and `percent`
    /// within `[0, 1]`.
    pub fn new(threshold: Money, percent: Decimal) -> Result<Self> {
        if threshold.is_negative() {
            return Err(PricingError::InvalidArgument {
                argument: "threshold",
                value: threshold.amount(),
                reason: "must not be negative",
            });
        }

        let percent = Rate::new(percent).map_err(|_| PricingError::InvalidArgument {
            argument: "percent",
            value: percent,
            reason: "must be between 0 and 1",
        })?;

        Ok(Self { threshold, percent })
    }

    /// Returns the subtotal at which the discount starts to apply.
    pub fn threshold(&self) -> Money {
        self.threshold
    }

    /// Returns the discounted fraction.
    pub fn percent(&self) -> Rate {
        self.percent
    }
}

impl DiscountPolicy for ThresholdPercentDiscount {
    fn name(&self) -> &'static str {
        "threshold_percent"
    }

    fn discount_amount(&self, subtotal: Money) -> Money {
        if subtotal >= self.threshold {
            self.percent.of(subtotal)
        } else {
            Money::zero()
        }
    }
}

/// Serializable description of a discount policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountConfig {
    /// No discount.
    #[serde(rename = "none")]
    NoDiscount,

    /// Percentage off when the subtotal reaches the threshold.
    ThresholdPercent { threshold: Money, percent: Decimal },
}

impl DiscountConfig {
    /// Builds the described policy, validating its parameters.
    pub fn build(&self) -> Result<Box<dyn DiscountPolicy>> {
        match self {
            DiscountConfig::NoDiscount => Ok(Box::new(NoDiscount)),
            DiscountConfig::ThresholdPercent { threshold, percent } => Ok(Box::new(
                ThresholdPercentDiscount::new(*threshold, *percent)?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ten_percent_over_twenty() -> ThresholdPercentDiscount {
        ThresholdPercentDiscount::new(Money::from_units(20), dec("0.10")).unwrap()
    }

    #[test]
    fn test_no_discount_is_always_zero() {
        assert!(NoDiscount.discount_amount(Money::from_units(1000)).is_zero());
        assert!(NoDiscount.discount_amount(Money::zero()).is_zero());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let policy = ten_percent_over_twenty();
        assert_eq!(
            policy.discount_amount(Money::from_units(20)),
            Money::from_units(2)
        );
    }

    #[test]
    fn test_below_threshold_gets_nothing() {
        let policy = ten_percent_over_twenty();
        assert!(policy.discount_amount(Money::from_units(19)).is_zero());
        assert!(policy.discount_amount(Money::from_cents(1999)).is_zero());
    }

    #[test]
    fn test_discount_is_rounded_to_cents() {
        let policy = ThresholdPercentDiscount::new(Money::zero(), dec("0.15")).unwrap();
        // 33.33 * 0.15 = 4.9995
        assert_eq!(
            policy.discount_amount(Money::from_cents(3333)),
            Money::from_units(5)
        );
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let result = ThresholdPercentDiscount::new(Money::from_cents(-1), dec("0.1"));
        assert!(matches!(
            result,
            Err(PricingError::InvalidArgument {
                argument: "threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_percent_out_of_range_is_rejected() {
        for percent in ["-0.1", "1.1"] {
            let result = ThresholdPercentDiscount::new(Money::zero(), dec(percent));
            assert!(matches!(
                result,
                Err(PricingError::InvalidArgument {
                    argument: "percent",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_full_discount_never_exceeds_subtotal() {
        let policy = ThresholdPercentDiscount::new(Money::zero(), Decimal::ONE).unwrap();
        let subtotal = Money::from_cents(4321);
        assert_eq!(policy.discount_amount(subtotal), subtotal);
    }

    #[test]
    fn test_config_deserialization_and_build() {
        let config: DiscountConfig = serde_json::from_str(
            r#"{"type": "threshold_percent", "threshold": "20", "percent": "0.10"}"#,
        )
        .unwrap();
        let policy = config.build().unwrap();
        assert_eq!(policy.name(), "threshold_percent");
        assert_eq!(
            policy.discount_amount(Money::from_units(25)),
            Money::from_cents(250)
        );

        let none: DiscountConfig = serde_json::from_str(r#"{"type": "none"}"#).unwrap();
        assert_eq!(none, DiscountConfig::NoDiscount);
        assert_eq!(none.build().unwrap().name(), "no_discount");
    }

    #[test]
    fn test_config_build_validates() {
        let config = DiscountConfig::ThresholdPercent {
            threshold: Money::from_units(20),
            percent: dec("2"),
        };
        assert!(config.build().is_err());
    }
}
