//! Serializable pipeline descriptions.

use domain::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::discount::DiscountConfig;
use crate::error::{PricingError, Result};
use crate::pipeline::CostPipeline;

/// One stage of a configured pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageConfig {
    /// Flat delivery fee.
    DeliveryFee { fee: Money },

    /// Fee applied to express orders only.
    ExpressFee { fee: Money },

    /// Tax on everything below this stage.
    Tax { rate: Decimal },

    /// Discount computed from the raw subtotal.
    Discount { policy: DiscountConfig },
}

/// Most stages a configured pipeline may hold.
///
/// Every stage at most doubles the running total and adds one capped fee,
/// so with subtotals and fees bounded by `Money::MAX` a chain this long
/// stays exact.
pub const MAX_STAGES: usize = 32;

/// Stages to wrap around the subtotal, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

impl PricingConfig {
    /// The conventional chain: delivery fee, express fee, tax, then discount.
    pub fn standard(
        delivery_fee: Money,
        express_fee: Money,
        tax_rate: Decimal,
        discount: DiscountConfig,
    ) -> Self {
        Self {
            stages: vec![
                StageConfig::DeliveryFee { fee: delivery_fee },
                StageConfig::ExpressFee { fee: express_fee },
                StageConfig::Tax { rate: tax_rate },
                StageConfig::Discount { policy: discount },
            ],
        }
    }

    /// Builds the pipeline, failing on the first invalid parameter.
    pub fn build(&self) -> Result<CostPipeline> {
        if self.stages.len() > MAX_STAGES {
            return Err(PricingError::InvalidArgument {
                argument: "stages",
                value: Decimal::from(self.stages.len()),
                reason: "too many stages",
            });
        }

        let mut pipeline = CostPipeline::subtotal();

        for stage in &self.stages {
            pipeline = match stage {
                StageConfig::DeliveryFee { fee } => pipeline.with_delivery_fee(*fee)?,
                StageConfig::ExpressFee { fee } => pipeline.with_express_fee(*fee)?,
                StageConfig::Tax { rate } => pipeline.with_tax(*rate)?,
                StageConfig::Discount { policy } => pipeline.with_discount(policy.build()?),
            };
        }

        tracing::debug!(stages = ?pipeline.describe(), "cost pipeline built");
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_config_builds_subtotal_only() {
        let pipeline = PricingConfig::default().build().unwrap();
        assert_eq!(pipeline.describe(), vec!["subtotal"]);
    }

    #[test]
    fn test_standard_config_stage_order() {
        let config = PricingConfig::standard(
            Money::from_units(3),
            Money::from_units(4),
            dec("0.20"),
            DiscountConfig::NoDiscount,
        );
        let pipeline = config.build().unwrap();
        assert_eq!(
            pipeline.describe(),
            vec!["discount", "tax", "express_fee", "delivery_fee", "subtotal"]
        );
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "stages": [
                { "stage": "delivery_fee", "fee": "3" },
                { "stage": "tax", "rate": "0.2" },
                { "stage": "discount", "policy": { "type": "none" } }
            ]
        }"#;
        let config: PricingConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.stages.len(), 3);
        assert_eq!(
            config.stages[0],
            StageConfig::DeliveryFee {
                fee: Money::from_units(3)
            }
        );
        assert_eq!(
            config.build().unwrap().describe(),
            vec!["discount", "tax", "delivery_fee", "subtotal"]
        );
    }

    #[test]
    fn test_invalid_stage_fails_build() {
        let config = PricingConfig {
            stages: vec![
                StageConfig::DeliveryFee {
                    fee: Money::from_units(3),
                },
                StageConfig::Tax { rate: dec("7") },
            ],
        };
        assert_eq!(
            config.build().unwrap_err(),
            PricingError::InvalidRate { rate: dec("7") }
        );
    }

    #[test]
    fn test_stage_count_is_capped() {
        let tax = StageConfig::Tax { rate: dec("0.01") };

        let at_limit = PricingConfig {
            stages: vec![tax.clone(); MAX_STAGES],
        };
        assert_eq!(at_limit.build().unwrap().len(), MAX_STAGES + 1);

        let over_limit = PricingConfig {
            stages: vec![tax; MAX_STAGES + 1],
        };
        assert!(matches!(
            over_limit.build(),
            Err(PricingError::InvalidArgument {
                argument: "stages",
                ..
            })
        ));
    }
}
