//! Cost computation for delivery orders.
//!
//! A [`CostPipeline`] is a chain of [`CostStage`]s wrapped around a
//! subtotal: delivery fee, express fee, tax and discount stages each take
//! the total of the stage they wrap and apply their own adjustment.
//! Discounts come from pluggable [`DiscountPolicy`] implementations.

pub mod config;
pub mod discount;
pub mod error;
pub mod pipeline;
pub mod rate;
pub mod stage;

pub use config::{MAX_STAGES, PricingConfig, StageConfig};
pub use discount::{DiscountConfig, DiscountPolicy, NoDiscount, ThresholdPercentDiscount};
pub use error::{PricingError, Result};
pub use pipeline::CostPipeline;
pub use rate::Rate;
pub use stage::{
    BoxedStage, CostStage, DeliveryFeeStage, DiscountStage, ExpressFeeStage, SubtotalStage,
    TaxStage,
};
