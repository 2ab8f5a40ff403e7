//! Owning handle over a chain of cost stages.

use domain::{Money, Order};
use rust_decimal::Decimal;

use crate::discount::DiscountPolicy;
use crate::error::Result;
use crate::stage::{
    BoxedStage, CostStage, DeliveryFeeStage, DiscountStage, ExpressFeeStage, SubtotalStage,
    TaxStage,
};

/// A cost pipeline, built bottom-up from the subtotal.
///
/// ```text
/// CostPipeline::subtotal()          subtotal
///     .with_delivery_fee(3)?        └─ delivery_fee
///     .with_express_fee(4)?            └─ express_fee
///     .with_tax(0.20)?                    └─ tax
///     .with_discount(policy)                 └─ discount   (outermost)
/// ```
///
/// Each `with_*` call wraps the current chain, so adjustments apply in the
/// order they were added. The pipeline does not reorder or validate the
/// sequence itself.
#[derive(Debug)]
pub struct CostPipeline {
    outer: BoxedStage,
}

impl CostPipeline {
    /// Starts a pipeline containing only the subtotal stage.
    pub fn subtotal() -> Self {
        Self::from_stage(Box::new(SubtotalStage))
    }

    /// Wraps an already assembled chain.
    pub fn from_stage(outer: BoxedStage) -> Self {
        Self { outer }
    }

    /// Adds a flat delivery fee on top of the current chain.
    pub fn with_delivery_fee(self, fee: Money) -> Result<Self> {
        Ok(Self::from_stage(Box::new(DeliveryFeeStage::new(
            self.outer, fee,
        )?)))
    }

    /// Adds an express fee on top of the current chain.
    pub fn with_express_fee(self, fee: Money) -> Result<Self> {
        Ok(Self::from_stage(Box::new(ExpressFeeStage::new(
            self.outer, fee,
        )?)))
    }

    /// Adds tax on top of the current chain.
    pub fn with_tax(self, rate: Decimal) -> Result<Self> {
        Ok(Self::from_stage(Box::new(TaxStage::new(self.outer, rate)?)))
    }

    /// Adds a discount on top of the current chain.
    pub fn with_discount(self, policy: Box<dyn DiscountPolicy>) -> Self {
        Self::from_stage(Box::new(DiscountStage::new(self.outer, policy)))
    }

    /// Returns stage names from the outermost stage down to the subtotal.
    pub fn describe(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut stage: Option<&dyn CostStage> = Some(self.outer.as_ref());
        while let Some(current) = stage {
            names.push(current.name());
            stage = current.inner();
        }
        names
    }

    /// Returns the number of stages, including the subtotal.
    pub fn len(&self) -> usize {
        self.describe().len()
    }

    /// Always false: a pipeline has at least its terminal stage.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Computes the order's total.
    #[tracing::instrument(skip_all, fields(order_id = %order.id()))]
    pub fn compute_total(&self, order: &Order) -> Money {
        let total = self.outer.compute_total(order);
        metrics::counter!("pricing_totals_computed").increment(1);
        tracing::debug!(%total, stages = self.len(), "order total computed");
        total
    }

    /// Returns the outermost stage.
    pub fn into_stage(self) -> BoxedStage {
        self.outer
    }
}

impl Default for CostPipeline {
    fn default() -> Self {
        Self::subtotal()
    }
}
