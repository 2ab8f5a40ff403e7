//! Cost stages: the links of a cost pipeline.
//!
//! Every stage except [`SubtotalStage`] owns exactly one inner stage. A
//! stage computes its inner stage's total first and then applies its own
//! adjustment, so the order in which stages are wrapped is the order in
//! which adjustments are applied.

use domain::{Money, Order};
use rust_decimal::Decimal;

use crate::discount::DiscountPolicy;
use crate::error::{PricingError, Result};
use crate::rate::Rate;

/// A node in a cost pipeline.
pub trait CostStage: std::fmt::Debug + Send + Sync {
    /// Returns the stage name.
    fn name(&self) -> &'static str;

    /// Computes the order total up to and including this stage.
    fn compute_total(&self, order: &Order) -> Money;

    /// Returns the wrapped stage, or `None` for the terminal stage.
    fn inner(&self) -> Option<&dyn CostStage>;
}

/// Owned, type-erased stage.
pub type BoxedStage = Box<dyn CostStage>;

fn checked_fee(argument: &'static str, fee: Money) -> Result<Money> {
    if fee.is_negative() {
        return Err(PricingError::InvalidArgument {
            argument,
            value: fee.amount(),
            reason: "must not be negative",
        });
    }
    if fee > Money::MAX {
        return Err(PricingError::InvalidArgument {
            argument,
            value: fee.amount(),
            reason: "must not exceed the maximum amount",
        });
    }
    Ok(fee)
}

/// Terminal stage: the sum of all line totals.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubtotalStage;

impl CostStage for SubtotalStage {
    fn name(&self) -> &'static str {
        "subtotal"
    }

    fn compute_total(&self, order: &Order) -> Money {
        order.subtotal()
    }

    fn inner(&self) -> Option<&dyn CostStage> {
        None
    }
}

/// Adds a flat delivery fee.
#[derive(Debug)]
pub struct DeliveryFeeStage {
    inner: BoxedStage,
    fee: Money,
}

impl DeliveryFeeStage {
    /// Wraps `inner`, failing if `fee` is negative or above `Money::MAX`.
    pub fn new(inner: BoxedStage, fee: Money) -> Result<Self> {
        let fee = checked_fee("delivery_fee", fee)?;
        Ok(Self { inner, fee })
    }

    /// Returns the fee.
    pub fn fee(&self) -> Money {
        self.fee
    }
}

impl CostStage for DeliveryFeeStage {
    fn name(&self) -> &'static str {
        "delivery_fee"
    }

    fn compute_total(&self, order: &Order) -> Money {
        let total = self.inner.compute_total(order) + self.fee;
        tracing::trace!(stage = self.name(), fee = %self.fee, %total);
        total
    }

    fn inner(&self) -> Option<&dyn CostStage> {
        Some(self.inner.as_ref())
    }
}

/// Adds an express fee, but only for orders that requested express delivery.
///
/// Orders without delivery options pass through unchanged.
#[derive(Debug)]
pub struct ExpressFeeStage {
    inner: BoxedStage,
    fee: Money,
}

impl ExpressFeeStage {
    /// Wraps `inner`, failing if `fee` is negative or above `Money::MAX`.
    pub fn new(inner: BoxedStage, fee: Money) -> Result<Self> {
        let fee = checked_fee("express_fee", fee)?;
        Ok(Self { inner, fee })
    }

    /// Returns the fee.
    pub fn fee(&self) -> Money {
        self.fee
    }
}

impl CostStage for ExpressFeeStage {
    fn name(&self) -> &'static str {
        "express_fee"
    }

    fn compute_total(&self, order: &Order) -> Money {
        let total = self.inner.compute_total(order);
        if !order.is_express() {
            return total;
        }

        let total = total + self.fee;
        tracing::trace!(stage = self.name(), fee = %self.fee, %total);
        total
    }

    fn inner(&self) -> Option<&dyn CostStage> {
        Some(self.inner.as_ref())
    }
}

/// Adds tax on the inner total: `inner + round(inner * rate, 2)`.
#[derive(Debug)]
pub struct TaxStage {
    inner: BoxedStage,
    rate: Rate,
}

impl TaxStage {
    /// Wraps `inner`, failing with `InvalidRate` outside `[0, 1]`.
    pub fn new(inner: BoxedStage, rate: Decimal) -> Result<Self> {
        let rate = Rate::new(rate)?;
        Ok(Self { inner, rate })
    }

    /// Returns the tax rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }
}

impl CostStage for TaxStage {
    fn name(&self) -> &'static str {
        "tax"
    }

    fn compute_total(&self, order: &Order) -> Money {
        let base = self.inner.compute_total(order);
        let tax = self.rate.of(base);
        tracing::trace!(stage = self.name(), rate = %self.rate, %base, %tax);
        base + tax
    }

    fn inner(&self) -> Option<&dyn CostStage> {
        Some(self.inner.as_ref())
    }
}

/// Subtracts a discount, never going below zero.
///
/// The discount is computed from the order's raw subtotal, re-derived from
/// its lines, regardless of which fees or taxes the inner stages added.
#[derive(Debug)]
pub struct DiscountStage {
    inner: BoxedStage,
    policy: Box<dyn DiscountPolicy>,
}

impl DiscountStage {
    /// Wraps `inner` with the given policy.
    pub fn new(inner: BoxedStage, policy: Box<dyn DiscountPolicy>) -> Self {
        Self { inner, policy }
    }

    /// Returns the discount this stage takes off the given order.
    pub fn discount_for(&self, order: &Order) -> Money {
        self.policy.discount_amount(order.subtotal())
    }
}

impl CostStage for DiscountStage {
    fn name(&self) -> &'static str {
        "discount"
    }

    fn compute_total(&self, order: &Order) -> Money {
        let total = self.inner.compute_total(order);
        let discount = self.discount_for(order);
        tracing::trace!(
            stage = self.name(),
            policy = self.policy.name(),
            %discount,
            %total
        );
        (total - discount).floor_at_zero()
    }

    fn inner(&self) -> Option<&dyn CostStage> {
        Some(self.inner.as_ref())
    }
}
