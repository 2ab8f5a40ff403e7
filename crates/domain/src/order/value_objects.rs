//! Value objects for the order domain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OrderError;

/// Identifier assigned to every order when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Draws a fresh random ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog item identifier (SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new item ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the item ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Monetary amount held as an exact decimal.
///
/// Amounts never pass through binary floating point, so chained fee and tax
/// adjustments cannot accumulate drift.
///
/// Prices, line totals, order subtotals and fees are all capped at
/// [`Money::MAX`]. With that cap, pipelines of up to several dozen fee and
/// tax stages stay exact. Arithmetic saturates at the edge of the decimal
/// range instead of panicking.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Largest amount a price, line total, subtotal or fee may hold:
    /// 999,999,999,999,999.99.
    pub const MAX: Money = Money(Decimal::from_parts(1_569_325_055, 23_283_064, 0, false, 2));

    /// Creates a money amount from a decimal value.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates a money amount from cents (e.g., 1000 = 10.00).
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Creates a money amount from whole currency units.
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if the amount lies in `[0, Money::MAX]`.
    pub fn is_within_limit(&self) -> bool {
        !self.is_negative() && *self <= Money::MAX
    }

    /// Multiplies by a quantity, saturating at the decimal range.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Multiplies by a quantity, or `None` if the product exceeds [`Money::MAX`].
    pub fn checked_multiply(&self, quantity: u32) -> Option<Money> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(Money)
            .filter(|product| *product <= Money::MAX)
    }

    /// Adds `rhs`, or `None` if the sum exceeds [`Money::MAX`].
    pub fn checked_add(&self, rhs: Money) -> Option<Money> {
        self.0
            .checked_add(rhs.0)
            .map(Money)
            .filter(|sum| *sum <= Money::MAX)
    }

    /// Returns `self * fraction`, rounded to cents.
    ///
    /// Midpoints round to the nearest even cent.
    pub fn portion(&self, fraction: Decimal) -> Money {
        Money(self.0.saturating_mul(fraction).round_dp(2))
    }

    /// Clamps negative amounts to zero.
    pub fn floor_at_zero(self) -> Money {
        if self.is_negative() { Money::zero() } else { self }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut magnitude = self.0.abs().round_dp(2);
        magnitude.rescale(2);
        if self.is_negative() {
            write!(f, "-${magnitude}")
        } else {
            write!(f, "${magnitude}")
        }
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// A priced item that can be ordered. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    id: ItemId,
    name: String,
    unit_price: Money,
}

impl CatalogItem {
    /// Creates a catalog item. The price must lie in `[0, Money::MAX]`.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        unit_price: Money,
    ) -> Result<Self, OrderError> {
        if !unit_price.is_within_limit() {
            return Err(OrderError::InvalidPrice { price: unit_price });
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            unit_price,
        })
    }

    /// Returns the item identifier.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price per unit.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }
}

/// A catalog item paired with the quantity ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    item: CatalogItem,
    quantity: u32,
}

impl OrderLine {
    /// Creates an order line.
    ///
    /// The quantity must be greater than zero and the line total must not
    /// exceed [`Money::MAX`].
    pub fn new(item: CatalogItem, quantity: u32) -> Result<Self, OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity { quantity });
        }
        if item.unit_price.checked_multiply(quantity).is_none() {
            return Err(OrderError::AmountOverflow { what: "line total" });
        }

        Ok(Self { item, quantity })
    }

    /// Returns the ordered item.
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// Returns the quantity ordered.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns unit price * quantity.
    pub fn line_total(&self) -> Money {
        self.item.unit_price.multiply(self.quantity)
    }
}

/// Delivery preferences carried by special orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOptions {
    /// Whether express delivery was requested.
    pub express_requested: bool,

    /// Free-form customer preferences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DeliveryOptions {
    /// Creates delivery options.
    pub fn new(express_requested: bool, note: Option<String>) -> Self {
        Self {
            express_requested,
            note,
        }
    }

    /// Options requesting express delivery without a note.
    pub fn express() -> Self {
        Self::new(true, None)
    }
}
