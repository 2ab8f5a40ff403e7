//! Order construction: the kind-based factory and the fluent builder.

use serde::{Deserialize, Serialize};

use super::{CatalogItem, DeliveryOptions, ObserverHandle, Order, OrderError};

/// Placeholder used by the builder when no customer or address is given.
pub const UNKNOWN: &str = "Unknown";

/// The kind of order to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    /// Regular delivery, never carries delivery options.
    #[default]
    Standard,

    /// Delivery with options such as express shipping.
    Special,
}

/// Creates an empty order in the `Preparing` status.
///
/// Special orders without options get `DeliveryOptions::default()`.
/// Standard orders ignore any options passed in.
pub fn create_order(
    kind: OrderKind,
    customer_name: impl Into<String>,
    address: impl Into<String>,
    options: Option<DeliveryOptions>,
) -> Order {
    let options = match kind {
        OrderKind::Standard => None,
        OrderKind::Special => Some(options.unwrap_or_default()),
    };

    let order = Order::new(customer_name, address, options);
    tracing::debug!(order_id = %order.id(), ?kind, "order created");
    order
}

impl Order {
    /// Creates a standard order.
    pub fn standard(customer_name: impl Into<String>, address: impl Into<String>) -> Self {
        create_order(OrderKind::Standard, customer_name, address, None)
    }

    /// Creates a special order with the given delivery options.
    pub fn special(
        customer_name: impl Into<String>,
        address: impl Into<String>,
        options: DeliveryOptions,
    ) -> Self {
        create_order(OrderKind::Special, customer_name, address, Some(options))
    }
}

/// Fluent accumulator for orders.
///
/// Holds no validation of its own: [`build`](Self::build) creates the order
/// through [`create_order`] and replays the lines through
/// [`Order::add_line`].
#[derive(Default)]
pub struct OrderBuilder {
    kind: OrderKind,
    customer_name: Option<String>,
    address: Option<String>,
    options: Option<DeliveryOptions>,
    lines: Vec<(CatalogItem, u32)>,
    observers: Vec<ObserverHandle>,
}

impl OrderBuilder {
    /// Creates a builder for a standard order with no lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes this a standard order and clears any delivery options.
    pub fn standard(mut self, customer_name: impl Into<String>, address: impl Into<String>) -> Self {
        self.kind = OrderKind::Standard;
        self.customer_name = Some(customer_name.into());
        self.address = Some(address.into());
        self.options = None;
        self
    }

    /// Makes this a special order with the given delivery preferences.
    pub fn special(
        mut self,
        customer_name: impl Into<String>,
        address: impl Into<String>,
        express_requested: bool,
        note: Option<String>,
    ) -> Self {
        self.kind = OrderKind::Special;
        self.customer_name = Some(customer_name.into());
        self.address = Some(address.into());
        self.options = Some(DeliveryOptions::new(express_requested, note));
        self
    }

    /// Sets the order kind.
    pub fn kind(mut self, kind: OrderKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the customer name.
    pub fn customer(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = Some(customer_name.into());
        self
    }

    /// Sets the delivery address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the delivery options. Only kept for special orders.
    pub fn options(mut self, options: DeliveryOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Queues a line.
    pub fn add(mut self, item: CatalogItem, quantity: u32) -> Self {
        self.lines.push((item, quantity));
        self
    }

    /// Queues an observer, subscribed before any line is added.
    pub fn observer(mut self, observer: ObserverHandle) -> Self {
        self.observers.push(observer);
        self
    }

    /// Builds the order, failing on the first line `add_line` rejects.
    pub fn build(self) -> Result<Order, OrderError> {
        let mut order = create_order(
            self.kind,
            self.customer_name.unwrap_or_else(|| UNKNOWN.to_string()),
            self.address.unwrap_or_else(|| UNKNOWN.to_string()),
            self.options,
        );

        for observer in self.observers {
            order.subscribe(observer);
        }

        for (item, quantity) in self.lines {
            order.add_line(item, quantity)?;
        }

        Ok(order)
    }
}

impl std::fmt::Debug for OrderBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBuilder")
            .field("kind", &self.kind)
            .field("customer_name", &self.customer_name)
            .field("address", &self.address)
            .field("options", &self.options)
            .field("lines", &self.lines)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Money, OrderStatus};

    fn pizza() -> CatalogItem {
        CatalogItem::new("p1", "Pizza", Money::from_units(10)).unwrap()
    }

    fn cola() -> CatalogItem {
        CatalogItem::new("c1", "Cola", Money::from_units(2)).unwrap()
    }

    #[test]
    fn test_factory_creates_standard_without_options() {
        let order = create_order(
            OrderKind::Standard,
            "Ivan",
            "Riga",
            Some(DeliveryOptions::express()),
        );
        assert!(order.options().is_none());
        assert_eq!(order.status(), OrderStatus::Preparing);
        assert_eq!(order.line_count(), 0);
    }

    #[test]
    fn test_factory_creates_special_with_options() {
        let options = DeliveryOptions::new(true, Some("no onion".to_string()));
        let order = create_order(OrderKind::Special, "Petr", "Riga", Some(options.clone()));
        assert_eq!(order.options(), Some(&options));
    }

    #[test]
    fn test_factory_defaults_special_options() {
        let order = create_order(OrderKind::Special, "Petr", "Riga", None);
        assert_eq!(order.options(), Some(&DeliveryOptions::default()));
        assert!(!order.is_express());
    }

    #[test]
    fn test_builder_builds_order_with_items() {
        let order = OrderBuilder::new()
            .special("Anna", "Riga", true, Some("extra cheese".to_string()))
            .add(pizza(), 2)
            .add(cola(), 3)
            .build()
            .unwrap();

        assert_eq!(order.line_count(), 2);
        assert_eq!(order.status(), OrderStatus::Preparing);
        assert!(order.is_express());
        assert_eq!(order.customer_name(), "Anna");
        assert_eq!(order.subtotal(), Money::from_units(26));
    }

    #[test]
    fn test_builder_defaults_to_unknown_standard_order() {
        let order = OrderBuilder::new().build().unwrap();
        assert_eq!(order.customer_name(), UNKNOWN);
        assert_eq!(order.address(), UNKNOWN);
        assert!(order.options().is_none());
    }

    #[test]
    fn test_builder_standard_clears_previous_options() {
        let order = OrderBuilder::new()
            .special("Anna", "Riga", true, None)
            .standard("Anna", "Riga")
            .build()
            .unwrap();
        assert!(order.options().is_none());
    }

    #[test]
    fn test_builder_surfaces_invalid_quantity() {
        let result = OrderBuilder::new()
            .standard("Ivan", "Riga")
            .add(pizza(), 1)
            .add(cola(), 0)
            .build();
        assert!(matches!(
            result,
            Err(OrderError::InvalidQuantity { quantity: 0 })
        ));
    }

    #[test]
    fn test_builder_field_setters() {
        let order = OrderBuilder::new()
            .kind(OrderKind::Special)
            .customer("Olga")
            .address("Tartu")
            .options(DeliveryOptions::express())
            .build()
            .unwrap();
        assert_eq!(order.customer_name(), "Olga");
        assert_eq!(order.address(), "Tartu");
        assert!(order.is_express());
    }

    #[test]
    fn test_builder_subscribes_observers() {
        let order = OrderBuilder::new()
            .observer(std::sync::Arc::new(crate::order::LoggingObserver))
            .build()
            .unwrap();
        assert_eq!(order.observer_count(), 1);
    }

    #[test]
    fn test_order_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&OrderKind::Special).unwrap(),
            "\"special\""
        );
        let kind: OrderKind = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(kind, OrderKind::Standard);
    }
}
