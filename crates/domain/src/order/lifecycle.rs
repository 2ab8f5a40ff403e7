//! Order entity and its fulfillment lifecycle.

use serde::Serialize;

use super::{
    CatalogItem, DeliveryOptions, Money, NotificationReport, ObserverHandle, ObserverRegistry,
    OrderError, OrderId, OrderLine, OrderStatus, StatusChanged,
};

/// Result of calling [`Order::advance`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// The transition that happened, or `None` for the terminal self-loop.
    pub change: Option<StatusChanged>,

    /// Delivery results for this transition's observers.
    pub report: NotificationReport,
}

impl AdvanceOutcome {
    /// Returns true if the status actually changed.
    pub fn changed(&self) -> bool {
        self.change.is_some()
    }
}

/// An order: its lines, delivery options, status and subscribers.
///
/// Orders are created through [`create_order`](super::create_order) or
/// [`OrderBuilder`](super::OrderBuilder) and start out `Preparing`.
#[derive(Debug, Serialize)]
pub struct Order {
    id: OrderId,
    customer_name: String,
    address: String,
    lines: Vec<OrderLine>,
    status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<DeliveryOptions>,
    #[serde(skip)]
    observers: ObserverRegistry,
}

impl Order {
    pub(crate) fn new(
        customer_name: impl Into<String>,
        address: impl Into<String>,
        options: Option<DeliveryOptions>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            customer_name: customer_name.into(),
            address: address.into(),
            lines: Vec::new(),
            status: OrderStatus::Preparing,
            options,
            observers: ObserverRegistry::new(),
        }
    }
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the customer's name.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Returns the delivery address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the lines in the order they were added.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Returns the sum of all line totals, before any fee, tax or discount.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the delivery options. Always `None` for standard orders.
    pub fn options(&self) -> Option<&DeliveryOptions> {
        self.options.as_ref()
    }

    /// Returns true if express delivery was requested.
    pub fn is_express(&self) -> bool {
        self.options
            .as_ref()
            .is_some_and(|options| options.express_requested)
    }

    /// Returns true once the order has been delivered.
    pub fn is_completed(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the number of subscribed observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

// Mutations
impl Order {
    /// Appends a line for `quantity` units of `item`.
    ///
    /// The same item added twice yields two separate lines. A line that
    /// would push the subtotal past [`Money::MAX`] is rejected.
    pub fn add_line(&mut self, item: CatalogItem, quantity: u32) -> Result<(), OrderError> {
        if !self.status.can_add_lines() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action: "add line",
            });
        }

        let line = OrderLine::new(item, quantity)?;
        if self.subtotal().checked_add(line.line_total()).is_none() {
            return Err(OrderError::AmountOverflow {
                what: "order subtotal",
            });
        }
        tracing::debug!(
            order_id = %self.id,
            item_id = %line.item().id(),
            quantity,
            line_total = %line.line_total(),
            "line added"
        );
        self.lines.push(line);
        Ok(())
    }

    /// Moves the order to its next status and notifies observers.
    ///
    /// Observers are only notified when the status actually changes, so
    /// advancing a completed order is a silent no-op.
    #[tracing::instrument(skip(self), fields(order_id = %self.id))]
    pub fn advance(&mut self) -> AdvanceOutcome {
        let previous = self.status;
        let next = previous.next();

        if next == previous {
            tracing::debug!(status = %previous, "order already in terminal status");
            return AdvanceOutcome::default();
        }

        self.status = next;
        tracing::info!(from = %previous, to = %next, "order advanced");
        metrics::counter!("order_status_transitions", "to" => next.as_str()).increment(1);

        let change = StatusChanged::new(self.id, previous, next);
        let report = self.observers.notify(&change);

        AdvanceOutcome {
            change: Some(change),
            report,
        }
    }

    /// Subscribes an observer. Subscribing the same handle twice has no effect.
    pub fn subscribe(&mut self, observer: ObserverHandle) {
        if self.observers.subscribe(observer) {
            tracing::debug!(order_id = %self.id, "observer subscribed");
        }
    }

    /// Unsubscribes an observer. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, observer: &ObserverHandle) {
        if self.observers.unsubscribe(observer) {
            tracing::debug!(order_id = %self.id, "observer unsubscribed");
        }
    }
}
