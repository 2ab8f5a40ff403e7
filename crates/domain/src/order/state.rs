//! Order fulfillment status machine.

use serde::{Deserialize, Serialize};

/// The fulfillment status of an order.
///
/// Status transitions:
/// ```text
/// Preparing ──► Delivering ──► Completed ─┐
///                                  ▲      │
///                                  └──────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum OrderStatus {
    /// Order is being prepared; lines can be added.
    #[default]
    Preparing,

    /// Order is out for delivery.
    Delivering,

    /// Order was delivered (terminal status).
    Completed,
}

impl OrderStatus {
    /// Returns the status that follows this one.
    ///
    /// `Completed` maps to itself.
    pub fn next(self) -> Self {
        match self {
            OrderStatus::Preparing => OrderStatus::Delivering,
            OrderStatus::Delivering => OrderStatus::Completed,
            OrderStatus::Completed => OrderStatus::Completed,
        }
    }

    /// Returns true if lines may still be appended in this status.
    pub fn can_add_lines(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if this is the terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Delivering => "Delivering",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
