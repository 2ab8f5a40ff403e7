//! Status change observers and their registry.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use thiserror::Error;

use super::StatusChanged;

/// Error returned by an observer that could not handle a notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    /// Creates an observer error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single observer's failure, captured during notification fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Observer {observer} failed: {error}")]
pub struct ObserverFailure {
    /// Name of the failing observer.
    pub observer: String,

    /// What the observer reported.
    pub error: ObserverError,
}

/// Receives order status changes.
///
/// Observers run synchronously inside [`Order::advance`](super::Order::advance).
/// Implementations that keep state should use interior mutability.
///
/// Returning an error and panicking are both reported as an
/// [`ObserverFailure`]. A panic is only caught when the binary unwinds;
/// under `panic = "abort"` it still ends the process.
pub trait OrderObserver: Send + Sync {
    /// Returns the name used when reporting failures.
    fn name(&self) -> &str;

    /// Handles a status change.
    fn on_status_changed(&self, change: &StatusChanged) -> Result<(), ObserverError>;
}

/// Shared handle to an observer. Identity is the pointer, not the value.
pub type ObserverHandle = Arc<dyn OrderObserver>;

/// Outcome of delivering one notification to every subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationReport {
    /// Number of observers that handled the notification successfully.
    pub delivered: usize,

    /// Observers that returned an error, in notification order.
    pub failures: Vec<ObserverFailure>,
}

impl NotificationReport {
    /// Returns true if no observer failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the number of observers that were called.
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }
}

/// Insertion-ordered set of observers.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<ObserverHandle>,
}

impl ObserverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer. Returns false if it was already subscribed.
    pub fn subscribe(&mut self, observer: ObserverHandle) -> bool {
        if self.contains(&observer) {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Removes an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, observer: &ObserverHandle) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !Arc::ptr_eq(o, observer));
        self.observers.len() != before
    }

    /// Returns true if this exact observer handle is subscribed.
    pub fn contains(&self, observer: &ObserverHandle) -> bool {
        self.observers.iter().any(|o| Arc::ptr_eq(o, observer))
    }

    /// Returns the number of subscribed observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns true if no observer is subscribed.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Delivers a status change to every observer in subscription order.
    ///
    /// A failing observer does not stop delivery to the ones after it.
    pub fn notify(&self, change: &StatusChanged) -> NotificationReport {
        let mut report = NotificationReport::default();

        for observer in &self.observers {
            match deliver(observer.as_ref(), change) {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    tracing::warn!(
                        observer = observer.name(),
                        order_id = %change.order_id,
                        status = %change.current,
                        %error,
                        "observer failed to handle status change"
                    );
                    metrics::counter!("order_observer_failures").increment(1);
                    report.failures.push(ObserverFailure {
                        observer: observer.name().to_string(),
                        error,
                    });
                }
            }
        }

        report
    }
}

/// Runs one observer, turning a panic into an [`ObserverError`].
fn deliver(observer: &dyn OrderObserver, change: &StatusChanged) -> Result<(), ObserverError> {
    panic::catch_unwind(AssertUnwindSafe(|| observer.on_status_changed(change))).unwrap_or_else(
        |payload| {
            Err(ObserverError::new(format!(
                "panicked: {}",
                panic_message(&*payload)
            )))
        },
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|o| o.name()))
            .finish()
    }
}

/// Observer that records every status change through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl OrderObserver for LoggingObserver {
    fn name(&self) -> &str {
        "LoggingObserver"
    }

    fn on_status_changed(&self, change: &StatusChanged) -> Result<(), ObserverError> {
        tracing::info!(
            order_id = %change.order_id,
            from = %change.previous,
            to = %change.current,
            event_type = change.event_type(),
            "order status changed"
        );
        Ok(())
    }
}
