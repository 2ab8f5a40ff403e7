//! Command-line front end for the delivery ordering engine.
//!
//! Reads an order file, prices the order through the configured cost
//! pipeline and walks it through its lifecycle to completion.

pub mod config;
pub mod error;
pub mod order_file;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use domain::{LoggingObserver, Money, ObserverFailure, OrderId, OrderStatus};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, LogFormat};
use crate::error::CliError;
use crate::order_file::OrderFile;

/// Installs the global tracing subscriber. Logs go to stderr.
///
/// Fails if the configured filter directive does not parse.
pub fn init_tracing(config: &Config) -> Result<(), CliError> {
    let filter =
        EnvFilter::try_new(&config.log_level).map_err(|_| CliError::InvalidConfig {
            key: "RUST_LOG",
            value: config.log_level.clone(),
        })?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}

/// Reads and parses an order file.
pub fn load_order_file(path: &Path) -> Result<OrderFile, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// One priced line of a [`Summary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: u32,
    pub line_total: Money,
}

/// What happened to an order processed by [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub order_id: OrderId,
    pub customer: String,
    pub lines: Vec<SummaryLine>,
    pub subtotal: Money,
    pub stages: Vec<&'static str>,
    pub total: Money,
    pub transitions: Vec<(OrderStatus, OrderStatus)>,
    pub final_status: OrderStatus,
    pub observer_failures: Vec<ObserverFailure>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order {} for {}", self.order_id, self.customer)?;
        for line in &self.lines {
            writeln!(f, "  {} x{}  {}", line.name, line.quantity, line.line_total)?;
        }
        writeln!(f, "Subtotal: {}", self.subtotal)?;
        writeln!(f, "Pipeline: {}", self.stages.join(" <- "))?;
        writeln!(f, "Total: {}", self.total)?;
        for (from, to) in &self.transitions {
            writeln!(f, "Status: {from} -> {to}")?;
        }
        for failure in &self.observer_failures {
            writeln!(f, "Warning: {failure}")?;
        }
        write!(f, "Final status: {}", self.final_status)
    }
}

/// Builds, prices and completes the order described by `file`.
///
/// The total is computed before the order leaves `Preparing`. Observer
/// failures are reported in the summary and never abort the run.
pub fn run(config: &Config, file: &OrderFile) -> Result<Summary, CliError> {
    let pipeline = config.pricing_config()?.build()?;
    let catalog = file.catalog()?;
    let mut order = file
        .builder(&catalog)?
        .observer(Arc::new(LoggingObserver))
        .build()?;

    let total = pipeline.compute_total(&order);

    let mut transitions = Vec::new();
    let mut observer_failures = Vec::new();
    while !order.is_completed() {
        let outcome = order.advance();
        if let Some(change) = outcome.change {
            transitions.push((change.previous, change.current));
        }
        observer_failures.extend(outcome.report.failures);
    }

    tracing::info!(order_id = %order.id(), %total, "order processed");

    Ok(Summary {
        order_id: order.id(),
        customer: order.customer_name().to_string(),
        lines: order
            .lines()
            .iter()
            .map(|line| SummaryLine {
                name: line.item().name().to_string(),
                quantity: line.quantity(),
                line_total: line.line_total(),
            })
            .collect(),
        subtotal: order.subtotal(),
        stages: pipeline.describe(),
        total,
        transitions,
        final_status: order.status(),
        observer_failures,
    })
}
