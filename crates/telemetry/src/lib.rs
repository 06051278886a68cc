//! Model pricing and cost accounting for ReasonAct.
//!
//! Provides a built-in pricing table keyed by model identifier and the
//! per-run accumulator the reasoning loop uses to total cost and tokens
//! across model calls and nested agents.

pub mod pricing;
pub mod usage;

pub use pricing::{ModelPricing, PricingTable};
pub use usage::{CostAccumulator, UsageTotals};

/// Errors from the telemetry subsystem.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("no pricing known for model: {0}")]
    UnknownModel(String),
}
