//! Per-run cost and token accounting.
//!
//! A [`CostAccumulator`] lives for exactly one reasoning run. Each model call
//! adds the priced cost of its prompt and completion tokens; each nested
//! agent invoked as a tool adds its own reported totals verbatim. Nested
//! agents only report their own increment, so sums compose across levels
//! without double counting.

use crate::TelemetryError;
use crate::pricing::PricingTable;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Cumulative cost (USD) and token usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageTotals {
    pub cost: f64,
    pub tokens: u64,
}

/// Running totals for one run, priced against a fixed model identifier.
pub struct CostAccumulator<'a> {
    pricing: &'a PricingTable,
    model: String,
    totals: UsageTotals,
    model_calls: usize,
}

impl<'a> CostAccumulator<'a> {
    /// Start a new, zeroed accumulator for `model`.
    pub fn new(pricing: &'a PricingTable, model: impl Into<String>) -> Self {
        Self {
            pricing,
            model: model.into(),
            totals: UsageTotals::default(),
            model_calls: 0,
        }
    }

    /// Account for one model call. Returns the cost of this call alone.
    ///
    /// Fails if the model has no pricing entry; totals are left untouched.
    pub fn record_call(
        &mut self,
        prompt_tokens: u32,
        completion_tokens: u32,
    ) -> Result<f64, TelemetryError> {
        let cost = self
            .pricing
            .compute_cost(&self.model, prompt_tokens, completion_tokens)?;
        self.totals.cost += cost;
        self.totals.tokens += u64::from(prompt_tokens) + u64::from(completion_tokens);
        self.model_calls += 1;
        trace!(
            model = %self.model,
            prompt_tokens,
            completion_tokens,
            cost,
            "Recorded model call"
        );
        Ok(cost)
    }

    /// Add usage reported by a nested agent.
    pub fn record_nested(&mut self, cost: f64, tokens: u64) {
        self.totals.cost += cost;
        self.totals.tokens += tokens;
    }

    /// Current totals.
    pub fn totals(&self) -> UsageTotals {
        self.totals
    }

    /// Number of model calls recorded so far.
    pub fn model_calls(&self) -> usize {
        self.model_calls
    }
}
