//! Built-in pricing table for common LLM models.
//!
//! Prices are in USD per 1 million tokens. Each model has an input and
//! output price. Custom pricing can be added at runtime via TOML config.
//! A model that cannot be resolved is an error: silently pricing a call at
//! zero would under-report a run's spend.

use crate::TelemetryError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Per-million-token pricing for a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Price per 1M input tokens in USD.
    pub input_per_m: f64,
    /// Price per 1M output tokens in USD.
    pub output_per_m: f64,
}

impl ModelPricing {
    /// Create a new pricing entry.
    pub fn new(input_per_m: f64, output_per_m: f64) -> Self {
        Self {
            input_per_m,
            output_per_m,
        }
    }

    /// Compute cost for the given token counts.
    pub fn cost(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        (input_tokens as f64 * self.input_per_m + output_tokens as f64 * self.output_per_m)
            / 1_000_000.0
    }
}

/// Thread-safe pricing table with built-in defaults and custom overrides.
pub struct PricingTable {
    prices: RwLock<HashMap<String, ModelPricing>>,
}

impl PricingTable {
    /// Create a pricing table with built-in model prices.
    pub fn with_defaults() -> Self {
        let mut prices = HashMap::new();

        // ── OpenAI ─────────────────────────────────────────────────
        prices.insert("openai/gpt-4o".into(), ModelPricing::new(2.5, 10.0));
        prices.insert("openai/gpt-4o-mini".into(), ModelPricing::new(0.15, 0.6));
        prices.insert("openai/gpt-4-turbo".into(), ModelPricing::new(10.0, 30.0));
        prices.insert("openai/gpt-4".into(), ModelPricing::new(30.0, 60.0));
        prices.insert("openai/gpt-3.5-turbo".into(), ModelPricing::new(0.5, 1.5));
        prices.insert("openai/o1".into(), ModelPricing::new(15.0, 60.0));
        prices.insert("openai/o3-mini".into(), ModelPricing::new(1.1, 4.4));

        // ── Anthropic ──────────────────────────────────────────────
        prices.insert(
            "anthropic/claude-3.5-sonnet".into(),
            ModelPricing::new(3.0, 15.0),
        );
        prices.insert(
            "anthropic/claude-3.5-haiku".into(),
            ModelPricing::new(0.8, 4.0),
        );
        prices.insert(
            "anthropic/claude-3-haiku".into(),
            ModelPricing::new(0.25, 1.25),
        );

        // ── Google ─────────────────────────────────────────────────
        prices.insert(
            "google/gemini-2.0-flash".into(),
            ModelPricing::new(0.1, 0.4),
        );
        prices.insert("google/gemini-1.5-pro".into(), ModelPricing::new(1.25, 5.0));

        // ── Meta (via OpenRouter) ──────────────────────────────────
        prices.insert(
            "meta-llama/llama-3.1-70b".into(),
            ModelPricing::new(0.52, 0.75),
        );
        prices.insert(
            "meta-llama/llama-3.1-8b".into(),
            ModelPricing::new(0.055, 0.055),
        );

        // ── Mistral ────────────────────────────────────────────────
        prices.insert("mistral/mistral-large".into(), ModelPricing::new(2.0, 6.0));
        prices.insert("mistral/mistral-small".into(), ModelPricing::new(0.2, 0.6));

        // ── DeepSeek ───────────────────────────────────────────────
        prices.insert("deepseek/deepseek-v3".into(), ModelPricing::new(0.27, 1.1));
        prices.insert("deepseek/deepseek-r1".into(), ModelPricing::new(0.55, 2.19));

        Self {
            prices: RwLock::new(prices),
        }
    }

    /// Create an empty pricing table.
    pub fn empty() -> Self {
        Self {
            prices: RwLock::new(HashMap::new()),
        }
    }

    /// Look up pricing for a model by its exact key. Returns None if not found.
    pub fn get(&self, model: &str) -> Option<ModelPricing> {
        let prices = self.prices.read().unwrap_or_else(PoisonError::into_inner);
        prices.get(model).cloned()
    }

    /// Add or update pricing for a model.
    pub fn set(&self, model: impl Into<String>, pricing: ModelPricing) {
        let mut prices = self.prices.write().unwrap_or_else(PoisonError::into_inner);
        prices.insert(model.into(), pricing);
    }

    /// Resolve the pricing entry for `model`.
    ///
    /// Supports flexible matching: tries exact match first, then common
    /// provider prefixes (`gpt-4o` → `openai/gpt-4o`), then the longest
    /// known bare name that prefixes the model (`gpt-4o-mini-2024-07-18`
    /// resolves to `gpt-4o-mini`).
    pub fn resolve(&self, model: &str) -> Result<ModelPricing, TelemetryError> {
        let prices = self.prices.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(p) = prices.get(model) {
            return Ok(p.clone());
        }

        for provider in ["openai", "anthropic", "google", "mistral", "deepseek", "meta-llama"] {
            if let Some(p) = prices.get(&format!("{provider}/{model}")) {
                return Ok(p.clone());
            }
        }

        let model_lower = model.to_lowercase();
        let bare_model = model_lower.rsplit('/').next().unwrap_or(&model_lower);

        prices
            .iter()
            .filter_map(|(key, pricing)| {
                let bare_key = key.rsplit('/').next().unwrap_or(key).to_lowercase();
                bare_model
                    .starts_with(&bare_key)
                    .then_some((bare_key.len(), pricing))
            })
            .max_by_key(|(len, _)| *len)
            .map(|(_, p)| p.clone())
            .ok_or_else(|| TelemetryError::UnknownModel(model.to_string()))
    }

    /// Compute cost for a model call.
    pub fn compute_cost(
        &self,
        model: &str,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Result<f64, TelemetryError> {
        Ok(self.resolve(model)?.cost(input_tokens, output_tokens))
    }

    /// List all known model names.
    pub fn models(&self) -> Vec<String> {
        let prices = self.prices.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = prices.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of models in the pricing table.
    pub fn len(&self) -> usize {
        self.prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_models() {
        let table = PricingTable::with_defaults();
        assert!(table.len() >= 15);
        assert!(!table.is_empty());
    }

    #[test]
    fn known_model_cost() {
        let table = PricingTable::with_defaults();

        // Claude 3.5 Sonnet: $3/M input, $15/M output
        let cost = table
            .compute_cost("anthropic/claude-3.5-sonnet", 1000, 500)
            .unwrap();
        // (1000 * 3.0 + 500 * 15.0) / 1M = 0.0105
        assert!((cost - 0.0105).abs() < 1e-10);
    }

    #[test]
    fn unknown_model_fails_loudly() {
        let table = PricingTable::with_defaults();
        let err = table.compute_cost("unknown/model-xyz", 1000, 500).unwrap_err();
        assert!(matches!(err, TelemetryError::UnknownModel(ref m) if m == "unknown/model-xyz"));
    }

    #[test]
    fn bare_name_resolves_with_provider_prefix() {
        let table = PricingTable::with_defaults();
        let cost = table.compute_cost("gpt-3.5-turbo", 1_000_000, 0).unwrap();
        assert!((cost - 0.5).abs() < 1e-10);
    }

    #[test]
    fn versioned_name_resolves_to_longest_prefix() {
        let table = PricingTable::with_defaults();
        let mini = table.resolve("gpt-4o-mini-2024-07-18").unwrap();
        assert_eq!(mini, ModelPricing::new(0.15, 0.6));
        let full = table.resolve("gpt-4o-2024-08-06").unwrap();
        assert_eq!(full, ModelPricing::new(2.5, 10.0));
    }

    #[test]
    fn custom_pricing() {
        let table = PricingTable::empty();
        assert!(table.is_empty());

        table.set("custom/model", ModelPricing::new(1.0, 2.0));
        assert_eq!(table.len(), 1);

        let cost = table.compute_cost("custom/model", 1_000_000, 1_000_000).unwrap();
        // (1M * 1.0 + 1M * 2.0) / 1M = 3.0
        assert!((cost - 3.0).abs() < 1e-10);
    }

    #[test]
    fn model_pricing_cost() {
        let p = ModelPricing::new(5.0, 15.0);
        // 500 input, 200 output → (2500 + 3000) / 1M = 0.0055
        let c = p.cost(500, 200);
        assert!((c - 0.0055).abs() < 1e-10);
    }

    #[test]
    fn list_models_sorted() {
        let table = PricingTable::with_defaults();
        let models = table.models();
        assert!(models.contains(&"openai/gpt-4o".to_string()));
        assert!(models.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn set_overrides_existing() {
        let table = PricingTable::with_defaults();
        let old = table.compute_cost("openai/gpt-4o", 1_000_000, 0).unwrap();
        assert!((old - 2.5).abs() < 1e-10);

        table.set("openai/gpt-4o", ModelPricing::new(5.0, 20.0));
        let new_cost = table.compute_cost("openai/gpt-4o", 1_000_000, 0).unwrap();
        assert!((new_cost - 5.0).abs() < 1e-10);
    }
}
