//! # Pricing Module
//!
//! Per-model cost rates for token-based estimates.
//!
//! Rates are USD per one million total tokens. Resolution order:
//! 1. `GENAI_PRICE_PER_1M` environment variable (applies to every model)
//! 2. The deployment's entry in the config `model_cost` table
//! 3. Built-in family heuristics on the deployment name
//!
//! Unknown models get no rate; callers render the estimate as "n/a"
//! rather than inventing a price.

use std::collections::BTreeMap;
use std::env;

/// USD per one million tokens.
pub type RatePer1M = f64;

pub(crate) fn static_rate_lookup(model_id: &str) -> Option<RatePer1M> {
    // Prefer exact/known variants before family heuristics
    let m = model_id.to_lowercase();
    if m.contains("gpt-4o-mini") {
        return Some(0.75);
    }
    if m.contains("gpt-4o") {
        return Some(10.0);
    }
    if m.contains("gpt-4.1-mini") || m.contains("gpt-4-1-mini") {
        return Some(2.0);
    }
    if m.contains("gpt-4.1") || m.contains("gpt-4-1") {
        return Some(10.0);
    }
    if m.contains("o4-mini") || m.contains("o3-mini") {
        return Some(5.5);
    }
    if m.contains("gpt-35-turbo") || m.contains("gpt-3.5") {
        return Some(2.0);
    }
    None
}

/// Resolve the blended cost rate for a deployment.
pub fn rate_for_model(model_id: &str, configured: &BTreeMap<String, f64>) -> Option<RatePer1M> {
    if let Ok(raw) = env::var("GENAI_PRICE_PER_1M") {
        if let Ok(rate) = raw.parse::<f64>() {
            return Some(rate);
        }
    }
    if let Some(rate) = configured.get(model_id) {
        return Some(*rate);
    }
    if let Some(rate) = static_rate_lookup(model_id) {
        return Some(rate);
    }
    // Family heuristics for unlisted deployments
    let m = model_id.to_lowercase();
    if m.contains("mini") || m.contains("nano") {
        Some(1.0)
    } else if m.contains("gpt-4") {
        Some(10.0)
    } else {
        None
    }
}

/// Estimate the cost of one call. `None` when either the rate or the token
/// count is unknown.
pub fn estimate_cost(rate: Option<RatePer1M>, total_tokens: Option<u64>) -> Option<f64> {
    Some(total_tokens? as f64 / 1_000_000.0 * rate?)
}

/// Display form for an estimate, `$0.000123` or `n/a`.
pub fn estimate_display(estimate: Option<f64>) -> String {
    match estimate {
        Some(cost) => format!("${cost:.6}"),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_config() -> BTreeMap<String, f64> {
        BTreeMap::new()
    }

    #[test]
    fn known_models_resolve_rates() {
        assert_eq!(rate_for_model("gpt-4o", &no_config()), Some(10.0));
        assert_eq!(rate_for_model("gpt-4o-mini", &no_config()), Some(0.75));
        assert_eq!(rate_for_model("my-gpt-4.1-deployment", &no_config()), Some(10.0));
    }

    #[test]
    fn config_table_overrides_builtins() {
        let mut table = BTreeMap::new();
        table.insert("gpt-4o".to_string(), 8.5);
        assert_eq!(rate_for_model("gpt-4o", &table), Some(8.5));
    }

    #[test]
    fn unknown_model_has_no_rate() {
        assert_eq!(rate_for_model("mystery-llm", &no_config()), None);
    }

    #[test]
    fn estimate_needs_both_rate_and_tokens() {
        assert_eq!(estimate_cost(Some(10.0), Some(1_000_000)), Some(10.0));
        assert_eq!(estimate_cost(Some(10.0), None), None);
        assert_eq!(estimate_cost(None, Some(500)), None);
        assert_eq!(estimate_display(None), "n/a");
        assert_eq!(estimate_display(estimate_cost(Some(2.0), Some(500))), "$0.001000");
    }
}
