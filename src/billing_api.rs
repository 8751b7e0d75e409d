//! Azure management-plane clients: the Cost Management query (daily spend)
//! and the Azure Monitor metrics query (latency and token counters).
//!
//! Auth is a bearer token from `AZURE_ACCESS_TOKEN`, typically minted with
//! `az account get-access-token --resource https://management.azure.com`.
//! Responses are cached for a short TTL so dashboard refreshes stay cheap.

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use std::env;
use std::time::Duration;

use crate::cache;
use crate::metrics::{LATENCY_METRICS, TOKEN_METRICS};
use crate::models::{CostRecord, CostSummary};
use crate::{cost, metrics};

const MANAGEMENT_HOST: &str = "https://management.azure.com";
const COST_API_VERSION: &str = "2025-03-01";
const MONITOR_API_VERSION: &str = "2024-02-01";
const METRIC_NAMESPACE: &str = "microsoft.cognitiveservices/accounts";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Supported Cost Management timeframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Last7Days,
    MonthToDate,
    /// Explicit inclusive date range.
    Custom(chrono::NaiveDate, chrono::NaiveDate),
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Last7Days => "Last7Days",
            Timeframe::MonthToDate => "MonthToDate",
            Timeframe::Custom(..) => "Custom",
        }
    }

    fn cache_label(&self) -> String {
        match self {
            Timeframe::Custom(from, to) => format!("Custom:{from}:{to}"),
            other => other.as_str().to_string(),
        }
    }
}

/// Cost series plus its summary, as fetched in one query.
#[derive(Debug, Clone)]
pub struct CostFetch {
    pub records: Vec<CostRecord>,
    pub summary: CostSummary,
}

fn bearer_token() -> Result<String> {
    let token = env::var("AZURE_ACCESS_TOKEN")
        .map_err(|_| anyhow!("AZURE_ACCESS_TOKEN is not set; run `az account get-access-token`"))?;
    let token = token.trim().to_string();
    if token.is_empty() {
        bail!("AZURE_ACCESS_TOKEN is empty");
    }
    Ok(token)
}

fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_read(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .timeout_write(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
}

/// Request body for the Cost Management query: daily PreTaxCost sums.
pub fn cost_query_body(timeframe: Timeframe) -> Value {
    let mut body = serde_json::json!({
        "type": "ActualCost",
        "timeframe": timeframe.as_str(),
        "dataset": {
            "granularity": "Daily",
            "aggregation": {
                "totalCost": {"name": "PreTaxCost", "function": "Sum"}
            }
        }
    });
    if let Timeframe::Custom(from, to) = timeframe {
        body["timePeriod"] = serde_json::json!({
            "from": format!("{from}T00:00:00Z"),
            "to": format!("{to}T00:00:00Z"),
        });
    }
    body
}

/// POST the Cost Management query for one subscription.
pub fn query_cost_management(subscription_id: &str, timeframe: Timeframe) -> Result<Value> {
    let key = cache::make_cache_key(subscription_id, &timeframe.cache_label(), "cost");
    if let Some(cached) = cache::get_cached_payload(&key) {
        return Ok(cached);
    }

    let token = bearer_token()?;
    let url = format!(
        "{MANAGEMENT_HOST}/subscriptions/{subscription_id}\
         /providers/Microsoft.CostManagement/query?api-version={COST_API_VERSION}"
    );
    let response = agent()
        .post(&url)
        .set("Authorization", &format!("Bearer {token}"))
        .set("Content-Type", "application/json")
        .send_json(cost_query_body(timeframe))
        .context("cost management query failed")?;
    if response.status() != 200 {
        bail!("cost management query returned HTTP {}", response.status());
    }
    let payload: Value = response
        .into_json()
        .context("cost management response was not JSON")?;
    cache::cache_payload(&key, payload.clone());
    Ok(payload)
}

/// Fetch and aggregate daily costs in one call.
pub fn fetch_daily_costs(subscription_id: &str, timeframe: Timeframe) -> Result<CostFetch> {
    let payload = query_cost_management(subscription_id, timeframe)?;
    let records = cost::parse_cost_response(&payload)?;
    let summary = cost::summarize(&records);
    Ok(CostFetch { records, summary })
}

/// GET the monitor metrics for one resource over the last `hours` hours.
pub fn query_monitor_metrics(resource_id: &str, hours: u32, include_latency: bool) -> Result<Value> {
    let options = format!("h{hours}:lat{include_latency}");
    let key = cache::make_cache_key(resource_id, "metrics", &options);
    if let Some(cached) = cache::get_cached_payload(&key) {
        return Ok(cached);
    }

    let token = bearer_token()?;
    let end = chrono::Utc::now();
    let start = end - chrono::Duration::hours(hours as i64);
    let timespan = format!(
        "{}/{}",
        start.format("%Y-%m-%dT%H:%M:%SZ"),
        end.format("%Y-%m-%dT%H:%M:%SZ"),
    );

    let mut metric_names: Vec<&str> = TOKEN_METRICS.to_vec();
    let aggregation = if include_latency {
        metric_names.extend(LATENCY_METRICS);
        "Total,Average,Percentile,Count"
    } else {
        "Total"
    };

    let url = format!(
        "{MANAGEMENT_HOST}{resource_id}/providers/microsoft.insights/metrics"
    );
    let mut request = agent()
        .get(&url)
        .set("Authorization", &format!("Bearer {token}"))
        .query("metricnames", &metric_names.join(","))
        .query("metricnamespace", METRIC_NAMESPACE)
        .query("timespan", &timespan)
        .query("aggregation", aggregation)
        .query("api-version", MONITOR_API_VERSION);
    if include_latency {
        request = request.query("percentile", "50,95,99");
    }

    let response = request.call().context("monitor metrics query failed")?;
    if response.status() != 200 {
        bail!("monitor metrics query returned HTTP {}", response.status());
    }
    let payload: Value = response
        .into_json()
        .context("monitor metrics response was not JSON")?;
    cache::cache_payload(&key, payload.clone());
    Ok(payload)
}

/// One-shot metrics summary as rendered by `--metrics`.
pub fn fetch_metrics_summary(resource_id: &str, hours: u32) -> Result<Value> {
    let payload = query_monitor_metrics(resource_id, hours, true)?;
    let latency = metrics::extract_latency(&payload, &LATENCY_METRICS);
    let tokens = metrics::aggregate_token_totals(&payload, &TOKEN_METRICS);
    Ok(serde_json::json!({
        "hours": hours,
        "tokens": tokens,
        "latency": latency,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_body_matches_query_contract() {
        let body = cost_query_body(Timeframe::Last7Days);
        assert_eq!(body["type"], "ActualCost");
        assert_eq!(body["timeframe"], "Last7Days");
        assert_eq!(body["dataset"]["granularity"], "Daily");
        assert_eq!(
            body["dataset"]["aggregation"]["totalCost"]["name"],
            "PreTaxCost"
        );
    }

    #[test]
    fn timeframe_names_are_api_literals() {
        assert_eq!(Timeframe::Last7Days.as_str(), "Last7Days");
        assert_eq!(Timeframe::MonthToDate.as_str(), "MonthToDate");
    }

    #[test]
    fn custom_timeframe_carries_time_period() {
        let from = "2025-09-01".parse().unwrap();
        let to = "2025-09-07".parse().unwrap();
        let body = cost_query_body(Timeframe::Custom(from, to));
        assert_eq!(body["timeframe"], "Custom");
        assert_eq!(body["timePeriod"]["from"], "2025-09-01T00:00:00Z");
        assert_eq!(body["timePeriod"]["to"], "2025-09-07T00:00:00Z");
    }
}
