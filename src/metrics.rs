//! # Latency and Token Aggregation
//!
//! Reduces an Azure Monitor metrics payload (`value[].name.value` /
//! `value[].timeseries[].data[]`) to per-metric summaries. Sparse series
//! are the norm: buckets with no traffic carry nulls, whole metrics can be
//! absent from the result set, and both must degrade to `None` or a
//! missing-metric entry rather than an error.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{LatencyBucket, LatencyReport, LatencyStats, TokenTotals};

/// Latency metrics requested from the monitor by default.
pub const LATENCY_METRICS: [&str; 2] = ["SuccessLatency", "TotalLatency"];

/// Token counters requested from the monitor by default.
pub const TOKEN_METRICS: [&str; 3] = ["ProcessedPromptTokens", "GeneratedTokens", "TotalTokens"];

/// Summarize the requested latency metrics from a raw metrics payload.
/// Metrics absent from the payload land in `missing_metrics`; present
/// metrics always get an entry, even if every statistic is `None`.
pub fn extract_latency(payload: &Value, requested: &[&str]) -> LatencyReport {
    let mut report = LatencyReport::default();
    for name in requested {
        match metric_entry(payload, name) {
            Some(entry) => {
                let buckets = collect_buckets(entry);
                report
                    .metrics
                    .insert((*name).to_string(), summarize_buckets(&buckets));
            }
            None => report.missing_metrics.push((*name).to_string()),
        }
    }
    report
}

/// Sum the `total` aggregation of each requested token counter. Absent
/// counters land in `missing_metrics` instead of reporting a silent zero.
pub fn aggregate_token_totals(payload: &Value, requested: &[&str]) -> TokenTotals {
    let mut totals = TokenTotals::default();
    for name in requested {
        match metric_entry(payload, name) {
            Some(entry) => {
                let sum = data_points(entry)
                    .filter_map(|dp| dp.get("total").and_then(|v| v.as_f64()))
                    .sum::<f64>();
                totals.totals.insert((*name).to_string(), sum as u64);
            }
            None => totals.missing_metrics.push((*name).to_string()),
        }
    }
    totals
}

/// Fold a bucket series into summary statistics.
///
/// The average is weighted by sample count, Σ(avg×count)/Σ(count), so a
/// quiet window cannot drag down a busy one. When no bucket carries a
/// count the plain mean of the averages stands in. Percentiles are
/// point-in-time snapshots and take the last non-null observation.
pub fn summarize_buckets(buckets: &[LatencyBucket]) -> LatencyStats {
    let mut weighted_sum = 0.0;
    let mut weight = 0.0;
    let mut plain: Vec<f64> = Vec::new();

    for bucket in buckets {
        if let Some(avg) = bucket.average {
            match bucket.sample_count {
                Some(count) => {
                    weighted_sum += avg * count;
                    weight += count;
                }
                None => plain.push(avg),
            }
        }
    }

    let average = if weight > 0.0 {
        Some(weighted_sum / weight)
    } else if !plain.is_empty() {
        Some(plain.iter().sum::<f64>() / plain.len() as f64)
    } else {
        None
    };

    let last = |field: fn(&LatencyBucket) -> Option<f64>| {
        buckets.iter().rev().find_map(field)
    };

    LatencyStats {
        average,
        p50: last(|b| b.p50),
        p95: last(|b| b.p95),
        p99: last(|b| b.p99),
    }
}

/// Find the metric entry whose `name.value` matches `name`.
fn metric_entry<'a>(payload: &'a Value, name: &str) -> Option<&'a Value> {
    payload.get("value")?.as_array()?.iter().find(|entry| {
        entry
            .get("name")
            .and_then(|n| n.get("value"))
            .and_then(|v| v.as_str())
            == Some(name)
    })
}

/// All data points across every timeseries of one metric entry.
fn data_points<'a>(entry: &'a Value) -> impl Iterator<Item = &'a Value> {
    entry
        .get("timeseries")
        .and_then(|t| t.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .flat_map(|series| {
            series
                .get("data")
                .and_then(|d| d.as_array())
                .map(Vec::as_slice)
                .unwrap_or(&[])
        })
}

fn collect_buckets(entry: &Value) -> Vec<LatencyBucket> {
    data_points(entry).map(parse_bucket).collect()
}

fn parse_bucket(dp: &Value) -> LatencyBucket {
    let field = |key: &str| dp.get(key).and_then(|v| v.as_f64());
    LatencyBucket {
        timestamp: dp
            .get("timeStamp")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse::<DateTime<Utc>>().ok()),
        average: field("average"),
        sample_count: field("count"),
        p50: field("percentile50"),
        p95: field("percentile95"),
        p99: field("percentile99"),
    }
}

/// Merge two token-total maps, summing shared counters. Used when paged
/// payloads arrive separately.
pub fn merge_token_totals(mut base: TokenTotals, extra: TokenTotals) -> TokenTotals {
    for (name, value) in extra.totals {
        *base.totals.entry(name).or_insert(0) += value;
    }
    let mut missing: BTreeMap<String, ()> = BTreeMap::new();
    for name in base.missing_metrics.drain(..).chain(extra.missing_metrics) {
        if !base.totals.contains_key(&name) {
            missing.insert(name, ());
        }
    }
    base.missing_metrics = missing.into_keys().collect();
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bucket(avg: Option<f64>, count: Option<f64>) -> LatencyBucket {
        LatencyBucket {
            average: avg,
            sample_count: count,
            ..Default::default()
        }
    }

    #[test]
    fn weighted_average_uses_sample_counts() {
        let stats = summarize_buckets(&[
            bucket(Some(100.0), Some(1.0)),
            bucket(Some(200.0), Some(3.0)),
        ]);
        assert_eq!(stats.average, Some(175.0));
    }

    #[test]
    fn falls_back_to_plain_mean_without_counts() {
        let stats = summarize_buckets(&[bucket(Some(100.0), None), bucket(Some(200.0), None)]);
        assert_eq!(stats.average, Some(150.0));
    }

    #[test]
    fn empty_and_all_null_series_yield_none() {
        assert_eq!(summarize_buckets(&[]).average, None);
        let stats = summarize_buckets(&[bucket(None, None), bucket(None, Some(5.0))]);
        assert_eq!(stats.average, None);
        assert_eq!(stats.p95, None);
    }

    #[test]
    fn percentiles_take_last_non_null() {
        let buckets = vec![
            LatencyBucket {
                p95: Some(900.0),
                p99: Some(1500.0),
                ..Default::default()
            },
            LatencyBucket {
                p95: Some(950.0),
                ..Default::default()
            },
            LatencyBucket::default(),
        ];
        let stats = summarize_buckets(&buckets);
        assert_eq!(stats.p95, Some(950.0));
        assert_eq!(stats.p99, Some(1500.0));
        assert_eq!(stats.p50, None);
    }

    #[test]
    fn extracts_report_and_flags_missing_metrics() {
        let payload = json!({
            "value": [{
                "name": {"value": "SuccessLatency"},
                "timeseries": [{
                    "data": [
                        {"timeStamp": "2025-09-01T00:00:00Z", "average": 120.0, "count": 2.0,
                         "percentile50": 100.0, "percentile95": 300.0},
                        {"timeStamp": "2025-09-01T00:05:00Z", "average": 180.0, "count": 2.0},
                    ],
                }],
            }],
        });
        let report = extract_latency(&payload, &LATENCY_METRICS);
        assert_eq!(report.missing_metrics, vec!["TotalLatency"]);
        let stats = &report.metrics["SuccessLatency"];
        assert_eq!(stats.average, Some(150.0));
        assert_eq!(stats.p95, Some(300.0));
    }

    #[test]
    fn token_totals_sum_across_timeseries() {
        let payload = json!({
            "value": [{
                "name": {"value": "TotalTokens"},
                "timeseries": [
                    {"data": [{"total": 100.0}, {"total": null}]},
                    {"data": [{"total": 250.0}]},
                ],
            }],
        });
        let totals = aggregate_token_totals(&payload, &TOKEN_METRICS);
        assert_eq!(totals.totals["TotalTokens"], 350);
        assert_eq!(
            totals.missing_metrics,
            vec!["ProcessedPromptTokens", "GeneratedTokens"]
        );
    }

    #[test]
    fn malformed_payloads_report_everything_missing() {
        for payload in [json!({}), json!({"value": "nope"}), json!(null)] {
            let report = extract_latency(&payload, &LATENCY_METRICS);
            assert!(report.metrics.is_empty());
            assert_eq!(report.missing_metrics.len(), LATENCY_METRICS.len());
        }
    }

    #[test]
    fn merge_sums_shared_counters() {
        let payload_a = json!({
            "value": [{"name": {"value": "TotalTokens"},
                       "timeseries": [{"data": [{"total": 10.0}]}]}],
        });
        let payload_b = json!({
            "value": [{"name": {"value": "TotalTokens"},
                       "timeseries": [{"data": [{"total": 5.0}]}]}],
        });
        let merged = merge_token_totals(
            aggregate_token_totals(&payload_a, &["TotalTokens"]),
            aggregate_token_totals(&payload_b, &["TotalTokens", "GeneratedTokens"]),
        );
        assert_eq!(merged.totals["TotalTokens"], 15);
        assert_eq!(merged.missing_metrics, vec!["GeneratedTokens"]);
    }
}
