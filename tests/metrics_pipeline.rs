use serde_json::json;

use genai_playground::metrics::{
    LATENCY_METRICS, TOKEN_METRICS, aggregate_token_totals, extract_latency,
};

fn monitor_payload() -> serde_json::Value {
    json!({
        "cost": 0,
        "timespan": "2025-09-01T00:00:00Z/2025-09-01T02:00:00Z",
        "interval": "PT1H",
        "value": [
            {
                "name": {"value": "SuccessLatency", "localizedValue": "Success Latency"},
                "timeseries": [{
                    "data": [
                        {"timeStamp": "2025-09-01T00:00:00Z", "average": 100.0, "count": 1.0,
                         "percentile50": 90.0, "percentile95": 180.0, "percentile99": 240.0},
                        {"timeStamp": "2025-09-01T01:00:00Z", "average": 200.0, "count": 3.0,
                         "percentile50": 110.0, "percentile95": 210.0},
                    ],
                }],
            },
            {
                "name": {"value": "TotalLatency"},
                "timeseries": [{
                    "data": [
                        {"timeStamp": "2025-09-01T00:00:00Z"},
                        {"timeStamp": "2025-09-01T01:00:00Z"},
                    ],
                }],
            },
            {
                "name": {"value": "ProcessedPromptTokens"},
                "timeseries": [{"data": [{"total": 1200.0}, {"total": 800.0}]}],
            },
            {
                "name": {"value": "GeneratedTokens"},
                "timeseries": [
                    {"data": [{"total": 300.0}]},
                    {"data": [{"total": 150.0}]},
                ],
            },
        ],
    })
}

#[test]
fn latency_report_from_monitor_payload() {
    let report = extract_latency(&monitor_payload(), &LATENCY_METRICS);
    assert!(report.missing_metrics.is_empty());

    let success = &report.metrics["SuccessLatency"];
    // (100*1 + 200*3) / 4
    assert_eq!(success.average, Some(175.0));
    assert_eq!(success.p50, Some(110.0));
    assert_eq!(success.p95, Some(210.0));
    // p99 was only present in the first bucket
    assert_eq!(success.p99, Some(240.0));

    // Present but entirely null: entry exists with no statistics
    let total = &report.metrics["TotalLatency"];
    assert_eq!(total.average, None);
    assert_eq!(total.p50, None);
}

#[test]
fn token_totals_from_monitor_payload() {
    let totals = aggregate_token_totals(&monitor_payload(), &TOKEN_METRICS);
    assert_eq!(totals.totals["ProcessedPromptTokens"], 2000);
    assert_eq!(totals.totals["GeneratedTokens"], 450);
    assert_eq!(totals.missing_metrics, vec!["TotalTokens"]);
}

#[test]
fn report_serializes_with_missing_lists() {
    let report = extract_latency(&json!({"value": []}), &LATENCY_METRICS);
    let rendered = serde_json::to_value(&report).unwrap();
    assert_eq!(
        rendered["missing_metrics"],
        json!(["SuccessLatency", "TotalLatency"])
    );
    assert_eq!(rendered["metrics"], json!({}));
}
