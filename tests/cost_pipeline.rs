use serde_json::json;

use genai_playground::cost::{chart_points, parse_cost_response, summarize};
use genai_playground::dashboard;

fn billing_payload() -> serde_json::Value {
    json!({
        "id": "/subscriptions/abc/providers/Microsoft.CostManagement/query/xyz",
        "properties": {
            "columns": [
                {"name": "PreTaxCost", "type": "Number"},
                {"name": "UsageDate", "type": "Number"},
                {"name": "Currency", "type": "String"},
            ],
            "rows": [
                [14.1, 20250903, "USD"],
                [10.0, 20250901, "USD"],
                [12.5, 20250902, "USD"],
            ],
        },
    })
}

#[test]
fn billing_payload_to_summary() {
    let records = parse_cost_response(&billing_payload()).unwrap();
    assert_eq!(records.len(), 3);
    // Parser sorts ascending regardless of the API's row order
    assert!(records.windows(2).all(|w| w[0].date < w[1].date));

    let summary = summarize(&records);
    assert!((summary.total - 36.6).abs() < 1e-9);
    assert!((summary.average_daily - 12.2).abs() < 1e-9);
    assert_eq!(summary.count, 3);
    assert_eq!(summary.currency.as_deref(), Some("USD"));
    assert_eq!(summary.latest.as_ref().unwrap().cost, 14.1);
    // (14.1 - 12.5) / 12.5 * 100
    let delta = summary.day_over_day_delta_percent.unwrap();
    assert!((delta - 12.8).abs() < 1e-9);
}

#[test]
fn missing_required_column_fails_loudly() {
    let payload = json!({
        "properties": {
            "columns": [{"name": "Cost"}, {"name": "UsageDate"}, {"name": "Currency"}],
            "rows": [[1.0, 20250901, "USD"]],
        },
    });
    let err = parse_cost_response(&payload).unwrap_err().to_string();
    assert!(err.contains("PreTaxCost"), "{err}");
}

#[test]
fn chart_points_span_unit_square() {
    let records = parse_cost_response(&billing_payload()).unwrap();
    let points = chart_points(&records);
    assert_eq!(points.len(), 3);
    assert!(points.iter().all(|p| (0.0..=1.0).contains(&p.x)));
    assert!(points.iter().all(|p| (0.0..=1.0).contains(&p.y)));
    assert_eq!(points[0].x, 0.0);
    assert_eq!(points[2].x, 1.0);
    assert_eq!(points[2].y, 1.0);
}

#[test]
fn dashboard_cost_section_renders_summary() {
    let records = parse_cost_response(&billing_payload()).unwrap();
    let summary = summarize(&records);
    let html = dashboard::cost_section("Last7Days", &summary, &records);
    assert!(html.contains("36.60 USD"));
    assert!(html.contains("+12.80% vs prev day"));
    assert!(html.contains("Latest (09-03)"));
    assert!(html.contains("gradCostArea"));
    assert!(html.contains("Daily Distribution"));
}
