//! HTML assembly for the monitoring dashboard: headline metric blocks,
//! the cost section fed by the billing aggregation, the operational
//! section fed by synthetic series, and the per-model latency section.
//! Output is one standalone page with inline styles.

use chrono::Utc;
use std::collections::BTreeMap;

use crate::charts;
use crate::models::{CostRecord, CostSummary};
use crate::synthetic::{self, LatencyDistribution};

const PAGE_STYLE: &str = r#"
body{font-family:Helvetica,Arial,sans-serif;background:#f4f6f8;margin:0;padding:1.5rem;}
.ms-card{background:#ffffff;border:1.5px solid #eaecef;border-radius:10px;padding:1.1rem 1.2rem;
box-shadow:0 1px 2px rgba(0,40,85,0.06);}
.ms-section-title{color:#002855;font-weight:700;letter-spacing:0.3px;}
.ms-footer{text-align:center;font-size:0.7rem;color:#777;margin-top:2rem;}
"#;

/// One headline metric card.
pub fn metric_block(label: &str, value: &str, highlight: bool) -> String {
    let border = if highlight {
        "border:2px solid #0051a8;"
    } else {
        "border:1.5px solid #eaecef;"
    };
    format!(
        r#"<div style="flex:1;min-width:170px;margin:0.4rem;">
<div class="ms-card" style="padding:1rem 0.9rem;{border}">
<div style="font-size:0.7rem;text-transform:uppercase;letter-spacing:1px;color:#0051a8;font-weight:600;margin-bottom:0.3rem;">{label}</div>
<div style="font-size:1.15rem;font-weight:600;color:#002855;word-break:break-word;">{value}</div>
</div></div>"#
    )
}

/// Titled two-column key/value table.
pub fn simple_table(title: &str, rows: &[(String, String)]) -> String {
    let trs: String = rows
        .iter()
        .map(|(k, v)| {
            format!(
                "<tr><td style='padding:5px 8px;font-weight:600;color:#002855'>{k}</td>\
                 <td style='padding:5px 8px;color:#1a1a1a'>{v}</td></tr>"
            )
        })
        .collect();
    format!(
        r#"<div class="ms-card" style="margin-bottom:1rem;">
<h3 class="ms-section-title" style="margin-top:0;font-size:1.05rem;">{title}</h3>
<table style="width:100%;border-collapse:collapse;font-size:0.8rem;"><tbody>{trs}</tbody></table>
</div>"#
    )
}

/// Cost section: summary blocks, trend and distribution charts, and a
/// recent-days table. `records` must be sorted ascending by date.
pub fn cost_section(timeframe: &str, summary: &CostSummary, records: &[CostRecord]) -> String {
    if records.is_empty() {
        return r#"<div class="ms-card" style="margin-top:1.5rem;">
<h3 class="ms-section-title" style="margin-top:0;font-size:1.15rem;">Cost Metrics</h3>
<div style="font-size:0.85rem;">No cost data returned for selected timeframe.</div>
</div>"#
            .to_string();
    }

    let currency = summary.currency.as_deref().unwrap_or("USD");
    let latest_label = summary
        .latest
        .as_ref()
        .map(|r| format!("Latest ({})", r.date.format("%m-%d")))
        .unwrap_or_else(|| "Latest".to_string());
    let latest_value = summary
        .latest
        .as_ref()
        .map(|r| format!("{:.2} {currency}", r.cost))
        .unwrap_or_else(|| "n/a".to_string());

    let summary_html = format!(
        r#"<div style="display:flex;flex-wrap:wrap;margin:-0.4rem;">{}{}{}{}{}{}</div>"#,
        metric_block("Timeframe", timeframe, true),
        metric_block("Total Cost", &format!("{:.2} {currency}", summary.total), false),
        metric_block("Avg Daily", &format!("{:.2} {currency}", summary.average_daily), false),
        metric_block(&latest_label, &latest_value, false),
        metric_block("Day Change", &summary.delta_display(), false),
        metric_block("Data Points", &summary.count.to_string(), false),
    );

    let line_svg = charts::cost_line_area_svg(records, 760.0, 240.0, "#0051a8");
    let pie_svg = charts::cost_pie_svg(records, 300.0);

    let recent = if records.len() > 7 {
        &records[records.len() - 7..]
    } else {
        records
    };
    let table_rows: String = recent
        .iter()
        .map(|r| {
            format!(
                "<tr><td style='padding:4px 8px;font-weight:600;color:#002855'>{}</td>\
                 <td style='padding:4px 8px;text-align:right;'>{:.2}</td></tr>",
                r.date, r.cost,
            )
        })
        .collect();

    format!(
        r#"<div class="ms-card" style="margin-top:1.3rem;">
<h3 class="ms-section-title" style="margin-top:0;font-size:1.15rem;">Cost Metrics (Azure Cost Management)</h3>
{summary_html}
<div style="display:grid;grid-template-columns:repeat(auto-fit,minmax(320px,1fr));gap:1.25rem;margin-top:1rem;">
<div><div style="font-size:0.75rem;font-weight:600;color:#0051a8;margin-bottom:6px;">Daily Cost Trend</div>
<div style="overflow:auto;">{line_svg}</div></div>
<div><div style="font-size:0.75rem;font-weight:600;color:#0051a8;margin-bottom:6px;">Distribution by Day</div>
<div style="overflow:auto;">{pie_svg}</div></div>
<div><div style="font-size:0.75rem;font-weight:600;color:#0051a8;margin-bottom:6px;">Recent Days</div>
<div class="ms-card" style="padding:0.7rem 0.7rem 0.4rem 0.7rem;margin:0;border:1px solid #eaecef;">
<table style="width:100%;border-collapse:collapse;font-size:0.70rem;">
<thead><tr><th style="text-align:left;padding:6px 8px;color:#0051a8;">Date</th>
<th style="text-align:right;padding:6px 8px;color:#0051a8;">PreTaxCost ({currency})</th></tr></thead>
<tbody>{table_rows}</tbody></table></div></div></div>
<div style="text-align:right;font-size:0.6rem;color:#555;margin-top:0.75rem;">
Generated {}Z — Currency: {currency}</div></div>"#,
        Utc::now().format("%Y-%m-%dT%H:%M:%S"),
    )
}

/// Cost section placeholder when the fetch itself failed.
pub fn cost_error_section(error: &str) -> String {
    format!(
        r#"<div class="ms-card" style="margin-top:1.5rem;">
<h3 class="ms-section-title" style="margin-top:0;font-size:1.15rem;">Cost Metrics</h3>
<div style="color:#a00;font-size:0.85rem;">Failed to fetch cost data: {error}</div>
</div>"#
    )
}

/// Operational section: headline counters, trend sparklines, governance
/// table, and the configured cost table. Series are synthetic until a
/// live request-log backend exists.
pub fn operational_section(
    governance_metrics: &[(String, String)],
    model_costs: &BTreeMap<String, f64>,
) -> String {
    let req_series = synthetic::fake_timeseries("Request Count", 30);
    let latency_series = synthetic::fake_timeseries("Latency (ms)", 30);
    let token_series = synthetic::fake_timeseries("Tokens Used", 30);
    let snapshot = synthetic::operational_snapshot();

    let top_metrics = format!(
        r#"<div style="display:flex;flex-wrap:wrap;margin:-0.4rem;">{}{}{}{}{}{}</div>"#,
        metric_block("Total Requests (24h)", &snapshot.total_requests_24h.to_string(), true),
        metric_block("Avg Latency (ms)", &snapshot.avg_latency_ms.to_string(), false),
        metric_block("Avg Tokens / Req", &snapshot.avg_tokens_per_request.to_string(), false),
        metric_block("Safety Flags (24h)", &snapshot.safety_flags_24h.to_string(), false),
        metric_block("Errors (24h)", &snapshot.errors_24h.to_string(), false),
        metric_block("Active Models", &model_costs.len().to_string(), false),
    );

    let cost_rows: Vec<(String, String)> = if model_costs.is_empty() {
        vec![("No Models".to_string(), "N/A".to_string())]
    } else {
        model_costs
            .iter()
            .map(|(m, c)| (m.clone(), format!("${c}/1M tokens")))
            .collect()
    };
    let governance_html = simple_table("Governance & Compliance", governance_metrics);
    let config_cost_html = simple_table("Configured Model Costs", &cost_rows);

    let trends = format!(
        r#"<div class="ms-card" style="margin-bottom:1rem;">
<h3 class="ms-section-title" style="margin-top:0;font-size:1.05rem;">Operational Trends</h3>
<div style="display:grid;grid-template-columns:repeat(auto-fit,minmax(230px,1fr));gap:1rem;">
<div><div style="font-size:0.65rem;font-weight:600;color:#0051a8;margin-bottom:4px;">Request Volume</div>{}</div>
<div><div style="font-size:0.65rem;font-weight:600;color:#0051a8;margin-bottom:4px;">Latency (ms)</div>{}</div>
<div><div style="font-size:0.65rem;font-weight:600;color:#0051a8;margin-bottom:4px;">Tokens Used</div>{}</div>
</div></div>"#,
        charts::sparkline_html(&req_series),
        charts::sparkline_html(&latency_series),
        charts::sparkline_html(&token_series),
    );

    let raw_json = serde_json::json!({
        "request_timeseries": req_series,
        "latency_timeseries": latency_series,
        "token_timeseries": token_series,
    });
    let raw_html = format!(
        r#"<div class="ms-card">
<h3 class="ms-section-title" style="margin-top:0;font-size:1.05rem;">Raw Monitoring Data (Sample)</h3>
<pre style="font-size:0.6rem;max-height:250px;overflow:auto;background:#f7f8fa;padding:0.9rem;border:1px solid #eaecef;border-radius:8px;">{}</pre>
</div>"#,
        serde_json::to_string_pretty(&raw_json).unwrap_or_default(),
    );

    format!(
        r#"{top_metrics}
{trends}
<div style="display:grid;grid-template-columns:repeat(auto-fit,minmax(310px,1fr));gap:1.1rem;">
<div>{governance_html}</div><div>{config_cost_html}</div></div>
{raw_html}"#
    )
}

/// Latency section: stacked distribution chart plus a percentile table.
pub fn latency_section(data: &[LatencyDistribution]) -> String {
    let svg = charts::stacked_latency_svg(data, 820.0);
    let table_rows: String = data
        .iter()
        .map(|d| {
            format!(
                "<tr><td style='padding:4px 6px;font-weight:600;color:#002855'>{}</td>\
                 <td style='padding:4px 6px;text-align:right;'>{} ms</td>\
                 <td style='padding:4px 6px;text-align:right;'>{} ms</td>\
                 <td style='padding:4px 6px;text-align:right;'>{} ms</td>\
                 <td style='padding:4px 6px;text-align:right;'>{}/{}/{}</td>\
                 <td style='padding:4px 6px;text-align:right;'>{}</td></tr>",
                d.model, d.p50, d.p90, d.p99, d.fast, d.normal, d.slow, d.total,
            )
        })
        .collect();

    format!(
        r#"<div class="ms-card" style="margin-top:1.3rem;">
<h3 class="ms-section-title" style="margin-top:0;font-size:1.05rem;">Latency Distribution</h3>
<div style="overflow:auto;padding:0.3rem 0 0.6rem 0;">{svg}</div>
<div class="ms-card" style="padding:0.6rem 0.7rem 0.4rem 0.7rem;margin:0;border:1px solid #eaecef;">
<table style="width:100%;border-collapse:collapse;font-size:0.70rem;margin-top:0.75rem;">
<thead><tr>
<th style="text-align:left;padding:6px 6px;color:#0051a8;">Model</th>
<th style="text-align:right;padding:6px 6px;color:#0051a8;">p50</th>
<th style="text-align:right;padding:6px 6px;color:#0051a8;">p90</th>
<th style="text-align:right;padding:6px 6px;color:#0051a8;">p99</th>
<th style="text-align:right;padding:6px 6px;color:#0051a8;">Fast/Typ/Slow</th>
<th style="text-align:right;padding:6px 6px;color:#0051a8;">Total Req</th>
</tr></thead><tbody>{table_rows}</tbody></table></div>
<div style="text-align:right;font-size:0.55rem;color:#555;margin-top:0.6rem;">
Synthetic data for visualization only.</div></div>"#
    )
}

/// Assemble the full standalone dashboard page.
pub fn render_page(operational: &str, cost: &str, latency: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8">
<title>Gen AI Playground Monitoring</title>
<style>{PAGE_STYLE}</style></head>
<body>
<h2 class="ms-section-title">Monitoring Dashboard</h2>
{operational}
{cost}
{latency}
<div class="ms-footer">Gen AI Playground Monitoring</div>
</body></html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost;

    fn record(date: &str, cost: f64) -> CostRecord {
        CostRecord {
            date: date.parse().unwrap(),
            cost,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn metric_block_highlight_changes_border() {
        let plain = metric_block("Total Cost", "1.00 USD", false);
        let hot = metric_block("Timeframe", "Last7Days", true);
        assert!(plain.contains("1.5px solid"));
        assert!(hot.contains("2px solid #0051a8"));
    }

    #[test]
    fn cost_section_shows_summary_and_delta() {
        let records = vec![record("2025-09-01", 10.0), record("2025-09-02", 12.5)];
        let summary = cost::summarize(&records);
        let html = cost_section("Last7Days", &summary, &records);
        assert!(html.contains("+25.00% vs prev day"));
        assert!(html.contains("22.50 USD"));
        assert!(html.contains("Daily Cost Trend"));
    }

    #[test]
    fn empty_records_render_placeholder_section() {
        let html = cost_section("Last7Days", &CostSummary::empty(), &[]);
        assert!(html.contains("No cost data returned"));
        assert!(!html.contains("Daily Cost Trend"));
    }

    #[test]
    fn recent_table_keeps_last_seven_days() {
        let records: Vec<CostRecord> = (1..=10)
            .map(|d| record(&format!("2025-09-{d:02}"), d as f64))
            .collect();
        let summary = cost::summarize(&records);
        let html = cost_section("MonthToDate", &summary, &records);
        assert!(!html.contains("2025-09-03</td>"));
        assert!(html.contains("2025-09-04</td>"));
        assert!(html.contains("2025-09-10</td>"));
    }

    #[test]
    fn page_contains_all_sections() {
        let operational = operational_section(
            &[("Policy Violations (30d)".to_string(), "0".to_string())],
            &BTreeMap::new(),
        );
        let latency = latency_section(&[crate::synthetic::latency_distribution("gpt-4o")]);
        let page = render_page(&operational, &cost_error_section("timeout"), &latency);
        assert!(page.contains("<!DOCTYPE html>"));
        assert!(page.contains("Operational Trends"));
        assert!(page.contains("Failed to fetch cost data: timeout"));
        assert!(page.contains("Latency Distribution"));
    }
}
