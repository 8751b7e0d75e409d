//! # Cost Aggregation
//!
//! Turns a Cost Management query response into daily [`CostRecord`]s and
//! reduces a series to a [`CostSummary`] plus chart-ready coordinates.
//!
//! Missing required columns is the one hard failure in this crate: a
//! silently zeroed cost report would be worse than an explicit error.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

use crate::models::{ChartPoint, CostRecord, CostSummary};

const REQUIRED_COLUMNS: [&str; 3] = ["PreTaxCost", "UsageDate", "Currency"];

/// Parse a billing query response (`properties.columns` / `properties.rows`)
/// into chronological cost records. Fails with a descriptive error when any
/// required column is absent.
pub fn parse_cost_response(response: &Value) -> Result<Vec<CostRecord>> {
    let props = response.get("properties").unwrap_or(&Value::Null);
    let columns = props
        .get("columns")
        .and_then(|c| c.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let rows = props
        .get("rows")
        .and_then(|r| r.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let index_map: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .filter_map(|(idx, col)| col.get("name").and_then(|n| n.as_str()).map(|n| (n, idx)))
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !index_map.contains_key(**c))
        .copied()
        .collect();
    if !missing.is_empty() {
        bail!(
            "cost response columns missing required fields {:?}; got {:?}",
            missing,
            index_map.keys().collect::<Vec<_>>()
        );
    }

    let cost_idx = index_map["PreTaxCost"];
    let date_idx = index_map["UsageDate"];
    let currency_idx = index_map["Currency"];

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row
            .as_array()
            .with_context(|| format!("cost row is not an array: {row}"))?;
        let cost = cells
            .get(cost_idx)
            .and_then(number_like)
            .with_context(|| format!("unreadable PreTaxCost in row {row}"))?;
        let date = cells
            .get(date_idx)
            .and_then(usage_date)
            .with_context(|| format!("unreadable UsageDate in row {row}"))?;
        let currency = cells
            .get(currency_idx)
            .and_then(|c| c.as_str())
            .unwrap_or("USD")
            .to_string();
        records.push(CostRecord {
            date,
            cost,
            currency,
        });
    }
    records.sort_by_key(|r| r.date);
    Ok(records)
}

// Costs arrive as JSON numbers or numeric strings depending on API version.
fn number_like(v: &Value) -> Option<f64> {
    v.as_f64().or_else(|| v.as_str()?.trim().parse().ok())
}

// UsageDate is a YYYYMMDD integer or numeric string.
fn usage_date(v: &Value) -> Option<NaiveDate> {
    let text = match v {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };
    NaiveDate::parse_from_str(text.trim(), "%Y%m%d").ok()
}

/// Summarize a cost series. The series is re-sorted defensively, so the
/// summary is independent of input order. Empty input yields the zeroed
/// summary rather than an error.
pub fn summarize(records: &[CostRecord]) -> CostSummary {
    if records.is_empty() {
        return CostSummary::empty();
    }
    let mut sorted: Vec<&CostRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let total: f64 = sorted.iter().map(|r| r.cost).sum();
    let average_daily = total / sorted.len() as f64;
    let latest = sorted[sorted.len() - 1].clone();

    let day_over_day_delta_percent = if sorted.len() >= 2 {
        let prev = sorted[sorted.len() - 2].cost;
        if prev > 0.0 {
            Some((latest.cost - prev) / prev * 100.0)
        } else {
            None
        }
    } else {
        None
    };

    CostSummary {
        total,
        average_daily,
        count: sorted.len(),
        currency: Some(latest.currency.clone()),
        latest: Some(latest),
        day_over_day_delta_percent,
    }
}

/// Map each record to normalized chart coordinates: `x` is the fraction of
/// elapsed days over the series span, `y` the fraction of the series
/// maximum cost. Degenerate series (single day, all-zero costs) pin the
/// affected axis to zero instead of dividing by zero.
pub fn chart_points(records: &[CostRecord]) -> Vec<ChartPoint> {
    if records.is_empty() {
        return Vec::new();
    }
    let mut sorted: Vec<&CostRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    let date_min = sorted[0].date;
    let span_days = (sorted[sorted.len() - 1].date - date_min).num_days();
    let max_cost = sorted.iter().map(|r| r.cost).fold(0.0f64, f64::max);

    sorted
        .into_iter()
        .map(|r| {
            let x = if span_days > 0 {
                (r.date - date_min).num_days() as f64 / span_days as f64
            } else {
                0.0
            };
            let y = if max_cost > 0.0 { r.cost / max_cost } else { 0.0 };
            ChartPoint {
                date: r.date,
                cost: r.cost,
                x,
                y,
            }
        })
        .collect()
}
