//! Daily billing records and the summary derived from them.

use chrono::NaiveDate;
use serde::Serialize;

/// One day of spend as reported by the billing export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRecord {
    pub date: NaiveDate,
    pub cost: f64,
    pub currency: String,
}

/// Aggregate view over a cost series, recomputed on every fetch.
#[derive(Debug, Clone, Serialize)]
pub struct CostSummary {
    pub total: f64,
    pub average_daily: f64,
    pub count: usize,
    pub currency: Option<String>,
    pub latest: Option<CostRecord>,
    /// Day-over-day change; `None` renders as "n/a".
    pub day_over_day_delta_percent: Option<f64>,
}

impl CostSummary {
    /// Signed percentage for display, e.g. `+4.20% vs prev day`, or `n/a`.
    pub fn delta_display(&self) -> String {
        match self.day_over_day_delta_percent {
            Some(pct) => format!("{pct:+.2}% vs prev day"),
            None => "n/a".to_string(),
        }
    }

    pub fn empty() -> Self {
        CostSummary {
            total: 0.0,
            average_daily: 0.0,
            count: 0,
            currency: None,
            latest: None,
            day_over_day_delta_percent: None,
        }
    }
}

/// Chart-ready coordinate for one cost record: `x`/`y` are 0..=1 fractions
/// of the date span and the series maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub cost: f64,
    pub x: f64,
    pub y: f64,
}
