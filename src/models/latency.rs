//! Latency time-series buckets and their summarized form.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One sampling window from the metrics API. Every field except the
/// timestamp may be absent for a given bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LatencyBucket {
    pub timestamp: Option<DateTime<Utc>>,
    pub average: Option<f64>,
    pub sample_count: Option<f64>,
    pub p50: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
}

/// Summary statistics for one latency metric across its buckets.
///
/// Percentiles are point-in-time snapshots, so they carry the last non-null
/// observation rather than an average.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LatencyStats {
    pub average: Option<f64>,
    pub p50: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
}

/// Per-metric stats plus the names that were absent from the result set
/// entirely, so callers can tell "zero" from "unavailable".
#[derive(Debug, Clone, Default, Serialize)]
pub struct LatencyReport {
    pub metrics: BTreeMap<String, LatencyStats>,
    pub missing_metrics: Vec<String>,
}

/// Summed per-metric token counters over a metrics payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TokenTotals {
    pub totals: BTreeMap<String, u64>,
    pub missing_metrics: Vec<String>,
}
