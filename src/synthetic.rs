//! Synthetic monitoring series for dashboard sections that have no live
//! backing metric yet. Values are random but shaped like real traffic
//! (smooth drift around a base level), so layouts render realistically.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

/// One synthetic observation.
#[derive(Debug, Clone, Serialize)]
pub struct SyntheticPoint {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "v")]
    pub value: f64,
}

/// A named synthetic series at 30-minute spacing.
#[derive(Debug, Clone, Serialize)]
pub struct SyntheticSeries {
    pub name: String,
    pub series: Vec<SyntheticPoint>,
}

/// Sinusoidal drift plus noise around a random base level.
pub fn fake_timeseries(name: &str, points: usize) -> SyntheticSeries {
    let mut rng = rand::rng();
    let now = Utc::now();
    let base = rng.random_range(50.0..200.0);
    let series = (0..points)
        .map(|i| {
            let timestamp = now - Duration::minutes(30 * (points - i) as i64);
            let variation = (i as f64 / 3.5).sin() * 0.15 * base
                + rng.random_range(-0.1..0.1) * base;
            SyntheticPoint {
                timestamp,
                value: ((base + variation).max(0.0) * 100.0).round() / 100.0,
            }
        })
        .collect();
    SyntheticSeries {
        name: name.to_string(),
        series,
    }
}

/// Synthetic latency distribution for one model: bucketed request counts
/// (fast under 250ms, typical 250-1000ms, slow over 1000ms) plus rough
/// percentile markers.
#[derive(Debug, Clone, Serialize)]
pub struct LatencyDistribution {
    pub model: String,
    pub fast: u32,
    pub normal: u32,
    pub slow: u32,
    pub total: u32,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
}

pub fn latency_distribution(model: &str) -> LatencyDistribution {
    let mut rng = rand::rng();
    let fast = rng.random_range(50..=300);
    let normal = rng.random_range(200..=800);
    let slow = rng.random_range(20..=200);
    let round1 = |v: f64| (v * 10.0).round() / 10.0;
    LatencyDistribution {
        model: model.to_string(),
        fast,
        normal,
        slow,
        total: fast + normal + slow,
        p50: round1(rng.random_range(220.0..600.0)),
        p90: round1(rng.random_range(700.0..1400.0)),
        p99: round1(rng.random_range(1500.0..2400.0)),
    }
}

/// Daily cost records for offline dashboard rendering, one per day ending
/// yesterday.
pub fn fake_cost_records(days: usize) -> Vec<crate::models::CostRecord> {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();
    (0..days)
        .map(|i| crate::models::CostRecord {
            date: today - Duration::days((days - i) as i64),
            cost: (rng.random_range(2.0f64..40.0) * 100.0).round() / 100.0,
            currency: "USD".to_string(),
        })
        .collect()
}

/// Headline counters for the operational section.
#[derive(Debug, Clone, Serialize)]
pub struct OperationalSnapshot {
    pub total_requests_24h: u32,
    pub avg_latency_ms: f64,
    pub avg_tokens_per_request: f64,
    pub safety_flags_24h: u32,
    pub errors_24h: u32,
}

pub fn operational_snapshot() -> OperationalSnapshot {
    let mut rng = rand::rng();
    let round1 = |v: f64| (v * 10.0).round() / 10.0;
    OperationalSnapshot {
        total_requests_24h: rng.random_range(500..=1800),
        avg_latency_ms: round1(rng.random_range(120.0..480.0)),
        avg_tokens_per_request: round1(rng.random_range(320.0..1400.0)),
        safety_flags_24h: rng.random_range(0..=12),
        errors_24h: rng.random_range(0..=5),
    }
}
