//! # Cache Module
//!
//! In-memory caching for fetched monitoring payloads, so dashboard
//! refreshes within the TTL window do not re-query the billing and
//! metrics APIs.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Cache entry with expiration
#[derive(Clone, Debug)]
struct CacheEntry {
    payload: Value,
    expires_at: DateTime<Utc>,
}

/// Global cache for fetched API payloads
static PAYLOAD_CACHE: Lazy<Mutex<HashMap<String, CacheEntry>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Default cache TTL in seconds
const CACHE_TTL_SECONDS: i64 = 30;

/// Generate cache key from the queried resource, timeframe, and options
pub fn make_cache_key(resource: &str, timeframe: &str, options: &str) -> String {
    format!("{resource}:{timeframe}:{options}")
}

/// Get a cached payload if available and not expired
pub fn get_cached_payload(key: &str) -> Option<Value> {
    let now = Utc::now();
    let cache = PAYLOAD_CACHE.lock().ok()?;
    let entry = cache.get(key)?;
    if entry.expires_at > now {
        Some(entry.payload.clone())
    } else {
        None
    }
}

/// Store a payload in the cache
pub fn cache_payload(key: &str, payload: Value) {
    let ttl = std::env::var("GENAI_CACHE_TTL")
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(CACHE_TTL_SECONDS);

    let now = Utc::now();
    let expires_at = now + Duration::seconds(ttl);

    if let Ok(mut cache) = PAYLOAD_CACHE.lock() {
        // Clean up expired entries while we have the lock
        cache.retain(|_, entry| entry.expires_at > now);
        cache.insert(key.to_string(), CacheEntry { payload, expires_at });
    }
}

/// Clear all cached data
pub fn clear_cache() {
    if let Ok(mut cache) = PAYLOAD_CACHE.lock() {
        cache.clear();
    }
}

/// Get cache statistics (for debugging)
pub fn cache_stats() -> (usize, usize) {
    if let Ok(cache) = PAYLOAD_CACHE.lock() {
        let total = cache.len();
        let now = Utc::now();
        let valid = cache.values().filter(|e| e.expires_at > now).count();
        (total, valid)
    } else {
        (0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_within_ttl() {
        clear_cache();
        let key = make_cache_key("/subscriptions/abc", "Last7Days", "cost");
        assert!(get_cached_payload(&key).is_none());
        cache_payload(&key, json!({"rows": [1, 2]}));
        assert_eq!(get_cached_payload(&key), Some(json!({"rows": [1, 2]})));
        let (total, valid) = cache_stats();
        assert!(total >= 1);
        assert!(valid >= 1);
    }

    #[test]
    fn keys_separate_timeframes() {
        clear_cache();
        let week = make_cache_key("r", "Last7Days", "cost");
        let month = make_cache_key("r", "Last30Days", "cost");
        cache_payload(&week, json!(1));
        assert!(get_cached_payload(&month).is_none());
    }
}
