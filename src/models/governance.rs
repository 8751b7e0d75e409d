//! Governance log entries (one JSON object per line on disk).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged model interaction. The response is truncated before logging;
/// `response_length` keeps the original size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionLog {
    pub timestamp: DateTime<Utc>,
    pub model: String,
    pub prompt: String,
    pub response: String,
    pub response_length: usize,
    #[serde(default)]
    pub issues: Vec<String>,
}
