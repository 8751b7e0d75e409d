//! Structured report recovered from an opaque model-call error string.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Detail for one content-filter category inside an error payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterDetail {
    pub filtered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Human-readable message plus any embedded content-filter detail.
///
/// `message` is always non-empty; `filter_detail` may be empty.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub message: String,
    pub filter_detail: BTreeMap<String, FilterDetail>,
}

impl ErrorReport {
    pub fn message_only(message: impl Into<String>) -> Self {
        ErrorReport {
            message: message.into(),
            filter_detail: BTreeMap::new(),
        }
    }
}

impl FilterDetail {
    /// Build from a parsed category mapping; `None` when the value is not a
    /// mapping carrying a `filtered` key.
    pub fn from_value(v: &Value) -> Option<Self> {
        let map = v.as_object()?;
        let filtered = match map.get("filtered")? {
            Value::Bool(b) => *b,
            other => other.to_string().trim_matches('"').eq_ignore_ascii_case("true"),
        };
        let severity = map
            .get("severity")
            .and_then(|s| s.as_str())
            .map(|s| s.to_string());
        Some(FilterDetail { filtered, severity })
    }
}
