//! Raw model-call payloads and the normalized record derived from them.

use serde::Serialize;
use serde_json::Value;

/// One raw model-call result, classified into the shapes the playground
/// accepts. Backends disagree on presentation: some return a structured
/// chat-completion mapping, some an `{"error": ...}` payload, and some SDKs
/// only surface a debug-repr string of the response object.
#[derive(Debug, Clone)]
pub enum RawResponse {
    /// Success-shaped mapping with `choices`/`usage` style fields.
    Completion(Value),
    /// Error payload: the string carried under an `error` key.
    Error(String),
    /// Plain text. Either literal content or an SDK debug-repr, which the
    /// normalizer text-scrapes as a last resort.
    Text(String),
}

impl RawResponse {
    /// Tag a decoded JSON value into one of the supported shapes.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::String(s) => RawResponse::Text(s),
            // An error payload carries an `error` key and no usable content.
            Value::Object(ref map)
                if map.contains_key("error")
                    && map.get("content").map(Value::is_null).unwrap_or(true) =>
            {
                let msg = match map.get("error") {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                RawResponse::Error(msg)
            }
            other => RawResponse::Completion(other),
        }
    }
}

/// Safety-flag counts extracted from a content-filter mapping.
///
/// Invariant: `flagged_count <= total_categories`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SafetySummary {
    pub flagged_count: u32,
    pub total_categories: u32,
    pub flagged_names: Vec<String>,
}

impl SafetySummary {
    /// Display form used by the playground result column, e.g. `1/4`.
    pub fn display(&self) -> String {
        format!("{}/{}", self.flagged_count, self.total_categories)
    }
}

/// Uniform record produced from one raw backend response.
///
/// `content: None` means extraction failed, not an empty answer; likewise
/// `total_tokens: None` means unknown (zero is a legitimate count).
#[derive(Debug, Clone, Serialize)]
pub struct ModelResponse {
    pub content: Option<String>,
    pub total_tokens: Option<u64>,
    pub safety: SafetySummary,
    pub error: Option<String>,
}

impl ModelResponse {
    /// Content for display, substituting the extraction-failure sentinel.
    pub fn content_display(&self) -> &str {
        self.content
            .as_deref()
            .unwrap_or("Unable to extract model response.")
    }
}
