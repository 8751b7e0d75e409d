//! # Response Normalization
//!
//! Reduces heterogeneous model-call results to a uniform [`ModelResponse`]
//! record: answer text, total token count, and a safety-flag summary.
//!
//! Backends present the same logical fields in different shapes (nested
//! chat-completion mappings, error payloads, plain strings, SDK debug
//! reprs), so every extraction runs a structured-first fallback chain and
//! degrades to null/empty instead of failing. `normalize` never errors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::models::{ModelResponse, RawResponse, SafetySummary};
use crate::repr::{block_after_marker, parse_literal_map};

// Recovers a bare token count from a debug rendering, e.g.
// `usage=CompletionUsage(..., total_tokens=57)` or `"total_tokens": 57`.
static TOKEN_FALLBACK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"total_tokens["']?\s*[=:]\s*(\d+)"#).unwrap());

// Content inside an OpenAI-style repr: message=ChatCompletionMessage(content='...', refusal=...
static REPR_CONTENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)message=ChatCompletionMessage\(\s*content=['"](?P<content>.*?)['"]\s*,\s*refusal"#)
        .unwrap()
});

const SAFETY_MARKER: &str = "content_filter_results";

/// Normalize one classified raw response. Pure; never fails. Fields that
/// cannot be extracted come back as `None`/empty, never fabricated.
pub fn normalize(raw: &RawResponse) -> ModelResponse {
    match raw {
        RawResponse::Error(msg) => ModelResponse {
            content: None,
            total_tokens: None,
            safety: SafetySummary::default(),
            error: Some(if msg.trim().is_empty() {
                "Response filtered or error".to_string()
            } else {
                msg.clone()
            }),
        },
        RawResponse::Text(text) => normalize_text(text),
        RawResponse::Completion(value) => normalize_completion(value),
    }
}

/// Convenience wrapper: classify a decoded JSON value, then normalize.
pub fn normalize_value(value: Value) -> ModelResponse {
    normalize(&RawResponse::classify(value))
}

fn normalize_text(text: &str) -> ModelResponse {
    // A plain string is its own content, unless it is an SDK debug repr,
    // in which case the content sits inside the rendered message object.
    let content = if let Some(caps) = REPR_CONTENT_RE.captures(text) {
        Some(caps["content"].trim().to_string())
    } else if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    };

    ModelResponse {
        content,
        total_tokens: scrape_tokens(text),
        safety: scrape_safety(text),
        error: None,
    }
}

fn normalize_completion(value: &Value) -> ModelResponse {
    let choice = first_choice(value);

    let content = choice
        .and_then(choice_content)
        .or_else(|| top_level_content(value));

    let total_tokens = value
        .get("usage")
        .and_then(|u| u.get("total_tokens"))
        .and_then(|n| n.as_u64())
        .or_else(|| scrape_tokens(&value.to_string()));

    let safety = choice
        .and_then(|c| c.get(SAFETY_MARKER))
        .and_then(|s| s.as_object())
        .map(count_safety)
        .unwrap_or_else(|| scrape_safety(&value.to_string()));

    ModelResponse {
        content,
        total_tokens,
        safety,
        error: None,
    }
}

/// First element of a `choices`-like field; for mapping-shaped choices the
/// first value wins.
fn first_choice(value: &Value) -> Option<&Value> {
    let choices = value.get("choices")?;
    match choices {
        Value::Array(items) => items.first(),
        Value::Object(map) => map.values().next(),
        _ => None,
    }
}

fn choice_content(choice: &Value) -> Option<String> {
    let content = choice.get("message")?.get("content")?.as_str()?;
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

fn top_level_content(value: &Value) -> Option<String> {
    for key in ["content", "output", "output_text"] {
        if let Some(s) = value.get(key).and_then(|v| v.as_str()) {
            if !s.is_empty() {
                return Some(s.to_string());
            }
        }
    }
    None
}

fn scrape_tokens(rendered: &str) -> Option<u64> {
    TOKEN_FALLBACK_RE
        .captures(rendered)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Text-scrape fallback for the safety mapping: balanced brace block after
/// the marker, parsed as a repr-dialect literal. Parse failure yields an
/// empty summary.
fn scrape_safety(rendered: &str) -> SafetySummary {
    block_after_marker(rendered, SAFETY_MARKER)
        .and_then(parse_literal_map)
        .and_then(|v| v.as_object().map(count_safety))
        .unwrap_or_default()
}

/// Top-level-category counting: a category counts toward the total iff its
/// value is a mapping carrying a `filtered` key, and toward the flagged
/// count iff that key is boolean true or a stringified "true".
fn count_safety(map: &Map<String, Value>) -> SafetySummary {
    let mut summary = SafetySummary::default();
    for (name, detail) in map {
        let Some(obj) = detail.as_object() else {
            continue;
        };
        let Some(filtered) = obj.get("filtered") else {
            continue;
        };
        summary.total_categories += 1;
        let is_flagged = match filtered {
            Value::Bool(b) => *b,
            other => other
                .to_string()
                .trim_matches('"')
                .eq_ignore_ascii_case("true"),
        };
        if is_flagged {
            summary.flagged_count += 1;
            summary.flagged_names.push(name.clone());
        }
    }
    summary
}
