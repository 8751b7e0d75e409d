//! # Error Payload Parsing
//!
//! Failed model calls surface as opaque strings that sometimes embed a
//! serialized error object with content-filter detail. `parse_error`
//! recovers a concise message and any per-category filter mapping from
//! that text without ever failing: unparseable input degrades to a
//! truncated raw-text message.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{ErrorReport, FilterDetail};
use crate::repr::parse_literal_map;

const MESSAGE_LIMIT: usize = 500;
const DEFAULT_FILTERED_MESSAGE: &str = "Model response filtered.";

/// Parse one error string into a report. Never fails.
pub fn parse_error(error_text: &str) -> ErrorReport {
    let has_structure =
        error_text.contains("content_filter_result") || error_text.contains("message");
    if !has_structure {
        return ErrorReport::message_only(first_line_truncated(error_text));
    }

    // Widest brace span in the text, parsed as a repr-dialect mapping.
    let parsed = error_text
        .find('{')
        .zip(error_text.rfind('}'))
        .filter(|(open, close)| open < close)
        .and_then(|(open, close)| parse_literal_map(&error_text[open..=close]));

    let Some(parsed) = parsed else {
        return ErrorReport::message_only(truncated(error_text));
    };

    let filter_detail = find_first_map(&parsed, "content_filter_result")
        .map(collect_filter_detail)
        .unwrap_or_default();
    let message = find_first_string(&parsed, "message")
        .unwrap_or_else(|| DEFAULT_FILTERED_MESSAGE.to_string());

    ErrorReport {
        message,
        filter_detail,
    }
}

/// Variant for payloads that are not strings at all: anything non-string
/// gets the default filtered message.
pub fn parse_error_value(value: &Value) -> ErrorReport {
    match value.as_str() {
        Some(s) => parse_error(s),
        None => ErrorReport::message_only(DEFAULT_FILTERED_MESSAGE),
    }
}

fn first_line_truncated(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    let line = truncated(line);
    if line.is_empty() {
        DEFAULT_FILTERED_MESSAGE.to_string()
    } else {
        line
    }
}

fn truncated(text: &str) -> String {
    if text.len() <= MESSAGE_LIMIT {
        return text.to_string();
    }
    // Cut on a char boundary at or below the limit.
    let mut end = MESSAGE_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// Depth-first search for the first mapping value under `key`.
fn find_first_map<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            if let Some(hit) = map.get(key).filter(|v| v.is_object()) {
                return Some(hit);
            }
            map.values().find_map(|v| find_first_map(v, key))
        }
        Value::Array(items) => items.iter().find_map(|v| find_first_map(v, key)),
        _ => None,
    }
}

/// Depth-first search for the first string value under `key`.
fn find_first_string(value: &Value, key: &str) -> Option<String> {
    match value {
        Value::Object(map) => {
            if let Some(s) = map.get(key).and_then(|v| v.as_str()) {
                return Some(s.to_string());
            }
            map.values().find_map(|v| find_first_string(v, key))
        }
        Value::Array(items) => items.iter().find_map(|v| find_first_string(v, key)),
        _ => None,
    }
}

fn collect_filter_detail(detail: &Value) -> BTreeMap<String, FilterDetail> {
    let mut out = BTreeMap::new();
    if let Some(map) = detail.as_object() {
        for (name, v) in map {
            if let Some(parsed) = FilterDetail::from_value(v) {
                out.insert(name.clone(), parsed);
            }
        }
    }
    out
}
