use serde_json::json;

use genai_playground::error_report::parse_error;
use genai_playground::models::RawResponse;
use genai_playground::normalize::{normalize, normalize_value};
use genai_playground::pricing;
use std::collections::BTreeMap;

#[test]
fn structured_completion_end_to_end() {
    let raw = json!({
        "id": "chatcmpl-123",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {"role": "assistant", "content": "The capital of France is Paris."},
            "content_filter_results": {
                "hate": {"filtered": false, "severity": "safe"},
                "self_harm": {"filtered": false, "severity": "safe"},
                "sexual": {"filtered": false, "severity": "safe"},
                "violence": {"filtered": false, "severity": "safe"},
            },
        }],
        "usage": {"prompt_tokens": 20, "completion_tokens": 9, "total_tokens": 29},
    });
    let out = normalize_value(raw);
    assert_eq!(out.content.as_deref(), Some("The capital of France is Paris."));
    assert_eq!(out.total_tokens, Some(29));
    assert_eq!(out.safety.display(), "0/4");
    assert!(out.error.is_none());

    // Cost estimate feeds off the normalized token count
    let rate = pricing::rate_for_model("gpt-4o", &BTreeMap::new());
    let estimate = pricing::estimate_cost(rate, out.total_tokens).unwrap();
    assert!((estimate - 29.0 / 1_000_000.0 * 10.0).abs() < 1e-12);
}

#[test]
fn same_record_shape_for_every_input_shape() {
    // Malformed, empty, and plain-string inputs all produce the uniform
    // record without panicking.
    let inputs = vec![
        json!({"choices": [{"message": {"content": "ok"}}]}),
        json!({"error": "quota exceeded"}),
        json!("free-form text"),
        json!({}),
        json!([1, 2, 3]),
        json!(null),
    ];
    for input in inputs {
        let out = normalize_value(input);
        assert!(out.safety.flagged_count <= out.safety.total_categories);
        if out.content.is_none() {
            assert_eq!(out.content_display(), "Unable to extract model response.");
        }
    }
}

#[test]
fn filtered_error_flows_into_report() {
    let raw = json!({
        "error": "Error code: 400 - {'error': {'message': 'The response was filtered due to the prompt triggering content management policy', 'code': 'content_filter', 'innererror': {'code': 'ResponsibleAIPolicyViolation', 'content_filter_result': {'hate': {'filtered': True, 'severity': 'high'}, 'self_harm': {'filtered': False, 'severity': 'safe'}}}}}",
    });
    let out = normalize_value(raw);
    let error = out.error.as_deref().expect("error payload should surface");
    assert!(out.content.is_none());

    let report = parse_error(error);
    assert!(report.message.contains("content management policy"));
    assert_eq!(report.filter_detail.len(), 2);
    assert!(report.filter_detail["hate"].filtered);
    assert_eq!(report.filter_detail["hate"].severity.as_deref(), Some("high"));
    assert!(!report.filter_detail["self_harm"].filtered);
}

#[test]
fn debug_repr_string_is_scraped() {
    let repr = "ChatCompletion(id='chatcmpl-9', choices=[Choice(finish_reason='stop', index=0, \
                message=ChatCompletionMessage(content='Paris.', refusal=None, role='assistant'), \
                content_filter_results={'hate': {'filtered': False, 'severity': 'safe'}, \
                'violence': {'filtered': True, 'severity': 'medium'}})], model='gpt-4o', \
                usage=CompletionUsage(completion_tokens=2, prompt_tokens=14, total_tokens=16))";
    let out = normalize(&RawResponse::Text(repr.to_string()));
    assert_eq!(out.content.as_deref(), Some("Paris."));
    assert_eq!(out.total_tokens, Some(16));
    assert_eq!(out.safety.display(), "1/2");
    assert_eq!(out.safety.flagged_names, vec!["violence"]);
}

#[test]
fn empty_error_gets_placeholder_message() {
    let out = normalize(&RawResponse::Error("   ".to_string()));
    assert_eq!(out.error.as_deref(), Some("Response filtered or error"));
}
