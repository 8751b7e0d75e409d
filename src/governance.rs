//! Governance audit trail: one JSON object per line, appended per model
//! interaction. Responses are truncated to keep the log compact; the full
//! length is recorded alongside.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::models::InteractionLog;

const RESPONSE_SNIPPET_LIMIT: usize = 300;

/// Build a log entry for one interaction, truncating the stored response.
pub fn build_entry(model: &str, prompt: &str, response: &str, issues: Vec<String>) -> InteractionLog {
    let snippet = if response.chars().count() > RESPONSE_SNIPPET_LIMIT {
        let cut: String = response.chars().take(RESPONSE_SNIPPET_LIMIT).collect();
        format!("{cut}...")
    } else {
        response.to_string()
    };
    InteractionLog {
        timestamp: Utc::now(),
        model: model.to_string(),
        prompt: prompt.to_string(),
        response: snippet,
        response_length: response.chars().count(),
        issues,
    }
}

/// Append one entry to the log file, creating it if needed.
pub fn append_entry(path: &Path, entry: &InteractionLog) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open governance log at {}", path.display()))?;
    let line = serde_json::to_string(entry).context("failed to serialize governance entry")?;
    writeln!(file, "{line}")
        .with_context(|| format!("failed to write governance log at {}", path.display()))?;
    Ok(())
}

/// Load every entry from the log. A missing file is an empty log; lines
/// that fail to parse are skipped rather than poisoning the whole read.
pub fn load_entries(path: &Path) -> Result<Vec<InteractionLog>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read governance log at {}", path.display()))?;
    Ok(raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}

/// Summary rows for the governance dashboard table.
pub fn summary_rows(entries: &[InteractionLog]) -> Vec<(String, String)> {
    let flagged = entries.iter().filter(|e| !e.issues.is_empty()).count();
    let models: std::collections::BTreeSet<&str> =
        entries.iter().map(|e| e.model.as_str()).collect();
    vec![
        ("Logged Interactions".to_string(), entries.len().to_string()),
        ("Flagged Interactions".to_string(), flagged.to_string()),
        ("Models Used".to_string(), models.len().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_responses_are_stored_verbatim() {
        let entry = build_entry("gpt-4o", "hi", "short answer", vec![]);
        assert_eq!(entry.response, "short answer");
        assert_eq!(entry.response_length, 12);
        assert!(entry.issues.is_empty());
    }

    #[test]
    fn long_responses_are_truncated_with_ellipsis() {
        let long = "y".repeat(450);
        let entry = build_entry("gpt-4o", "hi", &long, vec!["pii".to_string()]);
        assert_eq!(entry.response.len(), 303);
        assert!(entry.response.ends_with("..."));
        assert_eq!(entry.response_length, 450);
    }

    #[test]
    fn append_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("governance_logs.jsonl");

        append_entry(&path, &build_entry("gpt-4o", "p1", "r1", vec![])).unwrap();
        append_entry(&path, &build_entry("gpt-4o-mini", "p2", "r2", vec!["flag".to_string()]))
            .unwrap();

        let entries = load_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].prompt, "p1");
        assert_eq!(entries[1].issues, vec!["flag"]);

        let rows = summary_rows(&entries);
        assert_eq!(rows[0], ("Logged Interactions".to_string(), "2".to_string()));
        assert_eq!(rows[1].1, "1");
        assert_eq!(rows[2].1, "2");
    }

    #[test]
    fn missing_file_is_an_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let entries = load_entries(&dir.path().join("absent.jsonl")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn corrupt_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("governance_logs.jsonl");
        append_entry(&path, &build_entry("gpt-4o", "p", "r", vec![])).unwrap();
        fs::write(
            &path,
            format!("{}\nnot json\n", fs::read_to_string(&path).unwrap().trim()),
        )
        .unwrap();
        let entries = load_entries(&path).unwrap();
        assert_eq!(entries.len(), 1);
    }
}
