//! Playground configuration: deployment endpoints, cost table, and the
//! Azure resource identifiers used by the billing and metrics queries.
//!
//! Loaded from a JSON file. `GENAI_CONFIG` overrides the path; otherwise
//! the platform config directory is searched. A missing file yields the
//! default (empty) config so offline use keeps working.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Deployment name to chat-completions endpoint URL.
    pub model_endpoints: BTreeMap<String, String>,
    /// Deployment names offered for selection, in display order.
    pub model_deployments: Vec<String>,
    /// Deployment name to USD cost per one million tokens.
    pub model_cost: BTreeMap<String, f64>,
    pub subscription_id: Option<String>,
    /// Full ARM resource id of the Cognitive Services account, used for
    /// metrics queries.
    pub resource_id: Option<String>,
    pub api_key: Option<String>,
}

impl PlaygroundConfig {
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.is_file() => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config at {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("invalid config JSON at {}", path.display()))
            }
            _ => Ok(PlaygroundConfig::default()),
        }
    }

    pub fn endpoint_for(&self, deployment: &str) -> Option<&str> {
        self.model_endpoints.get(deployment).map(String::as_str)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(explicit) = env::var("GENAI_CONFIG") {
        let explicit = explicit.trim();
        if !explicit.is_empty() {
            return Some(PathBuf::from(explicit));
        }
    }
    directories::BaseDirs::new()
        .map(|b| b.config_dir().join("genai_playground").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let raw = r#"{
            "model_endpoints": {"gpt-4o": "https://acct.openai.azure.com/openai/deployments/gpt-4o/chat/completions"},
            "model_deployments": ["gpt-4o"],
            "model_cost": {"gpt-4o": 10.0},
            "subscription_id": "0b100b44-fb20-415e-b735-4594f153619b"
        }"#;
        let cfg: PlaygroundConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(cfg.model_deployments, vec!["gpt-4o"]);
        assert_eq!(cfg.model_cost["gpt-4o"], 10.0);
        assert!(cfg.endpoint_for("gpt-4o").unwrap().contains("deployments/gpt-4o"));
        assert!(cfg.resource_id.is_none());
    }

    #[test]
    fn unknown_fields_and_omissions_are_tolerated() {
        let cfg: PlaygroundConfig = serde_json::from_str(r#"{"extra": 1}"#).unwrap();
        assert!(cfg.model_endpoints.is_empty());
        assert!(cfg.endpoint_for("gpt-4o").is_none());
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut f = fs::File::create(&path).unwrap();
        write!(f, r#"{{"model_deployments": ["m1", "m2"]}}"#).unwrap();

        // Env mutation is process-wide; keep this the only test touching it.
        unsafe { env::set_var("GENAI_CONFIG", &path) };
        let cfg = PlaygroundConfig::load().unwrap();
        unsafe { env::remove_var("GENAI_CONFIG") };
        assert_eq!(cfg.model_deployments, vec!["m1", "m2"]);
    }
}
