//! # Gen AI Playground
//!
//! Core logic for a model playground and its monitoring dashboard:
//! normalizing heterogeneous model-call responses, parsing error payloads,
//! and aggregating billing and latency metrics into summaries and charts.
//!
//! ## Overview
//!
//! Raw backend responses (structured chat-completion mappings, error
//! payloads, or SDK debug-repr strings) are reduced to one uniform record:
//! - Answer text with an explicit extraction-failure sentinel
//! - Total token count and a per-call cost estimate
//! - Content-safety flag summary
//!
//! The monitoring side turns Cost Management and Azure Monitor payloads
//! into daily cost summaries, latency statistics, and a standalone HTML
//! dashboard.
//!
//! ## Features
//!
//! - `online` (default): Enables the management-plane clients via ureq
//! - `colors` (default): Enables terminal color output via owo-colors

/// Management-plane clients for cost and metrics queries (feature-gated)
#[cfg(feature = "online")]
pub mod billing_api;

/// In-memory caching for fetched API payloads
pub mod cache;

/// Inline SVG chart builders for the dashboard
pub mod charts;

/// Command-line argument parsing
pub mod cli;

/// Playground configuration loading
pub mod config;

/// Cost response parsing and series aggregation
pub mod cost;

/// HTML assembly for the monitoring dashboard
pub mod dashboard;

/// Display formatting for text and JSON output
pub mod display;

/// Error payload parsing into structured reports
pub mod error_report;

/// Governance audit log (JSON lines)
pub mod governance;

/// Latency and token metric aggregation
pub mod metrics;

/// Data models for responses, reports, billing, and latency
pub mod models;

/// Response normalization into the uniform record
pub mod normalize;

/// Model-specific cost rates
pub mod pricing;

/// Debug-repr text scraping
pub mod repr;

/// Synthetic series for offline dashboard sections
pub mod synthetic;

/// Utility functions for input and formatting
pub mod utils;
