use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

#[cfg(feature = "colors")]
use owo_colors::OwoColorize;

#[cfg(not(feature = "colors"))]
use genai_playground::display::color_shim::ColorizeShim;

use genai_playground::cli::{Args, TimeframeArg};
use genai_playground::config::PlaygroundConfig;
use genai_playground::display::{
    print_error_report, print_json_output, print_text_output, print_waiting,
};
use genai_playground::models::RawResponse;
use genai_playground::utils::read_stdin;
use genai_playground::{cost, dashboard, error_report, governance, normalize, pricing, synthetic};

const DEFAULT_GOVERNANCE_LOG: &str = "governance_logs.jsonl";
#[cfg(feature = "online")]
const MAX_METRICS_HOURS: u32 = 48;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = PlaygroundConfig::load()?;

    if args.dashboard {
        run_dashboard(&args, &config)
    } else if args.metrics {
        run_metrics(&args, &config)
    } else {
        run_normalize(&args, &config)
    }
}

fn read_input(args: &Args) -> Result<Vec<u8>> {
    match &args.input {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read input {}", path.display()))
        }
        None => read_stdin(),
    }
}

fn raw_variant_name(raw: &RawResponse) -> &'static str {
    match raw {
        RawResponse::Completion(_) => "completion",
        RawResponse::Error(_) => "error",
        RawResponse::Text(_) => "text",
    }
}

fn run_normalize(args: &Args, config: &PlaygroundConfig) -> Result<()> {
    let input = read_input(args)?;
    if input.is_empty() {
        print_waiting();
        return Ok(());
    }

    let raw = match serde_json::from_slice(&input) {
        Ok(value) => RawResponse::classify(value),
        // Not JSON at all: treat the bytes as a plain text response
        Err(_) => RawResponse::Text(String::from_utf8_lossy(&input).into_owned()),
    };
    let response = normalize::normalize(&raw);
    let report = response
        .error
        .as_deref()
        .map(error_report::parse_error);

    let rate = args
        .model
        .as_deref()
        .and_then(|m| pricing::rate_for_model(m, &config.model_cost));
    let estimate = pricing::estimate_cost(rate, response.total_tokens);

    if let Some(prompt) = args.prompt.as_deref() {
        let log_path = args
            .log
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GOVERNANCE_LOG));
        let entry = governance::build_entry(
            args.model.as_deref().unwrap_or("unknown"),
            prompt,
            response.content_display(),
            response.safety.flagged_names.clone(),
        );
        governance::append_entry(&log_path, &entry)?;
    }

    if args.json {
        print_json_output(&response, args.model.as_deref(), estimate, report.as_ref())?;
    } else {
        print_text_output(&response, args.model.as_deref(), estimate);
        if let Some(report) = report.as_ref() {
            print_error_report(report);
        }
    }

    if args.debug {
        eprintln!();
        eprintln!("{}", "=== Debug Information ===".bright_black());
        eprintln!("Input: {} bytes, shape: {}", input.len(), raw_variant_name(&raw));
        eprintln!(
            "Safety: {}/{} categories flagged",
            response.safety.flagged_count, response.safety.total_categories
        );
        eprintln!(
            "Pricing: model={:?}, rate={:?} per 1M",
            args.model, rate
        );
        eprintln!("{}", "========================".bright_black());
    }
    Ok(())
}

fn governance_rows(args: &Args) -> Vec<(String, String)> {
    let path = args
        .log
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GOVERNANCE_LOG));
    let entries = governance::load_entries(&path).unwrap_or_default();
    governance::summary_rows(&entries)
}

fn run_dashboard(args: &Args, config: &PlaygroundConfig) -> Result<()> {
    let timeframe_label = match args.timeframe {
        TimeframeArg::Week => "Last7Days",
        TimeframeArg::Month => "MonthToDate",
    };

    let cost_html = build_cost_section(args, config, timeframe_label);

    let operational = dashboard::operational_section(&governance_rows(args), &config.model_cost);

    let models: Vec<String> = if config.model_deployments.is_empty() {
        vec!["model-A".to_string(), "model-B".to_string(), "model-C".to_string()]
    } else {
        config.model_deployments.clone()
    };
    let distributions: Vec<_> = models
        .iter()
        .map(|m| synthetic::latency_distribution(m))
        .collect();
    let latency = dashboard::latency_section(&distributions);

    let page = dashboard::render_page(&operational, &cost_html, &latency);
    match &args.out {
        Some(path) => fs::write(path, page)
            .with_context(|| format!("failed to write dashboard to {}", path.display()))?,
        None => println!("{page}"),
    }
    Ok(())
}

fn build_cost_section(args: &Args, config: &PlaygroundConfig, timeframe_label: &str) -> String {
    if args.offline {
        let records = synthetic::fake_cost_records(7);
        let summary = cost::summarize(&records);
        return dashboard::cost_section(timeframe_label, &summary, &records);
    }

    #[cfg(feature = "online")]
    return online_cost_section(args, config, timeframe_label);

    #[cfg(not(feature = "online"))]
    {
        let _ = config;
        dashboard::cost_error_section("built without online support; use --offline")
    }
}

#[cfg(feature = "online")]
fn online_cost_section(args: &Args, config: &PlaygroundConfig, timeframe_label: &str) -> String {
    use genai_playground::billing_api::{self, Timeframe};
    let Some(subscription_id) = config.subscription_id.as_deref() else {
        return dashboard::cost_error_section("no subscription configured");
    };
    let timeframe = match args.timeframe {
        TimeframeArg::Week => Timeframe::Last7Days,
        TimeframeArg::Month => Timeframe::MonthToDate,
    };
    match billing_api::fetch_daily_costs(subscription_id, timeframe) {
        Ok(fetch) => dashboard::cost_section(timeframe_label, &fetch.summary, &fetch.records),
        Err(err) => dashboard::cost_error_section(&err.to_string()),
    }
}

#[cfg(feature = "online")]
fn run_metrics(args: &Args, config: &PlaygroundConfig) -> Result<()> {
    use genai_playground::billing_api;
    if args.offline {
        anyhow::bail!("--metrics queries the monitor API; drop --offline");
    }
    let resource_id = config
        .resource_id
        .clone()
        .or_else(|| std::env::var("RESOURCE_ID").ok())
        .context("no resource id configured; set resource_id in config or RESOURCE_ID")?;
    let hours = args.hours.clamp(1, MAX_METRICS_HOURS);
    let summary = billing_api::fetch_metrics_summary(&resource_id, hours)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(not(feature = "online"))]
fn run_metrics(_args: &Args, _config: &PlaygroundConfig) -> Result<()> {
    anyhow::bail!("built without online support; --metrics is unavailable")
}
