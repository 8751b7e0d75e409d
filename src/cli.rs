use std::path::PathBuf;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeframeArg {
    /// Trailing seven days
    Week,
    /// Calendar month to date
    Month,
}

#[derive(clap::Parser, Debug)]
#[command(about = "Normalize model responses and render playground monitoring")]
pub struct Args {
    /// Emit JSON instead of colored text
    #[arg(long)]
    pub json: bool,

    /// Read the raw response from a file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Deployment name, used for the cost estimate
    #[arg(long, env = "GENAI_MODEL")]
    pub model: Option<String>,

    /// Render the monitoring dashboard as HTML
    #[arg(long)]
    pub dashboard: bool,

    /// Write dashboard HTML here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// One-shot metrics query, printed as JSON
    #[arg(long)]
    pub metrics: bool,

    /// Metrics lookback window in hours (1-48)
    #[arg(long, default_value_t = 1)]
    pub hours: u32,

    /// Cost timeframe: week|month
    #[arg(long, value_enum, default_value_t = TimeframeArg::Week)]
    pub timeframe: TimeframeArg,

    /// Skip API calls; dashboard sections use synthetic data
    #[arg(long)]
    pub offline: bool,

    /// Governance log path (JSON lines, appended per interaction)
    #[arg(long, env = "GENAI_GOVERNANCE_LOG")]
    pub log: Option<PathBuf>,

    /// Prompt text to record in the governance log alongside the response
    #[arg(long)]
    pub prompt: Option<String>,

    /// Debug mode: show extraction details on stderr
    #[arg(long, env = "GENAI_DEBUG")]
    pub debug: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
