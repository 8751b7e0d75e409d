pub mod billing;
pub mod governance;
pub mod latency;
pub mod report;
pub mod response;

pub use billing::{ChartPoint, CostRecord, CostSummary};
pub use governance::InteractionLog;
pub use latency::{LatencyBucket, LatencyReport, LatencyStats, TokenTotals};
pub use report::{ErrorReport, FilterDetail};
pub use response::{ModelResponse, RawResponse, SafetySummary};
