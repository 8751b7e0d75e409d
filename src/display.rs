use std::env;

#[cfg(feature = "colors")]
use owo_colors::OwoColorize;

// Provide a no-op color shim when "colors" feature is disabled
#[cfg(not(feature = "colors"))]
pub mod color_shim {
    use std::fmt::{self, Display, Formatter};

    #[derive(Clone)]
    pub struct Plain(pub String);

    impl Display for Plain {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    pub trait ColorizeShim {
        fn as_str(&self) -> &str;

        fn bright_black(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn red(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn yellow(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn green(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn cyan(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn bold(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn dimmed(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
    }

    impl ColorizeShim for &str {
        fn as_str(&self) -> &str {
            self
        }
    }
    impl ColorizeShim for String {
        fn as_str(&self) -> &str {
            self.as_str()
        }
    }
    impl ColorizeShim for Plain {
        fn as_str(&self) -> &str {
            &self.0
        }
    }
}

#[cfg(not(feature = "colors"))]
use color_shim::ColorizeShim as OwoColorize;

use crate::models::{ErrorReport, ModelResponse};
use crate::pricing;
use crate::utils::format_tokens;

fn colors_enabled() -> bool {
    env::var("NO_COLOR").is_err()
}

fn safety_colored(response: &ModelResponse) -> String {
    let display = response.safety.display();
    if !colors_enabled() {
        return display;
    }
    if response.safety.flagged_count > 0 {
        format!("{}", display.red().bold())
    } else {
        format!("{}", display.green())
    }
}

/// Text rendering of one normalized response, mirroring the playground
/// result panel: content, token count, safety flags, cost estimate.
pub fn print_text_output(response: &ModelResponse, model: Option<&str>, estimate: Option<f64>) {
    if let Some(model) = model {
        println!("{} {}", "Model:".cyan(), model);
    }
    if let Some(error) = response.error.as_deref() {
        println!("{} {}", "Error:".red().bold(), error);
    }
    println!("{} {}", "Model Response:".cyan(), response.content_display());
    let tokens = response
        .total_tokens
        .map(format_tokens)
        .unwrap_or_else(|| "N/A".to_string());
    println!("{} {}", "Total Tokens:".cyan(), tokens);
    println!("{} {}", "Safety Flags:".cyan(), safety_colored(response));
    if !response.safety.flagged_names.is_empty() {
        println!(
            "{} {}",
            "Flagged:".cyan(),
            response.safety.flagged_names.join(", ")
        );
    }
    println!(
        "{} {}",
        "Cost Estimate:".cyan(),
        pricing::estimate_display(estimate)
    );
}

/// Detailed rendering of a parsed error payload.
pub fn print_error_report(report: &ErrorReport) {
    println!("{} {}", "Filter Message:".red().bold(), report.message);
    for (category, detail) in &report.filter_detail {
        let status = if detail.filtered {
            format!("{}", "filtered".red())
        } else {
            format!("{}", "passed".green())
        };
        match detail.severity.as_deref() {
            Some(severity) => println!("  {category}: {status} (severity: {severity})"),
            None => println!("  {category}: {status}"),
        }
    }
}

/// Machine-readable rendering of one normalized response.
pub fn print_json_output(
    response: &ModelResponse,
    model: Option<&str>,
    estimate: Option<f64>,
    report: Option<&ErrorReport>,
) -> anyhow::Result<()> {
    let payload = serde_json::json!({
        "model": model,
        "content": response.content,
        "total_tokens": response.total_tokens,
        "safety": response.safety,
        "error": response.error,
        "error_report": report,
        "cost_estimate": estimate,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Waiting banner when no input was provided.
pub fn print_waiting() {
    println!(
        "Gen AI Playground\n{} {}",
        "❯".cyan(),
        "[waiting for response input]".dimmed()
    );
}
