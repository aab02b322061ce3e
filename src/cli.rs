//! CLI argument parsing for dulce

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::welch::OneSidedRule;

/// Output format for the analysis results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// One-sided p-value formula selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OneSidedMode {
    /// Preserve the original asymmetric branch (normal_cdf(t) for t <= 0)
    Faithful,
    /// Use 1 - normal_cdf(t) uniformly
    Corrected,
}

impl From<OneSidedMode> for OneSidedRule {
    fn from(mode: OneSidedMode) -> Self {
        match mode {
            OneSidedMode::Faithful => OneSidedRule::Faithful,
            OneSidedMode::Corrected => OneSidedRule::Corrected,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dulce")]
#[command(version)]
#[command(about = "Clean a daily observation diary and test group mean differences", long_about = None)]
pub struct Cli {
    /// Input CSV file (headerless: date, sweets flag, period flag)
    pub input: PathBuf,

    /// Path for the cleaned dataset CSV
    #[arg(short = 'o', long = "output", default_value = "daily_clean.csv")]
    pub output: PathBuf,

    /// Write an HTML report with charts to this path
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Significance level for the one-sided decision
    #[arg(long = "alpha", value_name = "ALPHA", default_value = "0.05")]
    pub alpha: f64,

    /// One-sided p-value formula (see documentation for the difference)
    #[arg(long = "one-sided", value_enum, default_value = "faithful")]
    pub one_sided: OneSidedMode,

    /// Rolling-mean window in days
    #[arg(long = "rolling-window", value_name = "DAYS", default_value = "7")]
    pub rolling_window: usize,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
