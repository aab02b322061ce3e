// Configuration for a single analysis run
//
// The defaults mirror the original study: alpha = 0.05, a 7-day rolling
// window, and the faithful one-sided p-value branch.

use serde::{Deserialize, Serialize};

use crate::welch::OneSidedRule;

/// Configuration for the cleaning/summary/test pipeline
///
/// # Example
/// ```
/// use dulce::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.significance_level, 0.05); // 95% confidence
/// assert_eq!(config.rolling_window, 7);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Statistical significance level (alpha) for the one-sided decision
    ///
    /// - 0.05 (default): 95% confidence level
    /// - 0.01: stricter, fewer false positives
    pub significance_level: f64,

    /// Minimum observations required per group before running the t-test
    ///
    /// The n-1 sample variance is undefined below 2, so 2 is the floor.
    pub min_sample_size: usize,

    /// Window (in days) for the rolling mean of the daily flag
    pub rolling_window: usize,

    /// One-sided p-value formula (faithful vs corrected branch)
    pub one_sided_rule: OneSidedRule,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            min_sample_size: 2,
            rolling_window: 7,
            one_sided_rule: OneSidedRule::Faithful,
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.significance_level) {
            return Err(format!(
                "significance_level must be in [0, 1], got {}",
                self.significance_level
            ));
        }

        if self.min_sample_size < 2 {
            return Err(format!(
                "min_sample_size must be >= 2 for a t-test, got {}",
                self.min_sample_size
            ));
        }

        if self.rolling_window == 0 {
            return Err("rolling_window must be at least 1".to_string());
        }

        Ok(())
    }
}
