//! JSON output format for the analysis report
//!
//! `--format json` emits the whole run as one document: cleaning counts,
//! group summaries, the Welch test, and the verdict.

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::dataset::CleaningReport;
use crate::summary::{Crosstab, FiveNumberSummary, GroupMeans};
use crate::verdict::{HypothesisAssessment, TestVerdict};

/// Top-level JSON report for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Report format version
    pub version: String,
    pub cleaning: JsonCleaning,
    pub groups: JsonGroupSummary,
    pub crosstab: Crosstab,
    pub welch_test: JsonWelchTest,
    pub verdict: JsonVerdict,
    pub config: AnalysisConfig,
}

/// Cleaning-stage counts (rows read, kept, dropped by reason)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCleaning {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    pub dropped_bad_date: usize,
    pub dropped_bad_numeric: usize,
    pub dropped_short_row: usize,
}

/// Per-group descriptive summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonGroupSummary {
    pub means: GroupMeans,
    pub on_period_distribution: FiveNumberSummary,
    pub off_period_distribution: FiveNumberSummary,
}

/// Welch test numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonWelchTest {
    pub statistic: f64,
    pub p_two_sided: f64,
    pub p_one_sided: f64,
    pub n_on_period: usize,
    pub n_off_period: usize,
}

/// Decision block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonVerdict {
    pub decision: TestVerdict,
    pub significance_level: f64,
}

impl JsonReport {
    /// Assemble the report from the pipeline's outputs
    pub fn build(
        cleaning: &CleaningReport,
        on_summary: FiveNumberSummary,
        off_summary: FiveNumberSummary,
        crosstab: Crosstab,
        assessment: &HypothesisAssessment,
        config: &AnalysisConfig,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            cleaning: JsonCleaning {
                rows_read: cleaning.rows_read,
                rows_kept: cleaning.rows_kept,
                rows_dropped: cleaning.rows_dropped(),
                dropped_bad_date: cleaning.dropped_bad_date,
                dropped_bad_numeric: cleaning.dropped_bad_numeric,
                dropped_short_row: cleaning.dropped_short_row,
            },
            groups: JsonGroupSummary {
                means: assessment.means.clone(),
                on_period_distribution: on_summary,
                off_period_distribution: off_summary,
            },
            crosstab,
            welch_test: JsonWelchTest {
                statistic: assessment.test.statistic,
                p_two_sided: assessment.test.p_two_sided,
                p_one_sided: assessment.test.p_one_sided,
                n_on_period: assessment.test.n1,
                n_off_period: assessment.test.n2,
            },
            verdict: JsonVerdict {
                decision: assessment.verdict,
                significance_level: assessment.significance_level,
            },
            config: config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DailyDataset;
    use crate::summary;
    use crate::verdict::assess_difference;
    use crate::welch::welch_t_test;

    fn sample_report() -> JsonReport {
        let raw = "\
01/03/2025,1,1
02/03/2025,1,1
03/03/2025,0,1
04/03/2025,0,0
05/03/2025,1,0
06/03/2025,0,0
";
        let (dataset, cleaning) = DailyDataset::from_csv_str(raw).unwrap();
        let config = AnalysisConfig::default();
        let (on, off) = dataset.samples();

        let test = welch_t_test(&on, &off, config.one_sided_rule).unwrap();
        let assessment = assess_difference(test, summary::group_means(&dataset), &config);

        JsonReport::build(
            &cleaning,
            summary::five_number_summary(&on),
            summary::five_number_summary(&off),
            summary::crosstab(&dataset),
            &assessment,
            &config,
        )
    }

    #[test]
    fn test_report_serializes_to_json() {
        let json = serde_json::to_string_pretty(&sample_report()).unwrap();
        assert!(json.contains("\"welch_test\""));
        assert!(json.contains("\"p_one_sided\""));
        assert!(json.contains("\"cleaning\""));
        assert!(json.contains("\"decision\""));
    }

    #[test]
    fn test_report_round_trips() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: JsonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.welch_test.statistic, report.welch_test.statistic);
        assert_eq!(back.cleaning.rows_kept, 6);
    }

    #[test]
    fn test_report_carries_sample_sizes() {
        let report = sample_report();
        assert_eq!(report.welch_test.n_on_period, 3);
        assert_eq!(report.welch_test.n_off_period, 3);
    }

    #[test]
    fn test_verdict_serializes_snake_case() {
        let json = serde_json::to_string(&sample_report().verdict).unwrap();
        assert!(json.contains("reject"), "got {}", json);
    }
}
