// Hypothesis verdict and formatted text report
//
// Consumes the Welch test result, compares the one-sided p-value against the
// configured significance level, and renders the decision block the run
// prints at the end.

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::summary::GroupMeans;
use crate::welch::WelchTest;

/// Decision against the null hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestVerdict {
    /// One-sided p-value below the significance level
    Reject,
    /// Not enough evidence at the configured level
    FailToReject,
}

/// Full assessment of the "higher on period days" hypothesis
#[derive(Debug, Clone)]
pub struct HypothesisAssessment {
    pub verdict: TestVerdict,
    pub test: WelchTest,
    pub means: GroupMeans,
    pub significance_level: f64,
}

/// Decide the verdict from the one-sided p-value
pub fn assess_difference(
    test: WelchTest,
    means: GroupMeans,
    config: &AnalysisConfig,
) -> HypothesisAssessment {
    let verdict = if test.p_one_sided < config.significance_level {
        TestVerdict::Reject
    } else {
        TestVerdict::FailToReject
    };

    HypothesisAssessment {
        verdict,
        test,
        means,
        significance_level: config.significance_level,
    }
}

impl HypothesisAssessment {
    /// Generate the human-readable results block
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str("=== HYPOTHESIS TEST RESULTS ===\n");
        report.push_str(&format!(
            "Mean sweets ON period:  {:.3} ({} days)\n",
            self.means.on_period, self.means.on_period_days
        ));
        report.push_str(&format!(
            "Mean sweets OFF period: {:.3} ({} days)\n",
            self.means.off_period, self.means.off_period_days
        ));
        report.push_str(&format!("t-statistic: {:.4}\n", self.test.statistic));
        report.push_str(&format!(
            "Two-sided p-value: {:.4}\n",
            self.test.p_two_sided
        ));
        report.push_str(&format!(
            "One-sided p-value (H1: mean_on > mean_off): {:.4}\n",
            self.test.p_one_sided
        ));
        report.push_str(&format!(
            "Significance level: {} ({}% confidence)\n",
            self.significance_level,
            (1.0 - self.significance_level) * 100.0
        ));

        match self.verdict {
            TestVerdict::Reject => {
                report.push_str("\nDecision: REJECT the null hypothesis.\n");
                report.push_str(
                    "Conclusion: There is statistical evidence that sweet consumption \
                     is HIGHER on period days.\n",
                );
            }
            TestVerdict::FailToReject => {
                report.push_str("\nDecision: FAIL TO REJECT the null hypothesis.\n");
                report.push_str(
                    "Conclusion: The data does NOT provide enough evidence that sweet \
                     consumption is higher on period days.\n",
                );
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::welch::{welch_t_test, OneSidedRule};

    fn means_for(on: &[f64], off: &[f64]) -> GroupMeans {
        GroupMeans {
            on_period: crate::summary::mean(on),
            off_period: crate::summary::mean(off),
            on_period_days: on.len(),
            off_period_days: off.len(),
        }
    }

    #[test]
    fn test_reject_on_clear_difference() {
        let on = vec![1.0; 12];
        let mut off = vec![0.0; 12];
        off[0] = 1.0; // keep some spread so se > 0
        let on2 = {
            let mut v = on.clone();
            v[0] = 0.0;
            v
        };

        let test = welch_t_test(&on2, &off, OneSidedRule::Faithful).unwrap();
        let assessment = assess_difference(test, means_for(&on2, &off), &AnalysisConfig::default());

        assert_eq!(assessment.verdict, TestVerdict::Reject);
        let report = assessment.to_report_string();
        assert!(report.contains("REJECT the null hypothesis"));
        assert!(report.contains("HIGHER on period days"));
    }

    #[test]
    fn test_fail_to_reject_on_similar_groups() {
        let on = vec![1.0, 0.0, 1.0, 0.0, 1.0];
        let off = vec![0.0, 1.0, 0.0, 1.0, 0.0];

        let test = welch_t_test(&on, &off, OneSidedRule::Faithful).unwrap();
        let assessment = assess_difference(test, means_for(&on, &off), &AnalysisConfig::default());

        assert_eq!(assessment.verdict, TestVerdict::FailToReject);
        let report = assessment.to_report_string();
        assert!(report.contains("FAIL TO REJECT"));
        assert!(report.contains("does NOT provide enough evidence"));
    }

    #[test]
    fn test_report_contains_statistics() {
        let on = vec![1.0, 1.0, 0.0, 1.0];
        let off = vec![0.0, 0.0, 1.0, 0.0];

        let test = welch_t_test(&on, &off, OneSidedRule::Faithful).unwrap();
        let assessment = assess_difference(test, means_for(&on, &off), &AnalysisConfig::default());
        let report = assessment.to_report_string();

        assert!(report.contains("HYPOTHESIS TEST RESULTS"));
        assert!(report.contains("t-statistic"));
        assert!(report.contains("One-sided p-value"));
        assert!(report.contains("Mean sweets ON period:  0.750"));
        assert!(report.contains("Mean sweets OFF period: 0.250"));
    }

    #[test]
    fn test_alpha_boundary_is_strict() {
        // p == alpha must NOT reject (strict less-than)
        let test = WelchTest {
            statistic: 1.6449,
            p_two_sided: 0.1,
            p_one_sided: 0.05,
            n1: 10,
            n2: 10,
            mean1: 0.6,
            mean2: 0.4,
            var1: 0.25,
            var2: 0.25,
        };
        let means = GroupMeans {
            on_period: 0.6,
            off_period: 0.4,
            on_period_days: 10,
            off_period_days: 10,
        };

        let assessment = assess_difference(test, means, &AnalysisConfig::default());
        assert_eq!(assessment.verdict, TestVerdict::FailToReject);
    }
}
