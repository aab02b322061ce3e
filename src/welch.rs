// Welch's two-sample t-test with a normal-approximation p-value
//
// The significance is approximated via the standard normal CDF rather than
// the exact Student-t distribution. That is a deliberate large-sample
// simplification carried over from the original analysis, not an oversight.
//
// The one-sided p-value has two selectable formulas (see `OneSidedRule`):
// the original computed normal_cdf(t) for t <= 0, which is a different
// quantity than the 1 - normal_cdf(t) it computes for t > 0. Both behaviors
// are kept available so the discrepancy stays visible instead of being
// silently papered over.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Formula used for the one-sided p-value when testing mean1 > mean2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OneSidedRule {
    /// Original behavior: `1 - normal_cdf(t)` if t > 0, else `normal_cdf(t)`
    #[default]
    Faithful,
    /// Single formula `1 - normal_cdf(t)` for all t
    Corrected,
}

/// Result of a Welch t-test between two samples
#[derive(Debug, Clone, PartialEq)]
pub struct WelchTest {
    /// t-statistic value (0 when the standard error is exactly zero)
    pub statistic: f64,

    /// Two-sided p-value in [0, 1]
    pub p_two_sided: f64,

    /// One-sided p-value in [0, 1] (direction: mean1 > mean2)
    pub p_one_sided: f64,

    /// Sample sizes
    pub n1: usize,
    pub n2: usize,

    /// Sample means
    pub mean1: f64,
    pub mean2: f64,

    /// Unbiased (n-1) sample variances
    pub var1: f64,
    pub var2: f64,
}

/// Compare two samples using Welch's t-test (unequal variances)
///
/// Variances use the unbiased n-1 estimator. When the standard error
/// `sqrt(var1/n1 + var2/n2)` is exactly zero, the statistic is defined as 0
/// ("no spread" reads as "no detectable difference") instead of failing on
/// the division.
///
/// # Arguments
/// * `x` - First sample (the group whose mean is hypothesized to be larger)
/// * `y` - Second sample
/// * `rule` - One-sided p-value formula (see `OneSidedRule`)
///
/// # Errors
/// Fails when either sample has fewer than 2 observations, since the n-1
/// variance is undefined there.
///
/// # Example
/// ```
/// use dulce::welch::{welch_t_test, OneSidedRule};
///
/// let on = vec![1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
/// let off = vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
///
/// let test = welch_t_test(&on, &off, OneSidedRule::Faithful).unwrap();
/// assert!(test.statistic > 0.0);
/// assert!(test.p_one_sided < test.p_two_sided);
/// ```
pub fn welch_t_test(x: &[f64], y: &[f64], rule: OneSidedRule) -> Result<WelchTest> {
    if x.is_empty() || y.is_empty() {
        anyhow::bail!("Cannot compare empty samples");
    }

    if x.len() < 2 || y.len() < 2 {
        anyhow::bail!(
            "Need at least 2 observations per sample for a t-test (got {} and {})",
            x.len(),
            y.len()
        );
    }

    let n1 = x.len();
    let n2 = y.len();

    let mean1 = x.iter().sum::<f64>() / n1 as f64;
    let mean2 = y.iter().sum::<f64>() / n2 as f64;

    let var1 = sample_variance(x, mean1);
    let var2 = sample_variance(y, mean2);

    let se = (var1 / n1 as f64 + var2 / n2 as f64).sqrt();
    let statistic = if se == 0.0 { 0.0 } else { (mean1 - mean2) / se };

    // Clamp: the erf approximation can land epsilon above 1.0 near t = 0
    let p_two_sided = (2.0 * (1.0 - normal_cdf(statistic.abs()))).clamp(0.0, 1.0);

    let p_one_sided = match rule {
        OneSidedRule::Faithful => {
            if statistic > 0.0 {
                1.0 - normal_cdf(statistic)
            } else {
                normal_cdf(statistic)
            }
        }
        OneSidedRule::Corrected => 1.0 - normal_cdf(statistic),
    }
    .clamp(0.0, 1.0);

    Ok(WelchTest {
        statistic,
        p_two_sided,
        p_one_sided,
        n1,
        n2,
        mean1,
        mean2,
        var1,
        var2,
    })
}

/// Unbiased sample variance (n-1 denominator); caller guarantees len >= 2
fn sample_variance(values: &[f64], mean: f64) -> f64 {
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Standard normal cumulative distribution function
///
/// `normal_cdf(z) = 0.5 * (1 + erf(z / sqrt(2)))`
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Error function approximation (Abramowitz & Stegun 7.1.26)
///
/// Maximum absolute error is about 1.5e-7, which is far below the
/// resolution at which p-values are reported here.
fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}
