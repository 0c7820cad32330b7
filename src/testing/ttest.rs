//! Two-sample Student's t-test and Cohen's d

use super::pvalue::two_sided_t_pvalue;
use crate::stats::{mean, pooled_variance};

/// Outcome of an equal-variance two-sample t-test
#[derive(Debug, Clone, Copy)]
pub struct TTestResult {
    pub mean_a: f64,
    pub mean_b: f64,
    /// `mean_a - mean_b`
    pub difference: f64,
    pub statistic: f64,
    pub df: f64,
    pub p_value: f64,
    /// Square root of the pooled variance
    pub pooled_sd: f64,
}

impl TTestResult {
    /// Standardized effect size, `difference / pooled_sd`. NaN if pooled_sd is zero.
    pub fn cohens_d(&self) -> f64 {
        if !(self.pooled_sd > 0.0) || !self.pooled_sd.is_finite() {
            return f64::NAN;
        }
        self.difference / self.pooled_sd
    }

    /// Whether a p-value could be computed
    pub fn is_testable(&self) -> bool {
        self.p_value.is_finite()
    }
}

/// Student's t-test assuming equal variances
///
/// Group means are always reported. Statistic, p-value and pooled SD are NaN
/// when either group has fewer than 2 values or the pooled variance is zero.
pub fn student_t_test(a: &[f64], b: &[f64]) -> TTestResult {
    let mean_a = mean(a);
    let mean_b = mean(b);
    let difference = mean_a - mean_b;

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let df = n1 + n2 - 2.0;

    let pooled_var = pooled_variance(a, b);
    let (statistic, pooled_sd) = if pooled_var > 0.0 && pooled_var.is_finite() {
        let se = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();
        (difference / se, pooled_var.sqrt())
    } else {
        // zero variance or too few replicates
        (f64::NAN, if pooled_var == 0.0 { 0.0 } else { f64::NAN })
    };

    TTestResult {
        mean_a,
        mean_b,
        difference,
        statistic,
        df,
        p_value: two_sided_t_pvalue(statistic, df),
        pooled_sd,
    }
}
