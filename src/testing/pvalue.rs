//! P-value calculation from test statistics

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Two-sided p-value for a t-statistic with `df` degrees of freedom
///
/// `2 * P(T_df > |t|)`. NaN when the statistic is not finite or `df <= 0`.
pub fn two_sided_t_pvalue(stat: f64, df: f64) -> f64 {
    if !stat.is_finite() || !(df > 0.0) {
        return f64::NAN;
    }

    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => (2.0 * t_dist.cdf(-stat.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pvalue_symmetric() {
        let p1 = two_sided_t_pvalue(2.0, 4.0);
        let p2 = two_sided_t_pvalue(-2.0, 4.0);
        assert!((p1 - p2).abs() < 1e-12);
    }

    #[test]
    fn test_pvalue_zero_stat() {
        assert!((two_sided_t_pvalue(0.0, 3.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pvalue_df2_closed_form() {
        // For df = 2 the two-sided p-value is 1 - |t| / sqrt(2 + t^2)
        for t in [0.5, 1.0, 3.0, 7.5] {
            let expected = 1.0 - t / (2.0_f64 + t * t).sqrt();
            let got = two_sided_t_pvalue(t, 2.0);
            assert!((got - expected).abs() < 1e-9, "t={} got {} want {}", t, got, expected);
        }
    }

    #[test]
    fn test_pvalue_undefined() {
        assert!(two_sided_t_pvalue(f64::INFINITY, 4.0).is_nan());
        assert!(two_sided_t_pvalue(f64::NAN, 4.0).is_nan());
        assert!(two_sided_t_pvalue(1.0, 0.0).is_nan());
    }
}
