//! Statistical utility functions shared across modules
//!
//! Plain reductions over slices used by the tester and the QC report.
//! Each returns NaN when the quantity is undefined for the input size.

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().sum::<f64>() / x.len() as f64
}

/// Unbiased sample variance (denominator n - 1). NaN for fewer than 2 values.
pub fn sample_variance(x: &[f64]) -> f64 {
    if x.len() < 2 {
        return f64::NAN;
    }
    let m = mean(x);
    x.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / (x.len() - 1) as f64
}

/// Sample standard deviation
pub fn sample_sd(x: &[f64]) -> f64 {
    sample_variance(x).sqrt()
}

/// Median, averaging the two middle values for even lengths
pub fn median(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    let mut sorted = x.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Pooled variance of two groups, weighting each by its degrees of freedom
///
/// `((n1 - 1) * var1 + (n2 - 1) * var2) / (n1 + n2 - 2)`.
/// NaN when either group has fewer than 2 values.
pub fn pooled_variance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() < 2 || b.len() < 2 {
        return f64::NAN;
    }
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    ((n1 - 1.0) * sample_variance(a) + (n2 - 1.0) * sample_variance(b)) / (n1 + n2 - 2.0)
}

/// Pearson correlation coefficient. NaN if either side is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len());
    if x.len() < 2 {
        return f64::NAN;
    }
    let mx = mean(x);
    let my = mean(y);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        sxy += (xi - mx) * (yi - my);
        sxx += (xi - mx).powi(2);
        syy += (yi - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    sxy / (sxx * syy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let x = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&x) - 5.0).abs() < 1e-12);
        assert!((sample_variance(&x) - 32.0 / 7.0).abs() < 1e-12);
        assert!(mean(&[]).is_nan());
        assert!(sample_variance(&[1.0]).is_nan());
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_pooled_variance() {
        // Equal sizes: pooled variance is the average of the two variances
        let a = vec![1.0, 3.0];
        let b = vec![2.0, 6.0];
        let expected = (sample_variance(&a) + sample_variance(&b)) / 2.0;
        assert!((pooled_variance(&a, &b) - expected).abs() < 1e-12);
        assert!(pooled_variance(&[1.0], &b).is_nan());
    }

    #[test]
    fn test_pearson() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.0, 4.0, 6.0, 8.0];
        let z = vec![8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z) + 1.0).abs() < 1e-12);
        assert!(pearson(&x, &[1.0, 1.0, 1.0, 1.0]).is_nan());
    }
}
