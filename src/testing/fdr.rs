//! P-value adjustment methods for multiple testing correction
//!
//! NaN p-values mark untestable genes. They are left out of the family size N
//! and stay NaN after adjustment.

use std::cmp::Ordering;

use crate::config::PadjMethod;

/// Adjust p-values with the configured method
pub fn adjust_pvalues(pvalues: &[f64], method: PadjMethod) -> Vec<f64> {
    match method {
        PadjMethod::Bh => benjamini_hochberg(pvalues),
        PadjMethod::Bonferroni => bonferroni(pvalues),
    }
}

/// Order NaN after every number
fn nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Benjamini-Hochberg false discovery rate correction
///
/// Genes are ranked by raw p-value (ties keep input order), each gets
/// `p * N / rank` capped at 1, and a running minimum from the largest rank
/// down makes the result monotone in rank. Each value is floored at its raw
/// p-value, since `p * N / N` can round one ulp below `p`.
pub fn benjamini_hochberg(pvalues: &[f64]) -> Vec<f64> {
    let mut padj = vec![f64::NAN; pvalues.len()];

    let mut order: Vec<usize> = (0..pvalues.len())
        .filter(|&i| !pvalues[i].is_nan())
        .collect();
    order.sort_by(|&a, &b| nan_last(pvalues[a], pvalues[b]));

    let m = order.len() as f64;
    let mut running_min = 1.0_f64;
    for (pos, &i) in order.iter().enumerate().rev() {
        let rank = (pos + 1) as f64;
        running_min = running_min.min(pvalues[i] * m / rank);
        padj[i] = running_min.max(pvalues[i]);
    }

    padj
}

/// Bonferroni family-wise error rate correction
pub fn bonferroni(pvalues: &[f64]) -> Vec<f64> {
    let m = pvalues.iter().filter(|p| !p.is_nan()).count() as f64;
    pvalues
        .iter()
        .map(|&p| if p.is_nan() { f64::NAN } else { (p * m).min(1.0) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bh_known_values() {
        // p.adjust(c(0.01, 0.04, 0.03, 0.02), "BH") = 0.04 0.04 0.04 0.04
        let padj = benjamini_hochberg(&[0.01, 0.04, 0.03, 0.02]);
        for adj in &padj {
            assert!((adj - 0.04).abs() < 1e-12);
        }

        // p.adjust(c(0.001, 0.2, 0.03), "BH") = 0.003 0.2 0.045
        let padj = benjamini_hochberg(&[0.001, 0.2, 0.03]);
        let expected = [0.003, 0.2, 0.045];
        for (got, want) in padj.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "got {}, want {}", got, want);
        }
    }

    #[test]
    fn test_bh_never_decreases_pvalue() {
        let pvalues = vec![0.5, 0.001, 0.04, 0.3, 0.04, 0.9, 0.0];
        let padj = benjamini_hochberg(&pvalues);
        for (p, adj) in pvalues.iter().zip(padj.iter()) {
            assert!(*adj >= *p);
            assert!(*adj <= 1.0);
        }
    }

    #[test]
    fn test_bh_monotone_in_rank() {
        let pvalues = vec![0.2, 0.01, 0.05, 0.03, 0.8, 0.04];
        let padj = benjamini_hochberg(&pvalues);

        let mut order: Vec<usize> = (0..pvalues.len()).collect();
        order.sort_by(|&a, &b| pvalues[a].partial_cmp(&pvalues[b]).unwrap());
        for w in order.windows(2) {
            assert!(padj[w[0]] <= padj[w[1]]);
        }
    }

    #[test]
    fn test_bh_largest_rank_keeps_raw_pvalue() {
        // 0.7 * 3.0 / 3.0 rounds to 0.6999999999999998
        let pvalues = vec![0.01, 0.4, 0.7];
        let padj = benjamini_hochberg(&pvalues);
        assert_eq!(padj[2], 0.7);
        for (p, adj) in pvalues.iter().zip(padj.iter()) {
            assert!(*adj >= *p, "padj {} below p {}", adj, p);
        }
        assert!(padj[0] <= padj[1] && padj[1] <= padj[2]);
    }

    #[test]
    fn test_bh_with_nan() {
        let pvalues = vec![0.01, f64::NAN, 0.03, 0.02];
        let padj = benjamini_hochberg(&pvalues);

        // N counts only the three defined p-values
        assert!((padj[0] - 0.03).abs() < 1e-12);
        assert!(padj[1].is_nan());
        assert!((padj[2] - 0.03).abs() < 1e-12);
        assert!((padj[3] - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_bh_empty_and_all_nan() {
        assert!(benjamini_hochberg(&[]).is_empty());
        assert!(benjamini_hochberg(&[f64::NAN, f64::NAN]).iter().all(|p| p.is_nan()));
    }

    #[test]
    fn test_bonferroni() {
        let padj = bonferroni(&[0.01, f64::NAN, 0.4]);
        assert!((padj[0] - 0.02).abs() < 1e-12);
        assert!(padj[1].is_nan());
        assert_eq!(padj[2], 0.8);
        assert_eq!(adjust_pvalues(&[0.6, 0.7], PadjMethod::Bonferroni), vec![1.0, 1.0]);
    }
}
