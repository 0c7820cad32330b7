//! Low-expression filtering on transformed values

use crate::data::ExpressionMatrix;

/// Result of the mean-expression filter
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Genes whose mean exceeded the threshold, in input order
    pub matrix: ExpressionMatrix,
    /// Number of genes removed
    pub n_dropped: usize,
}

/// Keep genes whose mean across all samples is strictly greater than `min_mean`
///
/// An empty result is valid. With `min_mean = -inf` every gene is kept and the
/// matrix is returned unchanged.
pub fn filter_by_mean(matrix: &ExpressionMatrix, min_mean: f64) -> FilterOutcome {
    let keep: Vec<usize> = matrix
        .gene_means()
        .iter()
        .enumerate()
        .filter(|(_, &m)| m > min_mean)
        .map(|(i, _)| i)
        .collect();

    let n_dropped = matrix.n_genes() - keep.len();
    if keep.is_empty() && matrix.n_genes() > 0 {
        log::warn!(
            "No genes have mean expression above {}; nothing will be tested",
            min_mean
        );
    }

    FilterOutcome {
        matrix: matrix.subset_genes(&keep),
        n_dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn matrix() -> ExpressionMatrix {
        ExpressionMatrix::new(
            array![[5.0, 5.0], [4.0, 4.0], [3.0, 6.0], [0.0, 1.0]],
            vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()],
            vec!["s1".to_string(), "s2".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_threshold_is_strict() {
        let outcome = filter_by_mean(&matrix(), 4.0);
        assert_eq!(outcome.matrix.gene_ids(), &["a".to_string(), "c".to_string()]);
        assert_eq!(outcome.n_dropped, 2);
    }

    #[test]
    fn test_no_op_filter_returns_identical_matrix() {
        let input = matrix();
        let outcome = filter_by_mean(&input, f64::NEG_INFINITY);
        assert_eq!(outcome.matrix, input);
        assert_eq!(outcome.n_dropped, 0);
    }

    #[test]
    fn test_everything_filtered_is_not_an_error() {
        let outcome = filter_by_mean(&matrix(), 100.0);
        assert!(outcome.matrix.is_empty());
        assert_eq!(outcome.matrix.n_samples(), 2);
        assert_eq!(outcome.n_dropped, 4);
    }
}
