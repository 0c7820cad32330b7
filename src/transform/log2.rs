//! Log2 transform with pseudocount

use crate::data::ExpressionMatrix;
use crate::error::{DgeError, Result};

/// Apply `log2(x + pseudocount)` to every value of the matrix
///
/// The pseudocount must be positive so that zero counts map to a finite value.
pub fn log2_transform(matrix: &ExpressionMatrix, pseudocount: f64) -> Result<ExpressionMatrix> {
    if !(pseudocount > 0.0) || !pseudocount.is_finite() {
        return Err(DgeError::configuration(format!(
            "pseudocount must be a positive finite number, got {}",
            pseudocount
        )));
    }

    log::debug!(
        "log2 transform of {} x {} matrix (pseudocount {})",
        matrix.n_genes(),
        matrix.n_samples(),
        pseudocount
    );
    matrix.map_values(|x| (x + pseudocount).log2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn matrix() -> ExpressionMatrix {
        ExpressionMatrix::new(
            array![[0.0, 1.0, 3.0], [7.0, 15.0, 1023.0]],
            vec!["g1".to_string(), "g2".to_string()],
            vec!["s1".to_string(), "s2".to_string(), "s3".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_log2_transform_values() {
        let transformed = log2_transform(&matrix(), 1.0).unwrap();
        let expected = array![[0.0, 1.0, 2.0], [3.0, 4.0, 10.0]];
        for (got, want) in transformed.values().iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "got {}, want {}", got, want);
        }
        assert_eq!(transformed.gene_ids(), matrix().gene_ids());
        assert_eq!(transformed.sample_ids(), matrix().sample_ids());
    }

    #[test]
    fn test_small_pseudocount_gives_negative_values() {
        let transformed = log2_transform(&matrix(), 0.5).unwrap();
        assert!((transformed.values()[[0, 0]] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_positive_pseudocount_rejected() {
        assert!(log2_transform(&matrix(), 0.0).is_err());
        assert!(log2_transform(&matrix(), -1.0).is_err());
    }
}
