use ndarray::Array2;

use crate::data::ExpressionMatrix;
use crate::stats::pearson;

/// Sample-by-sample Pearson correlation matrix
#[derive(Debug, Clone)]
pub struct SampleCorrelations {
    pub sample_ids: Vec<String>,
    /// Symmetric, ones on the diagonal unless a sample is constant
    pub values: Array2<f64>,
}

/// Pearson correlation between every pair of samples of `matrix`
///
/// Intended for log2-transformed values, where library-wide scaling
/// differences matter less.
pub fn sample_correlations(matrix: &ExpressionMatrix) -> SampleCorrelations {
    let n = matrix.n_samples();
    let columns: Vec<Vec<f64>> = (0..n).map(|j| matrix.sample_values(j).to_vec()).collect();

    let mut values = Array2::from_elem((n, n), f64::NAN);
    for i in 0..n {
        for j in i..n {
            let r = pearson(&columns[i], &columns[j]);
            values[[i, j]] = r;
            values[[j, i]] = r;
        }
    }

    SampleCorrelations {
        sample_ids: matrix.sample_ids().to_vec(),
        values,
    }
}
