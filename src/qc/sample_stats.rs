use serde::Serialize;

use crate::data::{ExpressionMatrix, SampleGroups};
use crate::stats::{mean, median, sample_sd};

/// QC statistics for one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleQc {
    pub sample_id: String,
    /// Group label, empty if the sample is in neither group
    pub group: String,
    /// Sum of raw values (library size)
    pub total_counts: f64,
    pub mean: f64,
    pub median: f64,
    pub sd: f64,
    pub min: f64,
    pub max: f64,
    /// Genes with a raw value of exactly zero
    pub zero_counts: usize,
    /// Genes with a raw value above zero
    pub detected_genes: usize,
    /// Mean of `log2(x + pseudocount)`
    pub log2_mean: f64,
}

/// Compute QC statistics for every sample of a raw matrix
pub fn sample_qc(matrix: &ExpressionMatrix, groups: Option<&SampleGroups>, pseudocount: f64) -> Vec<SampleQc> {
    matrix
        .sample_ids()
        .iter()
        .enumerate()
        .map(|(j, sample_id)| {
            let values = matrix.sample_values(j).to_vec();
            let log_values: Vec<f64> = values.iter().map(|&x| (x + pseudocount).log2()).collect();
            let zero_counts = values.iter().filter(|&&x| x == 0.0).count();

            let (min, max) = if values.is_empty() {
                (f64::NAN, f64::NAN)
            } else {
                values
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)))
            };

            SampleQc {
                sample_id: sample_id.clone(),
                group: groups
                    .and_then(|g| g.label_of(sample_id))
                    .unwrap_or_default()
                    .to_string(),
                total_counts: values.iter().sum(),
                mean: mean(&values),
                median: median(&values),
                sd: sample_sd(&values),
                min,
                max,
                zero_counts,
                detected_genes: values.len() - zero_counts,
                log2_mean: mean(&log_values),
            }
        })
        .collect()
}
