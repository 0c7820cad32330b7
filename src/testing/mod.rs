//! Statistical testing for differential expression

mod classify;
mod fdr;
mod pvalue;
mod ttest;

pub use classify::{classify, Regulation, Significance};
pub use fdr::{adjust_pvalues, benjamini_hochberg, bonferroni};
pub use pvalue::two_sided_t_pvalue;
pub use ttest::{student_t_test, TTestResult};

use std::cmp::Ordering;

use crate::config::AnalysisConfig;
use crate::data::{ExpressionMatrix, SampleGroups};
use crate::error::Result;
use crate::io::{DEResults, GeneResult};

/// Test every gene of a (filtered, log2-transformed) matrix between two groups
///
/// One t-test per gene, then a single p-value adjustment across the run, then
/// classification. The returned genes are sorted by adjusted p-value with a
/// stable sort, so ties keep matrix order and untestable genes come last.
pub fn differential_test(
    matrix: &ExpressionMatrix,
    groups: &SampleGroups,
    config: &AnalysisConfig,
) -> Result<DEResults> {
    let indices = groups.resolve(matrix)?;
    if indices.unassigned > 0 {
        log::warn!(
            "{} sample(s) belong to neither '{}' nor '{}' and are excluded from testing",
            indices.unassigned,
            groups.group_a().name,
            groups.group_b().name
        );
    }

    let tests: Vec<TTestResult> = (0..matrix.n_genes())
        .map(|i| {
            let row = matrix.gene_values(i);
            let a: Vec<f64> = indices.a.iter().map(|&j| row[j]).collect();
            let b: Vec<f64> = indices.b.iter().map(|&j| row[j]).collect();
            let result = student_t_test(&a, &b);
            if !result.is_testable() {
                log::debug!(
                    "gene {} is untestable (n_a={}, n_b={}, pooled_sd={})",
                    matrix.gene_ids()[i],
                    a.len(),
                    b.len(),
                    result.pooled_sd
                );
            }
            result
        })
        .collect();

    let pvalues: Vec<f64> = tests.iter().map(|t| t.p_value).collect();
    let padj = adjust_pvalues(&pvalues, config.padj_method);

    let mut genes: Vec<GeneResult> = tests
        .iter()
        .zip(padj)
        .zip(matrix.gene_ids())
        .map(|((test, p_adjusted), gene_id)| {
            let (significance, regulation) =
                classify(p_adjusted, test.difference, config.alpha, config.lfc_threshold);
            GeneResult {
                gene_id: gene_id.clone(),
                group_a_mean: test.mean_a,
                group_b_mean: test.mean_b,
                log2_fold_change: test.difference,
                t_statistic: test.statistic,
                p_value: test.p_value,
                p_adjusted,
                cohens_d: test.cohens_d(),
                significance,
                regulation,
            }
        })
        .collect();

    genes.sort_by(|x, y| match (x.p_adjusted.is_nan(), y.p_adjusted.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => x.p_adjusted.partial_cmp(&y.p_adjusted).unwrap_or(Ordering::Equal),
    });

    let n_untestable = genes.iter().filter(|g| g.p_value.is_nan()).count();
    if n_untestable > 0 {
        log::warn!("{} gene(s) could not be tested and have undefined statistics", n_untestable);
    }

    Ok(DEResults {
        genes,
        group_a: groups.group_a().name.clone(),
        group_b: groups.group_b().name.clone(),
        n_filtered: 0,
        alpha: config.alpha,
        lfc_threshold: config.lfc_threshold,
        padj_method: config.padj_method,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DgeError;
    use ndarray::array;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn groups() -> SampleGroups {
        SampleGroups::treatment_vs_control(ids(&["t1", "t2", "t3"]), ids(&["c1", "c2", "c3"])).unwrap()
    }

    fn matrix() -> ExpressionMatrix {
        ExpressionMatrix::from_transformed(
            array![
                [8.0, 8.1, 7.9, 4.0, 4.1, 3.9], // up
                [5.0, 5.1, 4.9, 5.0, 5.2, 4.8], // flat
                [2.0, 2.1, 1.9, 6.0, 6.1, 5.9], // down
                [3.0, 3.0, 3.0, 3.0, 3.0, 3.0], // constant
            ],
            ids(&["up", "flat", "down", "constant"]),
            ids(&["t1", "t2", "t3", "c1", "c2", "c3"]),
        )
        .unwrap()
    }

    #[test]
    fn test_differential_test_labels() {
        let results = differential_test(&matrix(), &groups(), &AnalysisConfig::default()).unwrap();
        assert_eq!(results.n_genes(), 4);

        let up = results.gene("up").unwrap();
        assert!((up.log2_fold_change - 4.0).abs() < 1e-9);
        assert_eq!(up.regulation, Regulation::Upregulated);

        let down = results.gene("down").unwrap();
        assert!((down.log2_fold_change + 4.0).abs() < 1e-9);
        assert_eq!(down.regulation, Regulation::Downregulated);

        let flat = results.gene("flat").unwrap();
        assert_eq!(flat.significance, Significance::NotSignificant);
    }

    #[test]
    fn test_untestable_gene_kept_and_last() {
        let results = differential_test(&matrix(), &groups(), &AnalysisConfig::default()).unwrap();
        let last = results.genes.last().unwrap();
        assert_eq!(last.gene_id, "constant");
        assert!(last.p_value.is_nan());
        assert!(last.p_adjusted.is_nan());
        assert!(last.cohens_d.is_nan());
        assert_eq!(last.group_a_mean, 3.0);
        assert_eq!(last.significance, Significance::NotSignificant);
        assert_eq!(results.n_tested(), 3);
    }

    #[test]
    fn test_sorted_by_padj_and_never_below_pvalue() {
        let results = differential_test(&matrix(), &groups(), &AnalysisConfig::default()).unwrap();
        let defined: Vec<&GeneResult> = results.genes.iter().filter(|g| !g.p_adjusted.is_nan()).collect();
        for w in defined.windows(2) {
            assert!(w[0].p_adjusted <= w[1].p_adjusted);
        }
        for g in defined {
            assert!(g.p_adjusted >= g.p_value);
        }
    }

    #[test]
    fn test_ties_keep_matrix_order() {
        // Identical rows get identical p-values
        let matrix = ExpressionMatrix::from_transformed(
            array![[6.0, 6.5, 2.0, 2.5], [6.0, 6.5, 2.0, 2.5], [6.0, 6.5, 2.0, 2.5]],
            ids(&["g_b", "g_a", "g_c"]),
            ids(&["t1", "t2", "c1", "c2"]),
        )
        .unwrap();
        let groups = SampleGroups::treatment_vs_control(ids(&["t1", "t2"]), ids(&["c1", "c2"])).unwrap();
        let results = differential_test(&matrix, &groups, &AnalysisConfig::default()).unwrap();
        let order: Vec<&str> = results.genes.iter().map(|g| g.gene_id.as_str()).collect();
        assert_eq!(order, vec!["g_b", "g_a", "g_c"]);
    }

    #[test]
    fn test_unknown_sample_is_configuration_error() {
        let groups = SampleGroups::treatment_vs_control(ids(&["t1"]), ids(&["nope"])).unwrap();
        let result = differential_test(&matrix(), &groups, &AnalysisConfig::default());
        assert!(matches!(result, Err(DgeError::Configuration { .. })));
    }

    #[test]
    fn test_empty_matrix_gives_empty_results() {
        let empty = matrix().subset_genes(&[]);
        let results = differential_test(&empty, &groups(), &AnalysisConfig::default()).unwrap();
        assert!(results.is_empty());
    }
}
