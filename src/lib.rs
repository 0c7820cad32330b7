//! rust_dge: two-group differential gene expression analysis in Rust
//!
//! Reads a gene-by-sample expression table, log2-transforms it with a
//! pseudocount, drops low-expression genes, runs an equal-variance t-test per
//! gene, corrects p-values across the run (Benjamini-Hochberg by default),
//! computes Cohen's d and labels each gene.
//!
//! # Example
//!
//! ```ignore
//! use rust_dge::prelude::*;
//!
//! let config = AnalysisConfig::default();
//! let counts = read_expression_matrix("counts.csv", &config.id_column)?;
//! let groups = SampleGroups::treatment_vs_control(treatment_ids, control_ids)?;
//!
//! let analysis = run_analysis(&counts, &groups, &config)?;
//! write_results_file("de_results.csv", &analysis.results)?;
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod io;
pub mod qc;
pub mod stats;
pub mod testing;
pub mod transform;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AnalysisConfig, PadjMethod};
    pub use crate::data::{ExpressionMatrix, SampleGroup, SampleGroups, SampleMetadata};
    pub use crate::error::{DgeError, Result};
    pub use crate::filter::{filter_by_mean, FilterOutcome};
    pub use crate::io::{
        read_expression_matrix, read_metadata, write_correlations, write_matrix, write_qc,
        write_results_file, write_summary_json, DEResults, GeneResult, ResultsSummary,
    };
    pub use crate::qc::{sample_correlations, sample_qc, SampleCorrelations, SampleQc};
    pub use crate::testing::{benjamini_hochberg, classify, differential_test, Regulation, Significance};
    pub use crate::transform::log2_transform;
    pub use crate::{preprocess, run_analysis, Analysis, Preprocessed};
}

use prelude::*;

/// Log2-transformed matrix before and after the expression filter
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// All genes, transformed
    pub transformed: ExpressionMatrix,
    /// Genes whose mean transformed value exceeded `min_mean`
    pub filtered: ExpressionMatrix,
    pub n_dropped: usize,
}

/// Output of a full run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub preprocessed: Preprocessed,
    pub results: DEResults,
}

/// Transform with `log2(x + pseudocount)` and keep genes with mean above `min_mean`
pub fn preprocess(matrix: &ExpressionMatrix, config: &AnalysisConfig) -> Result<Preprocessed> {
    let transformed = log2_transform(matrix, config.pseudocount)?;
    let FilterOutcome { matrix: filtered, n_dropped } = filter_by_mean(&transformed, config.min_mean);

    log::info!(
        "Kept {} of {} genes with mean log2 expression > {} ({} dropped)",
        filtered.n_genes(),
        transformed.n_genes(),
        config.min_mean,
        n_dropped
    );

    Ok(Preprocessed {
        transformed,
        filtered,
        n_dropped,
    })
}

/// Run the complete pipeline: preprocess, then test the retained genes
///
/// Configuration and group problems are reported before any computation.
pub fn run_analysis(matrix: &ExpressionMatrix, groups: &SampleGroups, config: &AnalysisConfig) -> Result<Analysis> {
    config.validate()?;
    groups.resolve(matrix)?;

    let preprocessed = preprocess(matrix, config)?;

    log::info!(
        "Testing {} genes: {} (n={}) vs {} (n={})",
        preprocessed.filtered.n_genes(),
        groups.group_a().name,
        groups.group_a().len(),
        groups.group_b().name,
        groups.group_b().len()
    );
    let mut results = differential_test(&preprocessed.filtered, groups, config)?;
    results.n_filtered = preprocessed.n_dropped;

    Ok(Analysis {
        preprocessed,
        results,
    })
}
