//! Differential expression results structure

use serde::Serialize;

use crate::config::PadjMethod;
use crate::testing::{Regulation, Significance};

/// Per-gene outcome of the two-group comparison
///
/// Means and fold change are on the log2 scale. Statistical fields are NaN
/// for genes that could not be tested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneResult {
    pub gene_id: String,
    pub group_a_mean: f64,
    pub group_b_mean: f64,
    /// `group_a_mean - group_b_mean`
    pub log2_fold_change: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub p_adjusted: f64,
    pub cohens_d: f64,
    pub significance: Significance,
    pub regulation: Regulation,
}

impl GeneResult {
    pub fn is_significant(&self) -> bool {
        self.significance == Significance::Significant
    }
}

/// Results of one run, ordered by adjusted p-value
#[derive(Debug, Clone)]
pub struct DEResults {
    /// Gene records, ascending by `p_adjusted`, NaN last
    pub genes: Vec<GeneResult>,
    /// Label of group A (numerator)
    pub group_a: String,
    /// Label of group B (denominator)
    pub group_b: String,
    /// Genes dropped by the expression filter before testing
    pub n_filtered: usize,
    pub alpha: f64,
    pub lfc_threshold: f64,
    pub padj_method: PadjMethod,
}

impl DEResults {
    /// Get number of genes
    pub fn n_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Genes with a defined p-value
    pub fn n_tested(&self) -> usize {
        self.genes.iter().filter(|g| g.p_value.is_finite()).count()
    }

    /// Look up a gene by ID
    pub fn gene(&self, gene_id: &str) -> Option<&GeneResult> {
        self.genes.iter().find(|g| g.gene_id == gene_id)
    }

    /// Get significant genes
    pub fn significant_genes(&self) -> Vec<&str> {
        self.genes
            .iter()
            .filter(|g| g.is_significant())
            .map(|g| g.gene_id.as_str())
            .collect()
    }

    /// Get up-regulated genes
    pub fn upregulated_genes(&self) -> Vec<&str> {
        self.with_regulation(Regulation::Upregulated)
    }

    /// Get down-regulated genes
    pub fn downregulated_genes(&self) -> Vec<&str> {
        self.with_regulation(Regulation::Downregulated)
    }

    fn with_regulation(&self, regulation: Regulation) -> Vec<&str> {
        self.genes
            .iter()
            .filter(|g| g.regulation == regulation)
            .map(|g| g.gene_id.as_str())
            .collect()
    }

    /// The `n` best-ranked genes
    pub fn top_genes(&self, n: usize) -> &[GeneResult] {
        &self.genes[..n.min(self.genes.len())]
    }

    /// Summary statistics
    pub fn summary(&self) -> ResultsSummary {
        ResultsSummary {
            group_a: self.group_a.clone(),
            group_b: self.group_b.clone(),
            genes_filtered: self.n_filtered,
            genes_retained: self.n_genes(),
            genes_tested: self.n_tested(),
            significant: self.significant_genes().len(),
            upregulated: self.upregulated_genes().len(),
            downregulated: self.downregulated_genes().len(),
            alpha: self.alpha,
            lfc_threshold: self.lfc_threshold,
            padj_method: self.padj_method,
        }
    }
}

/// Summary of a differential expression run
#[derive(Debug, Clone, Serialize)]
pub struct ResultsSummary {
    pub group_a: String,
    pub group_b: String,
    pub genes_filtered: usize,
    pub genes_retained: usize,
    pub genes_tested: usize,
    pub significant: usize,
    pub upregulated: usize,
    pub downregulated: usize,
    pub alpha: f64,
    pub lfc_threshold: f64,
    pub padj_method: PadjMethod,
}

impl std::fmt::Display for ResultsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Differential Expression Summary ({} vs {})", self.group_a, self.group_b)?;
        writeln!(f, "===============================")?;
        writeln!(f, "Genes filtered (low expression): {}", self.genes_filtered)?;
        writeln!(f, "Genes retained: {}", self.genes_retained)?;
        writeln!(f, "Genes tested: {}", self.genes_tested)?;
        writeln!(
            f,
            "Significant (padj < {}, |log2FC| > {}, {}): {}",
            self.alpha,
            self.lfc_threshold,
            self.padj_method.as_str(),
            self.significant
        )?;
        writeln!(f, "  Up-regulated: {}", self.upregulated)?;
        writeln!(f, "  Down-regulated: {}", self.downregulated)?;
        Ok(())
    }
}
