//! Run-time analysis configuration
//!
//! Every threshold the pipeline uses lives here so that a run can be reproduced
//! from a single JSON file. Fields missing from the file fall back to defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DgeError, Result};

/// Multiple-testing correction applied to the raw p-values of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PadjMethod {
    /// Benjamini-Hochberg false discovery rate
    #[default]
    Bh,
    /// Bonferroni family-wise error rate
    Bonferroni,
}

impl PadjMethod {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bh" | "fdr" | "benjamini-hochberg" => Ok(PadjMethod::Bh),
            "bonferroni" => Ok(PadjMethod::Bonferroni),
            other => Err(DgeError::configuration(format!(
                "Unknown p-value adjustment method '{}'. Use 'bh' or 'bonferroni'.",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PadjMethod::Bh => "bh",
            PadjMethod::Bonferroni => "bonferroni",
        }
    }
}

/// Thresholds and column names for a differential expression run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Name of the gene identifier column in the input table
    pub id_column: String,
    /// Constant added before the log2 transform
    pub pseudocount: f64,
    /// Genes whose mean transformed expression is not above this are dropped
    pub min_mean: f64,
    /// Adjusted p-value cutoff for significance
    pub alpha: f64,
    /// Absolute log2 fold change cutoff for significance
    pub lfc_threshold: f64,
    pub padj_method: PadjMethod,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            id_column: "gene_id".to_string(),
            pseudocount: 1.0,
            min_mean: 4.0,
            alpha: 0.05,
            lfc_threshold: 1.0,
            padj_method: PadjMethod::Bh,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: AnalysisConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds that would make the run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.id_column.trim().is_empty() {
            return Err(DgeError::configuration("id_column must not be empty"));
        }
        if !(self.pseudocount > 0.0) || !self.pseudocount.is_finite() {
            return Err(DgeError::configuration(format!(
                "pseudocount must be a positive finite number, got {}",
                self.pseudocount
            )));
        }
        // -inf is a valid no-op filter
        if self.min_mean.is_nan() || self.min_mean == f64::INFINITY {
            return Err(DgeError::configuration(format!(
                "min_mean must be a number below +inf, got {}",
                self.min_mean
            )));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(DgeError::configuration(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        if !(self.lfc_threshold >= 0.0) || !self.lfc_threshold.is_finite() {
            return Err(DgeError::configuration(format!(
                "lfc_threshold must be a non-negative finite number, got {}",
                self.lfc_threshold
            )));
        }
        Ok(())
    }
}
