//! Significance and regulation labels

use std::fmt;

use serde::Serialize;

/// Whether a gene passes both the adjusted p-value and fold change cutoffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Significance {
    #[serde(rename = "Significant")]
    Significant,
    #[serde(rename = "Not Significant")]
    NotSignificant,
}

/// Direction of a significant change in group A relative to group B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Regulation {
    #[serde(rename = "Upregulated")]
    Upregulated,
    #[serde(rename = "Downregulated")]
    Downregulated,
    #[serde(rename = "Not Changed")]
    NotChanged,
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Significance::Significant => write!(f, "Significant"),
            Significance::NotSignificant => write!(f, "Not Significant"),
        }
    }
}

impl fmt::Display for Regulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regulation::Upregulated => write!(f, "Upregulated"),
            Regulation::Downregulated => write!(f, "Downregulated"),
            Regulation::NotChanged => write!(f, "Not Changed"),
        }
    }
}

/// Label a gene from its adjusted p-value and log2 fold change
///
/// Both cutoffs are strict. A NaN adjusted p-value or fold change never
/// compares true, so untestable genes come out as not significant and not changed.
pub fn classify(p_adjusted: f64, log2_fold_change: f64, alpha: f64, lfc_threshold: f64) -> (Significance, Regulation) {
    let passes_padj = p_adjusted < alpha;

    let significance = if passes_padj && log2_fold_change.abs() > lfc_threshold {
        Significance::Significant
    } else {
        Significance::NotSignificant
    };

    let regulation = if passes_padj && log2_fold_change > lfc_threshold {
        Regulation::Upregulated
    } else if passes_padj && log2_fold_change < -lfc_threshold {
        Regulation::Downregulated
    } else {
        Regulation::NotChanged
    };

    (significance, regulation)
}
