//! Expression matrix representation for gene-by-sample tables

use std::collections::HashSet;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{DgeError, Result};

/// Return the first identifier that occurs more than once
fn first_duplicate(ids: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .find(|id| !seen.insert(id.as_str()))
        .map(|id| id.as_str())
}

/// A gene-by-sample expression matrix
/// Rows are genes, columns are samples
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionMatrix {
    /// Expression values (genes x samples)
    values: Array2<f64>,
    /// Gene identifiers, unique, in input order
    gene_ids: Vec<String>,
    /// Sample identifiers, unique, in input order
    sample_ids: Vec<String>,
}

impl ExpressionMatrix {
    /// Create a new expression matrix from raw values
    ///
    /// Values must be non-negative and finite; gene and sample identifiers
    /// must be unique.
    pub fn new(values: Array2<f64>, gene_ids: Vec<String>, sample_ids: Vec<String>) -> Result<Self> {
        if values.iter().any(|&x| x < 0.0 || !x.is_finite()) {
            return Err(DgeError::format(
                "Expression values must be non-negative finite numbers",
            ));
        }

        Self::from_parts(values, gene_ids, sample_ids)
    }

    /// Create a matrix of already-transformed values
    ///
    /// Transformed values may be negative (e.g. log2 with a pseudocount below 1)
    /// but must still be finite.
    pub(crate) fn from_transformed(
        values: Array2<f64>,
        gene_ids: Vec<String>,
        sample_ids: Vec<String>,
    ) -> Result<Self> {
        if values.iter().any(|x| !x.is_finite()) {
            return Err(DgeError::format("Transformed values must be finite"));
        }

        Self::from_parts(values, gene_ids, sample_ids)
    }

    fn from_parts(values: Array2<f64>, gene_ids: Vec<String>, sample_ids: Vec<String>) -> Result<Self> {
        let (n_genes, n_samples) = values.dim();

        if gene_ids.len() != n_genes {
            return Err(DgeError::DimensionMismatch {
                expected: format!("{} gene IDs", n_genes),
                got: format!("{} gene IDs", gene_ids.len()),
            });
        }

        if sample_ids.len() != n_samples {
            return Err(DgeError::DimensionMismatch {
                expected: format!("{} sample IDs", n_samples),
                got: format!("{} sample IDs", sample_ids.len()),
            });
        }

        if let Some(dup) = first_duplicate(&gene_ids) {
            return Err(DgeError::format(format!("Duplicate gene identifier '{}'", dup)));
        }

        if let Some(dup) = first_duplicate(&sample_ids) {
            return Err(DgeError::format(format!("Duplicate sample identifier '{}'", dup)));
        }

        Ok(Self {
            values,
            gene_ids,
            sample_ids,
        })
    }

    /// Get the number of genes
    pub fn n_genes(&self) -> usize {
        self.values.nrows()
    }

    /// Get the number of samples
    pub fn n_samples(&self) -> usize {
        self.values.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.n_genes() == 0
    }

    /// Get the values as a view
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Get gene IDs
    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    /// Get sample IDs
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Get values for a specific gene
    pub fn gene_values(&self, gene_idx: usize) -> ArrayView1<'_, f64> {
        self.values.row(gene_idx)
    }

    /// Get values for a specific sample
    pub fn sample_values(&self, sample_idx: usize) -> ArrayView1<'_, f64> {
        self.values.column(sample_idx)
    }

    /// Get sample index by ID
    pub fn sample_index(&self, sample_id: &str) -> Option<usize> {
        self.sample_ids.iter().position(|id| id == sample_id)
    }

    /// Mean value per gene across all samples
    pub fn gene_means(&self) -> Vec<f64> {
        let n = self.n_samples() as f64;
        self.values
            .axis_iter(Axis(0))
            .map(|row| row.sum() / n)
            .collect()
    }

    /// Apply `f` to every value, keeping identifiers
    pub fn map_values<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        let values = self.values.mapv(f);
        Self::from_transformed(values, self.gene_ids.clone(), self.sample_ids.clone())
    }

    /// Subset to specific genes, preserving the given order
    pub fn subset_genes(&self, gene_indices: &[usize]) -> Self {
        let values = self.values.select(Axis(0), gene_indices);
        let gene_ids = gene_indices
            .iter()
            .map(|&i| self.gene_ids[i].clone())
            .collect();

        Self {
            values,
            gene_ids,
            sample_ids: self.sample_ids.clone(),
        }
    }
}
