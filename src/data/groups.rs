//! Two-group sample assignment

use std::collections::HashSet;

use serde::Serialize;

use crate::data::{ExpressionMatrix, SampleMetadata};
use crate::error::{DgeError, Result};

/// A named set of sample identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleGroup {
    pub name: String,
    pub samples: Vec<String>,
}

impl SampleGroup {
    pub fn new(name: &str, samples: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Partition of samples into group A (numerator) and group B (denominator)
///
/// Fold changes are reported as A relative to B. Construction guarantees both
/// groups are non-empty and disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleGroups {
    group_a: SampleGroup,
    group_b: SampleGroup,
}

/// Column indices of each group within a specific matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupIndices {
    pub a: Vec<usize>,
    pub b: Vec<usize>,
    /// Matrix columns in neither group
    pub unassigned: usize,
}

impl SampleGroups {
    pub fn new(group_a: SampleGroup, group_b: SampleGroup) -> Result<Self> {
        for group in [&group_a, &group_b] {
            if group.is_empty() {
                return Err(DgeError::configuration(format!(
                    "Group '{}' has no samples",
                    group.name
                )));
            }
            let mut seen = HashSet::new();
            if let Some(dup) = group.samples.iter().find(|s| !seen.insert(s.as_str())) {
                return Err(DgeError::configuration(format!(
                    "Sample '{}' listed twice in group '{}'",
                    dup, group.name
                )));
            }
        }

        let a: HashSet<&str> = group_a.samples.iter().map(|s| s.as_str()).collect();
        let overlap: Vec<&str> = group_b
            .samples
            .iter()
            .map(|s| s.as_str())
            .filter(|s| a.contains(s))
            .collect();
        if !overlap.is_empty() {
            return Err(DgeError::configuration(format!(
                "Groups '{}' and '{}' overlap: {:?}",
                group_a.name, group_b.name, overlap
            )));
        }

        Ok(Self { group_a, group_b })
    }

    /// Build groups from two sample lists with the default labels
    pub fn treatment_vs_control(treatment: Vec<String>, control: Vec<String>) -> Result<Self> {
        Self::new(
            SampleGroup::new("treatment", treatment),
            SampleGroup::new("control", control),
        )
    }

    /// Build groups from a sample sheet: samples with `numerator` in `design`
    /// form group A, samples with `denominator` form group B
    pub fn from_metadata(
        metadata: &SampleMetadata,
        design: &str,
        numerator: &str,
        denominator: &str,
    ) -> Result<Self> {
        let levels = metadata.levels(design).ok_or_else(|| {
            DgeError::configuration(format!("Design variable '{}' not found in metadata", design))
        })?;

        for level in [numerator, denominator] {
            if !levels.iter().any(|l| l == level) {
                return Err(DgeError::configuration(format!(
                    "Level '{}' not found in '{}' (available: {})",
                    level,
                    design,
                    levels.join(", ")
                )));
            }
        }

        Self::new(
            SampleGroup::new(numerator, metadata.samples_with_level(design, numerator)),
            SampleGroup::new(denominator, metadata.samples_with_level(design, denominator)),
        )
    }

    pub fn group_a(&self) -> &SampleGroup {
        &self.group_a
    }

    pub fn group_b(&self) -> &SampleGroup {
        &self.group_b
    }

    /// Label of the group a sample belongs to, if any
    pub fn label_of(&self, sample_id: &str) -> Option<&str> {
        if self.group_a.samples.iter().any(|s| s == sample_id) {
            Some(&self.group_a.name)
        } else if self.group_b.samples.iter().any(|s| s == sample_id) {
            Some(&self.group_b.name)
        } else {
            None
        }
    }

    /// Resolve sample identifiers to column indices of `matrix`
    ///
    /// Fails if any assigned sample is absent from the matrix.
    pub fn resolve(&self, matrix: &ExpressionMatrix) -> Result<GroupIndices> {
        let lookup = |group: &SampleGroup| -> Result<Vec<usize>> {
            let missing: Vec<&str> = group
                .samples
                .iter()
                .filter(|s| matrix.sample_index(s).is_none())
                .map(|s| s.as_str())
                .collect();
            if !missing.is_empty() {
                return Err(DgeError::configuration(format!(
                    "Group '{}' references samples not in the expression matrix: {:?}",
                    group.name, missing
                )));
            }
            Ok(group
                .samples
                .iter()
                .filter_map(|s| matrix.sample_index(s))
                .collect())
        };

        let a = lookup(&self.group_a)?;
        let b = lookup(&self.group_b)?;
        let unassigned = matrix.n_samples() - a.len() - b.len();

        Ok(GroupIndices { a, b, unassigned })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_group_rejected() {
        let result = SampleGroups::treatment_vs_control(ids(&["s1"]), vec![]);
        assert!(matches!(result, Err(DgeError::Configuration { .. })));
    }

    #[test]
    fn test_overlap_rejected() {
        let result = SampleGroups::treatment_vs_control(ids(&["s1", "s2"]), ids(&["s2", "s3"]));
        match result {
            Err(DgeError::Configuration { reason }) => assert!(reason.contains("s2")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_indices() {
        let matrix = ExpressionMatrix::new(
            array![[1.0, 2.0, 3.0, 4.0]],
            ids(&["g1"]),
            ids(&["c1", "t1", "c2", "t2"]),
        )
        .unwrap();
        let groups = SampleGroups::treatment_vs_control(ids(&["t1", "t2"]), ids(&["c1", "c2"])).unwrap();

        let indices = groups.resolve(&matrix).unwrap();
        assert_eq!(indices.a, vec![1, 3]);
        assert_eq!(indices.b, vec![0, 2]);
        assert_eq!(indices.unassigned, 0);
        assert_eq!(groups.label_of("c2"), Some("control"));
        assert_eq!(groups.label_of("x"), None);
    }

    #[test]
    fn test_resolve_counts_unassigned() {
        let matrix = ExpressionMatrix::new(
            array![[1.0, 2.0, 3.0, 4.0, 5.0]],
            ids(&["g1"]),
            ids(&["t1", "x1", "c1", "x2", "t2"]),
        )
        .unwrap();
        let groups = SampleGroups::treatment_vs_control(ids(&["t1", "t2"]), ids(&["c1"])).unwrap();
        let indices = groups.resolve(&matrix).unwrap();
        assert_eq!(indices.a, vec![0, 4]);
        assert_eq!(indices.unassigned, 2);
    }

    #[test]
    fn test_resolve_unknown_sample() {
        let matrix = ExpressionMatrix::new(array![[1.0, 2.0]], ids(&["g1"]), ids(&["s1", "s2"])).unwrap();
        let groups = SampleGroups::treatment_vs_control(ids(&["s1"]), ids(&["s9"])).unwrap();
        assert!(matches!(groups.resolve(&matrix), Err(DgeError::Configuration { .. })));
    }

    #[test]
    fn test_from_metadata() {
        let mut meta = SampleMetadata::new(ids(&["s1", "s2", "s3", "s4"])).unwrap();
        meta.add_condition("condition", ids(&["ctl", "drug", "ctl", "drug"])).unwrap();

        let groups = SampleGroups::from_metadata(&meta, "condition", "drug", "ctl").unwrap();
        assert_eq!(groups.group_a().name, "drug");
        assert_eq!(groups.group_a().samples, ids(&["s2", "s4"]));
        assert_eq!(groups.group_b().samples, ids(&["s1", "s3"]));

        assert!(SampleGroups::from_metadata(&meta, "batch", "drug", "ctl").is_err());
        assert!(SampleGroups::from_metadata(&meta, "condition", "placebo", "ctl").is_err());
    }
}
