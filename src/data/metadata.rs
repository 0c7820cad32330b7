//! Sample metadata read from a sample sheet

use std::collections::{HashMap, HashSet};

use crate::error::{DgeError, Result};

/// Sample metadata containing categorical experimental variables
#[derive(Debug, Clone)]
pub struct SampleMetadata {
    /// Sample identifiers
    sample_ids: Vec<String>,
    /// Experimental variables (column name -> value for each sample)
    conditions: HashMap<String, Vec<String>>,
}

impl SampleMetadata {
    /// Create new sample metadata
    pub fn new(sample_ids: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for id in &sample_ids {
            if !seen.insert(id) {
                return Err(DgeError::format(format!(
                    "Duplicate sample ID '{}' in metadata",
                    id
                )));
            }
        }
        Ok(Self {
            sample_ids,
            conditions: HashMap::new(),
        })
    }

    /// Add a condition column
    pub fn add_condition(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.sample_ids.len() {
            return Err(DgeError::DimensionMismatch {
                expected: format!("{} values", self.sample_ids.len()),
                got: format!("{} values", values.len()),
            });
        }
        self.conditions.insert(name.to_string(), values);
        Ok(())
    }

    /// Get sample IDs
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Get number of samples
    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }

    /// Get unique levels for a condition (sorted)
    pub fn levels(&self, condition_name: &str) -> Option<Vec<String>> {
        self.conditions.get(condition_name).map(|values| {
            let mut unique: Vec<String> = values.to_vec();
            unique.sort();
            unique.dedup();
            unique
        })
    }

    /// Sample IDs carrying a given level of a condition, in sheet order
    pub fn samples_with_level(&self, condition_name: &str, level: &str) -> Vec<String> {
        self.conditions
            .get(condition_name)
            .map(|values| {
                values
                    .iter()
                    .zip(self.sample_ids.iter())
                    .filter(|(v, _)| v.as_str() == level)
                    .map(|(_, id)| id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
