//! CSV reading for expression matrices and sample sheets

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use ndarray::Array2;

use crate::data::{ExpressionMatrix, SampleMetadata};
use crate::error::{DgeError, Result};

/// Tab for `.tsv`/`.tab`/`.txt` files, comma otherwise
fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if matches!(ext.to_ascii_lowercase().as_str(), "tsv" | "tab" | "txt") => b'\t',
        _ => b',',
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// I/O failures stay `Csv`; anything else the reader rejects is malformed input
fn read_error(err: csv::Error) -> DgeError {
    if matches!(err.kind(), csv::ErrorKind::Io(_)) {
        return DgeError::Csv(err);
    }
    match err.position() {
        Some(pos) => DgeError::format(format!("Unreadable input at line {}: {}", pos.line(), err)),
        None => DgeError::format(format!("Unreadable input: {}", err)),
    }
}

/// Read an expression matrix
///
/// The header row names the samples; the column called `id_column` holds gene
/// identifiers and may appear at any position. Every other cell must parse as a
/// non-negative finite number.
pub fn read_expression_matrix<P: AsRef<Path>>(path: P, id_column: &str) -> Result<ExpressionMatrix> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let header = reader.headers().map_err(read_error)?.clone();
    if header.is_empty() {
        return Err(DgeError::format("Empty input file"));
    }

    let id_idx = header
        .iter()
        .position(|h| h == id_column)
        .ok_or_else(|| {
            DgeError::format(format!("Identifier column '{}' not found in header", id_column))
        })?;

    let sample_cols: Vec<usize> = (0..header.len()).filter(|&i| i != id_idx).collect();
    if sample_cols.is_empty() {
        return Err(DgeError::format("No sample columns in header"));
    }
    let sample_ids: Vec<String> = sample_cols.iter().map(|&i| header[i].to_string()).collect();
    if let Some(pos) = sample_cols.iter().position(|&i| header[i].is_empty()) {
        return Err(DgeError::format(format!(
            "Header column {} has an empty sample name",
            sample_cols[pos] + 1
        )));
    }

    let mut gene_ids: Vec<String> = Vec::new();
    let mut data: Vec<f64> = Vec::new();

    for record in reader.records() {
        let record = record.map_err(read_error)?;
        if record.len() != header.len() {
            return Err(DgeError::format(format!(
                "Line {} has {} columns, expected {}",
                line_of(&record),
                record.len(),
                header.len()
            )));
        }

        let gene_id = &record[id_idx];
        if gene_id.is_empty() {
            return Err(DgeError::format(format!(
                "Line {} has an empty gene identifier",
                line_of(&record)
            )));
        }
        gene_ids.push(gene_id.to_string());

        for (&col, sample) in sample_cols.iter().zip(sample_ids.iter()) {
            let raw = &record[col];
            let value = raw.parse::<f64>().map_err(|_| {
                DgeError::format(format!(
                    "Non-numeric value '{}' for gene '{}', sample '{}' (line {})",
                    raw,
                    gene_id,
                    sample,
                    line_of(&record)
                ))
            })?;
            data.push(value);
        }
    }

    if gene_ids.is_empty() {
        return Err(DgeError::format("No genes found in expression matrix"));
    }

    if data.iter().any(|&x| x.is_finite() && x != x.round()) {
        log::warn!("Some expression values are not integers; continuing with raw values");
    }

    let values = Array2::from_shape_vec((gene_ids.len(), sample_ids.len()), data).map_err(|e| {
        DgeError::DimensionMismatch {
            expected: format!("{} x {} values", gene_ids.len(), sample_ids.len()),
            got: e.to_string(),
        }
    })?;

    ExpressionMatrix::new(values, gene_ids, sample_ids)
}

/// Read sample metadata
/// Expected format: first column is sample IDs, remaining columns are conditions
pub fn read_metadata<P: AsRef<Path>>(path: P) -> Result<SampleMetadata> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let header = reader.headers().map_err(read_error)?.clone();
    if header.len() < 2 {
        return Err(DgeError::format(
            "Metadata needs a sample ID column and at least one condition column",
        ));
    }
    let condition_names: Vec<String> = header.iter().skip(1).map(|s| s.to_string()).collect();

    let mut sample_ids: Vec<String> = Vec::new();
    let mut conditions: HashMap<&str, Vec<String>> = condition_names
        .iter()
        .map(|name| (name.as_str(), Vec::new()))
        .collect();

    for record in reader.records() {
        let record = record.map_err(read_error)?;
        if record.len() != header.len() {
            return Err(DgeError::format(format!(
                "Metadata line {} has {} columns, expected {}",
                line_of(&record),
                record.len(),
                header.len()
            )));
        }

        sample_ids.push(record[0].to_string());
        for (i, name) in condition_names.iter().enumerate() {
            if let Some(values) = conditions.get_mut(name.as_str()) {
                values.push(record[i + 1].to_string());
            }
        }
    }

    if sample_ids.is_empty() {
        return Err(DgeError::format("No samples found in metadata"));
    }

    let mut metadata = SampleMetadata::new(sample_ids)?;
    for (name, values) in conditions {
        metadata.add_condition(name, values)?;
    }

    Ok(metadata)
}
