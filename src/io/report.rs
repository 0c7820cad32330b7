//! Report writers: result table, QC table, correlation matrix, summary JSON

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::Writer;

use super::results::{DEResults, ResultsSummary};
use crate::data::ExpressionMatrix;
use crate::error::Result;
use crate::qc::{SampleCorrelations, SampleQc};

/// Column order of the result table
pub const RESULT_COLUMNS: [&str; 9] = [
    "gene_id",
    "group_a_mean",
    "group_b_mean",
    "log2FC",
    "cohens_d",
    "p_value",
    "p_adjusted",
    "significance",
    "regulation",
];

/// Fixed-point formatting; undefined values become `NA`
fn fixed(x: f64) -> String {
    if x.is_nan() {
        "NA".to_string()
    } else {
        format!("{:.6}", x)
    }
}

/// Scientific formatting for p-values; undefined values become `NA`
fn scientific(x: f64) -> String {
    if x.is_nan() {
        "NA".to_string()
    } else {
        format!("{:.6e}", x)
    }
}

/// Write the differential expression table in result order
pub fn write_results<W: Write>(writer: W, results: &DEResults) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(RESULT_COLUMNS)?;

    for gene in &results.genes {
        csv.write_record([
            gene.gene_id.clone(),
            fixed(gene.group_a_mean),
            fixed(gene.group_b_mean),
            fixed(gene.log2_fold_change),
            fixed(gene.cohens_d),
            scientific(gene.p_value),
            scientific(gene.p_adjusted),
            gene.significance.to_string(),
            gene.regulation.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the differential expression table to a file
pub fn write_results_file<P: AsRef<Path>>(path: P, results: &DEResults) -> Result<()> {
    write_results(BufWriter::new(File::create(path)?), results)
}

/// Write the per-sample QC table
pub fn write_qc<P: AsRef<Path>>(path: P, qc: &[SampleQc]) -> Result<()> {
    let mut csv = Writer::from_path(path)?;
    csv.write_record([
        "sample_id",
        "group",
        "total_counts",
        "mean",
        "median",
        "sd",
        "min",
        "max",
        "zero_counts",
        "detected_genes",
        "log2_mean",
    ])?;

    for sample in qc {
        csv.write_record([
            sample.sample_id.clone(),
            sample.group.clone(),
            fixed(sample.total_counts),
            fixed(sample.mean),
            fixed(sample.median),
            fixed(sample.sd),
            fixed(sample.min),
            fixed(sample.max),
            sample.zero_counts.to_string(),
            sample.detected_genes.to_string(),
            fixed(sample.log2_mean),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write a square sample correlation matrix with sample IDs as header and first column
pub fn write_correlations<P: AsRef<Path>>(path: P, correlations: &SampleCorrelations) -> Result<()> {
    let mut csv = Writer::from_path(path)?;

    let mut header = vec!["sample_id".to_string()];
    header.extend(correlations.sample_ids.iter().cloned());
    csv.write_record(&header)?;

    for (i, sample_id) in correlations.sample_ids.iter().enumerate() {
        let mut row = vec![sample_id.clone()];
        row.extend(correlations.values.row(i).iter().map(|&r| fixed(r)));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write an expression matrix (e.g. the filtered log2 matrix)
pub fn write_matrix<P: AsRef<Path>>(path: P, matrix: &ExpressionMatrix, id_column: &str) -> Result<()> {
    let mut csv = Writer::from_path(path)?;

    let mut header = vec![id_column.to_string()];
    header.extend(matrix.sample_ids().iter().cloned());
    csv.write_record(&header)?;

    for (i, gene_id) in matrix.gene_ids().iter().enumerate() {
        let mut row = vec![gene_id.clone()];
        row.extend(matrix.gene_values(i).iter().map(|&x| fixed(x)));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the run summary as pretty-printed JSON
pub fn write_summary_json<P: AsRef<Path>>(path: P, summary: &ResultsSummary) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PadjMethod;
    use crate::io::GeneResult;
    use crate::testing::{Regulation, Significance};
    use ndarray::array;
    use tempfile::NamedTempFile;

    fn results() -> DEResults {
        DEResults {
            genes: vec![
                GeneResult {
                    gene_id: "g1".to_string(),
                    group_a_mean: 6.5,
                    group_b_mean: 3.25,
                    log2_fold_change: 3.25,
                    t_statistic: 9.0,
                    p_value: 0.0001,
                    p_adjusted: 0.0002,
                    cohens_d: 9.0,
                    significance: Significance::Significant,
                    regulation: Regulation::Upregulated,
                },
                GeneResult {
                    gene_id: "g2".to_string(),
                    group_a_mean: 3.0,
                    group_b_mean: 3.0,
                    log2_fold_change: 0.0,
                    t_statistic: f64::NAN,
                    p_value: f64::NAN,
                    p_adjusted: f64::NAN,
                    cohens_d: f64::NAN,
                    significance: Significance::NotSignificant,
                    regulation: Regulation::NotChanged,
                },
            ],
            group_a: "treatment".to_string(),
            group_b: "control".to_string(),
            n_filtered: 1,
            alpha: 0.05,
            lfc_threshold: 1.0,
            padj_method: PadjMethod::Bh,
        }
    }

    #[test]
    fn test_write_results_layout() {
        let mut buffer = Vec::new();
        write_results(&mut buffer, &results()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "gene_id,group_a_mean,group_b_mean,log2FC,cohens_d,p_value,p_adjusted,significance,regulation"
        );
        assert_eq!(
            lines[1],
            "g1,6.500000,3.250000,3.250000,9.000000,1.000000e-4,2.000000e-4,Significant,Upregulated"
        );
        assert_eq!(
            lines[2],
            "g2,3.000000,3.000000,0.000000,NA,NA,NA,Not Significant,Not Changed"
        );
    }

    #[test]
    fn test_write_matrix_and_summary() {
        let matrix = ExpressionMatrix::new(
            array![[1.0, 2.5]],
            vec!["g1".to_string()],
            vec!["s1".to_string(), "s2".to_string()],
        )
        .unwrap();

        let file = NamedTempFile::new().unwrap();
        write_matrix(file.path(), &matrix, "gene_id").unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "gene_id,s1,s2\ng1,1.000000,2.500000\n");

        let file = NamedTempFile::new().unwrap();
        write_summary_json(file.path(), &results().summary()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(json["significant"], 1);
        assert_eq!(json["genes_tested"], 1);
        assert_eq!(json["padj_method"], "bh");
    }
}
