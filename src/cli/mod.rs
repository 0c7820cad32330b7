//! Command-line interface for rust_dge

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rust_dge")]
#[command(version)]
#[command(about = "Two-group differential gene expression analysis in Rust")]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// How samples are split into the two groups
#[derive(Args, Debug, Clone, Default)]
pub struct GroupArgs {
    /// Group A (numerator) sample IDs, comma-separated
    #[arg(long, value_delimiter = ',', value_name = "SAMPLES")]
    pub treatment: Vec<String>,

    /// Group B (denominator) sample IDs, comma-separated
    #[arg(long, value_delimiter = ',', value_name = "SAMPLES")]
    pub control: Vec<String>,

    /// Path to sample metadata CSV file
    #[arg(short, long,
        long_help = "Path to sample metadata CSV file.\n\
            Format: first column = sample IDs, remaining columns = experimental variables.\n\
            Use with --design, --numerator and --denominator instead of --treatment/--control.")]
    pub metadata: Option<String>,

    /// Design variable in the metadata
    #[arg(short, long)]
    pub design: Option<String>,

    /// Level of the design variable used as group A
    #[arg(long)]
    pub numerator: Option<String>,

    /// Level of the design variable used as group B
    #[arg(long)]
    pub denominator: Option<String>,
}

/// Threshold overrides; unset values come from --config or the defaults
#[derive(Args, Debug, Clone, Default)]
pub struct ThresholdArgs {
    /// JSON configuration file
    #[arg(long, value_name = "FILE",
        long_help = "JSON configuration file with any of: id_column, pseudocount,\n\
            min_mean, alpha, lfc_threshold, padj_method.\n\
            Command-line flags override values from the file.")]
    pub config: Option<String>,

    /// Gene identifier column name [default: gene_id]
    #[arg(long)]
    pub id_column: Option<String>,

    /// Pseudocount added before log2 [default: 1.0]
    #[arg(long)]
    pub pseudocount: Option<f64>,

    /// Minimum mean log2 expression to keep a gene [default: 4.0]
    #[arg(long, allow_hyphen_values = true)]
    pub min_mean: Option<f64>,

    /// Adjusted p-value cutoff [default: 0.05]
    #[arg(short, long)]
    pub alpha: Option<f64>,

    /// Absolute log2 fold change cutoff [default: 1.0]
    #[arg(long)]
    pub lfc_threshold: Option<f64>,

    /// Multiple testing correction [default: bh]
    #[arg(long,
        long_help = "Multiple testing correction.\n\
            bh:         Benjamini-Hochberg FDR (default)\n\
            bonferroni: Bonferroni FWER")]
    pub padj_method: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full differential expression analysis
    #[command(
        long_about = "Run the full differential expression analysis\n\n\
            log2(x + pseudocount) transform, mean-expression filter, per-gene\n\
            Student's t-test, p-value correction, Cohen's d and classification.",
        after_long_help = "\
Examples:
  rust_dge run -c counts.csv --treatment T1,T2,T3 --control C1,C2,C3 -o results.csv

  rust_dge run -c counts.csv -m samples.csv -d condition \\
    --numerator treated --denominator control --min-mean 2 --qc-output qc.csv"
    )]
    Run {
        /// Path to expression matrix CSV file
        #[arg(short, long)]
        counts: String,

        #[command(flatten)]
        groups: GroupArgs,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Output file path [default: de_results.csv]
        #[arg(short, long, default_value = "de_results.csv")]
        output: String,

        /// Also write per-sample QC statistics
        #[arg(long, value_name = "FILE")]
        qc_output: Option<String>,

        /// Also write the sample correlation matrix of log2 values
        #[arg(long, value_name = "FILE")]
        correlation_output: Option<String>,

        /// Also write the run summary as JSON
        #[arg(long, value_name = "FILE")]
        summary_json: Option<String>,

        /// Number of top genes to log [default: 10]
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Per-sample quality control only
    #[command(
        after_long_help = "\
Examples:
  rust_dge qc -c counts.csv -o qc.csv
  rust_dge qc -c counts.csv --treatment T1,T2 --control C1,C2 --correlation-output corr.csv"
    )]
    Qc {
        /// Path to expression matrix CSV file
        #[arg(short, long)]
        counts: String,

        #[command(flatten)]
        groups: GroupArgs,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Output file path [default: sample_qc.csv]
        #[arg(short, long, default_value = "sample_qc.csv")]
        output: String,

        /// Also write the sample correlation matrix of log2 values
        #[arg(long, value_name = "FILE")]
        correlation_output: Option<String>,
    },

    /// Write the log2-transformed, filtered matrix
    #[command(
        after_long_help = "\
Examples:
  rust_dge transform -c counts.csv -o log2_filtered.csv
  rust_dge transform -c counts.csv --min-mean -inf -o log2_all.csv"
    )]
    Transform {
        /// Path to expression matrix CSV file
        #[arg(short, long)]
        counts: String,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Output file path [default: log2_filtered.csv]
        #[arg(short, long, default_value = "log2_filtered.csv")]
        output: String,
    },
}
