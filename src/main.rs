//! rust_dge command-line interface

use clap::Parser;
use log::{info, LevelFilter};

use rust_dge::cli::{Cli, Commands, GroupArgs, ThresholdArgs};
use rust_dge::prelude::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Find the first non-flag argument (potential subcommand)
    let first_positional = args.iter().skip(1).find(|a| !a.starts_with('-'));
    let subcommands = ["run", "qc", "transform", "help"];
    let has_subcommand = first_positional.map_or(false, |a| subcommands.contains(&a.as_str()));

    if !has_subcommand {
        if args.len() == 1 {
            print_no_args();
            return;
        }
        if args.iter().any(|a| a == "--help") {
            print_long_help();
            return;
        }
        if args.iter().any(|a| a == "-h") {
            print_short_help();
            return;
        }
        if args.iter().any(|a| a == "-V" || a == "--version") {
            println!("rust_dge {}", VERSION);
            return;
        }
        print_no_args();
        return;
    }

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Some(Commands::Run {
            counts,
            groups,
            thresholds,
            output,
            qc_output,
            correlation_output,
            summary_json,
            top,
        }) => run_de(
            &counts,
            &groups,
            &thresholds,
            &output,
            qc_output.as_deref(),
            correlation_output.as_deref(),
            summary_json.as_deref(),
            top,
        ),
        Some(Commands::Qc {
            counts,
            groups,
            thresholds,
            output,
            correlation_output,
        }) => run_qc(&counts, &groups, &thresholds, &output, correlation_output.as_deref()),
        Some(Commands::Transform {
            counts,
            thresholds,
            output,
        }) => run_transform(&counts, &thresholds, &output),
        None => {
            print_no_args();
            return;
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Custom help output
// ---------------------------------------------------------------------------

fn print_no_args() {
    println!("rust_dge v{}", VERSION);
    println!("Run `rust_dge -h` for usage or `rust_dge --help` for detailed information.");
}

fn print_short_help() {
    println!("rust_dge v{}", VERSION);
    println!();
    println!("Usage: rust_dge <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  run        Run differential expression analysis");
    println!("  qc         Per-sample quality control");
    println!("  transform  Write the log2-transformed, filtered matrix");
    println!();
    println!("Run `rust_dge <COMMAND> -h` for command-specific options.");
}

fn print_long_help() {
    println!("rust_dge v{}", VERSION);
    println!("Two-group differential gene expression analysis");
    println!();
    println!("Usage: rust_dge <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  run        Run differential expression analysis");
    println!("               - log2(x + pseudocount) transform and mean-expression filter");
    println!("               - Student's t-test (equal variances) per gene");
    println!("               - Benjamini-Hochberg or Bonferroni correction");
    println!("               - Cohen's d effect size and up/down classification");
    println!("  qc         Per-sample quality control and sample correlations");
    println!("  transform  Write the log2-transformed, filtered matrix");
    println!();
    println!("Global Options:");
    println!("  -v, --verbose    Enable verbose output");
    println!("  -h               Print short help");
    println!("      --help       Print detailed help");
    println!("  -V, --version    Print version");
    println!();
    println!("Examples:");
    println!("  rust_dge run -c counts.csv --treatment T1,T2,T3 --control C1,C2,C3 -o results.csv");
    println!();
    println!("  rust_dge run -c counts.csv -m samples.csv -d condition \\");
    println!("    --numerator treated --denominator control --summary-json summary.json");
    println!();
    println!("  rust_dge qc -c counts.csv -o qc.csv --correlation-output corr.csv");
}

// ---------------------------------------------------------------------------
// Argument resolution
// ---------------------------------------------------------------------------

/// Defaults, then the JSON file, then command-line flags
fn build_config(args: &ThresholdArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            AnalysisConfig::from_json_file(path)?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(id_column) = &args.id_column {
        config.id_column = id_column.clone();
    }
    if let Some(pseudocount) = args.pseudocount {
        config.pseudocount = pseudocount;
    }
    if let Some(min_mean) = args.min_mean {
        config.min_mean = min_mean;
    }
    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    if let Some(lfc_threshold) = args.lfc_threshold {
        config.lfc_threshold = lfc_threshold;
    }
    if let Some(method) = &args.padj_method {
        config.padj_method = PadjMethod::parse(method)?;
    }

    config.validate()?;
    Ok(config)
}

fn has_group_args(args: &GroupArgs) -> bool {
    !args.treatment.is_empty() || !args.control.is_empty() || args.metadata.is_some()
}

fn build_groups(args: &GroupArgs) -> Result<SampleGroups> {
    let explicit = !args.treatment.is_empty() || !args.control.is_empty();

    match (&args.metadata, explicit) {
        (Some(_), true) => Err(DgeError::Configuration {
            reason: "Use either --treatment/--control or --metadata, not both".to_string(),
        }),
        (None, true) => SampleGroups::treatment_vs_control(args.treatment.clone(), args.control.clone()),
        (Some(path), false) => {
            let (design, numerator, denominator) =
                match (&args.design, &args.numerator, &args.denominator) {
                    (Some(d), Some(n), Some(den)) => (d, n, den),
                    _ => {
                        return Err(DgeError::Configuration {
                            reason: "--metadata requires --design, --numerator and --denominator"
                                .to_string(),
                        })
                    }
                };
            info!("Loading metadata from: {}", path);
            let metadata = read_metadata(path)?;
            SampleGroups::from_metadata(&metadata, design, numerator, denominator)
        }
        (None, false) => Err(DgeError::Configuration {
            reason: "No groups given. Use --treatment/--control or --metadata with --design".to_string(),
        }),
    }
}

fn load_counts(counts_path: &str, config: &AnalysisConfig) -> Result<ExpressionMatrix> {
    info!("Loading expression matrix from: {}", counts_path);
    let counts = read_expression_matrix(counts_path, &config.id_column)?;
    info!("  {} genes, {} samples", counts.n_genes(), counts.n_samples());
    Ok(counts)
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn run_de(
    counts_path: &str,
    group_args: &GroupArgs,
    threshold_args: &ThresholdArgs,
    output_path: &str,
    qc_output: Option<&str>,
    correlation_output: Option<&str>,
    summary_json: Option<&str>,
    top: usize,
) -> Result<()> {
    let config = build_config(threshold_args)?;
    let groups = build_groups(group_args)?;
    let counts = load_counts(counts_path, &config)?;

    let analysis = run_analysis(&counts, &groups, &config)?;

    if let Some(path) = qc_output {
        info!("Writing sample QC to: {}", path);
        write_qc(path, &sample_qc(&counts, Some(&groups), config.pseudocount))?;
    }

    if let Some(path) = correlation_output {
        info!("Writing sample correlations to: {}", path);
        write_correlations(path, &sample_correlations(&analysis.preprocessed.transformed))?;
    }

    info!("Writing results to: {}", output_path);
    write_results_file(output_path, &analysis.results)?;

    let summary = analysis.results.summary();
    if let Some(path) = summary_json {
        info!("Writing summary to: {}", path);
        write_summary_json(path, &summary)?;
    }

    for gene in analysis.results.top_genes(top).iter().filter(|g| g.is_significant()) {
        info!(
            "  {:<20} log2FC={:>8.3} d={:>8.3} padj={:.3e} {}",
            gene.gene_id, gene.log2_fold_change, gene.cohens_d, gene.p_adjusted, gene.regulation
        );
    }

    println!("\n{}", summary);
    Ok(())
}

fn run_qc(
    counts_path: &str,
    group_args: &GroupArgs,
    threshold_args: &ThresholdArgs,
    output_path: &str,
    correlation_output: Option<&str>,
) -> Result<()> {
    let config = build_config(threshold_args)?;
    let groups = if has_group_args(group_args) {
        Some(build_groups(group_args)?)
    } else {
        None
    };
    let counts = load_counts(counts_path, &config)?;
    if let Some(groups) = &groups {
        groups.resolve(&counts)?;
    }

    info!("Writing sample QC to: {}", output_path);
    write_qc(output_path, &sample_qc(&counts, groups.as_ref(), config.pseudocount))?;

    if let Some(path) = correlation_output {
        let transformed = log2_transform(&counts, config.pseudocount)?;
        info!("Writing sample correlations to: {}", path);
        write_correlations(path, &sample_correlations(&transformed))?;
    }

    info!("Done!");
    Ok(())
}

fn run_transform(counts_path: &str, threshold_args: &ThresholdArgs, output_path: &str) -> Result<()> {
    let config = build_config(threshold_args)?;
    let counts = load_counts(counts_path, &config)?;

    let preprocessed = preprocess(&counts, &config)?;

    info!("Writing log2-transformed matrix to: {}", output_path);
    write_matrix(output_path, &preprocessed.filtered, &config.id_column)?;

    info!("Done!");
    Ok(())
}
