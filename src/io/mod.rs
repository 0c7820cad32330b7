//! Input/Output operations

mod csv;
mod report;
mod results;

pub use self::csv::{read_expression_matrix, read_metadata};
pub use report::{
    write_correlations, write_matrix, write_qc, write_results, write_results_file,
    write_summary_json, RESULT_COLUMNS,
};
pub use results::{DEResults, GeneResult, ResultsSummary};
