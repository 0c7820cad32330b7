//! Per-sample quality control
//!
//! Summaries of the raw matrix (and its log2 transform) that flag failed or
//! outlying libraries before any testing is done.

mod correlation;
mod sample_stats;

pub use correlation::{sample_correlations, SampleCorrelations};
pub use sample_stats::{sample_qc, SampleQc};
