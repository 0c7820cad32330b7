//! Transformation functions for expression data
//!
//! Tests run on log2-transformed values, so fold changes are differences of
//! group means on this scale.

mod log2;

pub use log2::log2_transform;
