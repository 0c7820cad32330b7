//! Filtering of low-expression genes before testing

mod expression;

pub use expression::{filter_by_mean, FilterOutcome};
