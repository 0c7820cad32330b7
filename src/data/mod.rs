//! Data structures for differential expression analysis

mod expression_matrix;
mod groups;
mod metadata;

pub use expression_matrix::ExpressionMatrix;
pub use groups::{GroupIndices, SampleGroup, SampleGroups};
pub use metadata::SampleMetadata;
