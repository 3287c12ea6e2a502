//! Fitted model components
//!
//! The linear classifier and the composed transform-then-classify pipeline
//! that is persisted as a single artifact.

pub mod logistic;
pub mod pipeline;

pub use logistic::ChurnClassifier;
pub use pipeline::ChurnPipeline;
