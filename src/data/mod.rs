//! Dataset loading and partitioning
//!
//! CSV ingestion with row cleaning, and seeded stratified splits.

pub mod dataset;
pub mod loader;

pub use dataset::ChurnDataset;
pub use loader::{read_dataset, LoadSummary};
