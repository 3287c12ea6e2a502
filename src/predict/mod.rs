//! Online inference
//!
//! Lazily loads the persisted pipeline once per process and serves
//! predictions from it.

pub mod cache;
pub mod service;

pub use cache::ModelCache;
pub use service::ChurnPredictor;
