//! Feature extraction and encoding
//!
//! Converts raw customer records into the fixed-width numeric vectors the
//! classifier consumes.

pub mod encoding;
pub mod scaling;
pub mod transformer;

pub use encoding::CategoryEncoder;
pub use scaling::NumericScaler;
pub use transformer::FeatureTransformer;
