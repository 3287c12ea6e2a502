//! One-hot encoding for categorical columns

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoder over the category set observed at fit time.
///
/// Categories are stored sorted, so the indicator column order is a pure
/// function of the training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    categories: Vec<String>,
}

impl CategoryEncoder {
    /// Collect the distinct categories from the training values
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let set: BTreeSet<&str> = values.into_iter().collect();
        CategoryEncoder {
            categories: set.into_iter().map(String::from).collect(),
        }
    }

    /// Number of indicator columns this encoder produces
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Append the indicator block for `value` to the output vector.
    ///
    /// A value absent from the fit-time category set encodes as all zeros
    /// rather than an error, keeping the serving path available on feature
    /// drift.
    pub fn encode(&self, value: &str, out: &mut Vec<f32>) {
        for category in &self.categories {
            out.push(if category == value { 1.0 } else { 0.0 });
        }
    }
}
