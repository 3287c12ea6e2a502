//! Fitted record-to-vector transformation
//!
//! Combines per-column scaling and one-hot encoding into a single mapping
//! with a column order frozen at fit time.

use serde::{Deserialize, Serialize};

use crate::features::{CategoryEncoder, NumericScaler};
use crate::{ChurnError, CustomerRecord, Result};

/// Numeric columns, in output vector order
pub const NUMERIC_COLUMNS: [&str; 3] = ["tenure", "MonthlyCharges", "TotalCharges"];

/// Categorical columns, in output vector order
pub const CATEGORICAL_COLUMNS: [&str; 5] = [
    "Contract",
    "InternetService",
    "OnlineSecurity",
    "TechSupport",
    "PaperlessBilling",
];

/// Stateless (once fitted) mapping from a customer record to a fixed-width
/// feature vector: the numeric z-score block followed by one indicator block
/// per categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTransformer {
    scalers: Vec<NumericScaler>,
    encoders: Vec<CategoryEncoder>,
}

impl FeatureTransformer {
    /// Fit scaling statistics and category sets over the training records
    pub fn fit(records: &[CustomerRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(ChurnError::EmptyDataset);
        }

        let scalers = (0..NUMERIC_COLUMNS.len())
            .map(|col| {
                let values: Vec<f64> = records.iter().map(|r| r.numeric_values()[col]).collect();
                NumericScaler::fit(&values)
            })
            .collect();

        let encoders = (0..CATEGORICAL_COLUMNS.len())
            .map(|col| CategoryEncoder::fit(records.iter().map(|r| r.categorical_values()[col])))
            .collect();

        Ok(FeatureTransformer { scalers, encoders })
    }

    /// Transform a record using the frozen fitted state.
    ///
    /// The output length and column order are identical for every call on
    /// the same fitted transformer.
    pub fn transform(&self, record: &CustomerRecord) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.output_dim());

        let numeric = record.numeric_values();
        for (scaler, value) in self.scalers.iter().zip(numeric) {
            out.push(scaler.transform(value));
        }

        let categorical = record.categorical_values();
        for (encoder, value) in self.encoders.iter().zip(categorical) {
            encoder.encode(value, &mut out);
        }

        out
    }

    /// Transform a batch of records into row vectors
    pub fn transform_batch(&self, records: &[CustomerRecord]) -> Vec<Vec<f32>> {
        records.iter().map(|r| self.transform(r)).collect()
    }

    /// Width of the transformed vector
    pub fn output_dim(&self) -> usize {
        self.scalers.len() + self.encoders.iter().map(|e| e.width()).sum::<usize>()
    }

    /// Human-readable output column names, in vector order
    pub fn column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();
        for (column, encoder) in CATEGORICAL_COLUMNS.iter().zip(&self.encoders) {
            for category in encoder.categories() {
                names.push(format!("{}={}", column, category));
            }
        }
        names
    }
}
