//! CSV ingestion and row cleaning
//!
//! Reads the historical dataset, coerces the textual TotalCharges column to
//! a float (dropping and counting rows that fail), discards the identifier
//! column, and maps the Yes/No target to binary labels.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::data::dataset::ChurnDataset;
use crate::{ChurnError, CustomerRecord, Result};

/// One raw dataset row as it appears on disk.
///
/// TotalCharges is kept as text here: the source data leaves it blank for
/// customers with no billing history, so coercion happens during cleaning.
/// Columns outside this schema are ignored by the reader.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "customerID")]
    #[allow(dead_code)]
    customer_id: String,
    tenure: u32,
    #[serde(rename = "MonthlyCharges")]
    monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    total_charges: String,
    #[serde(rename = "Contract")]
    contract: String,
    #[serde(rename = "InternetService")]
    internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    online_security: String,
    #[serde(rename = "TechSupport")]
    tech_support: String,
    #[serde(rename = "PaperlessBilling")]
    paperless_billing: String,
    #[serde(rename = "Churn")]
    churn: String,
}

/// Cleaned dataset plus what the cleaning removed
#[derive(Debug)]
pub struct LoadSummary {
    pub dataset: ChurnDataset,
    /// Rows dropped because TotalCharges failed numeric coercion
    pub dropped_rows: usize,
}

/// Read and clean the labeled dataset from a CSV file
pub fn read_dataset(path: impl AsRef<Path>) -> Result<LoadSummary> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path)?;
    let summary = parse_rows(reader)?;
    log::info!(
        "Loaded {} rows from {} ({} dropped on TotalCharges coercion)",
        summary.dataset.len(),
        path.display(),
        summary.dropped_rows
    );
    Ok(summary)
}

/// Parse and clean rows from an open CSV reader
fn parse_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<LoadSummary> {
    let mut records = Vec::new();
    let mut labels = Vec::new();
    let mut dropped_rows = 0usize;

    for result in reader.deserialize::<RawRow>() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                // A row that cannot bind to the schema is a contract
                // violation, not a cleanable value.
                let is_schema = matches!(e.kind(), csv::ErrorKind::Deserialize { .. });
                return Err(if is_schema {
                    ChurnError::SchemaMismatch(e.to_string())
                } else {
                    ChurnError::Csv(e)
                });
            }
        };

        let total_charges = match row.total_charges.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                dropped_rows += 1;
                continue;
            }
        };

        let label = match row.churn.as_str() {
            "Yes" => 1u8,
            "No" => 0u8,
            other => {
                return Err(ChurnError::SchemaMismatch(format!(
                    "unexpected Churn value '{}'",
                    other
                )))
            }
        };

        records.push(CustomerRecord {
            tenure: row.tenure,
            monthly_charges: row.monthly_charges,
            total_charges,
            contract: row.contract,
            internet_service: row.internet_service,
            online_security: row.online_security,
            tech_support: row.tech_support,
            paperless_billing: row.paperless_billing,
        });
        labels.push(label);
    }

    Ok(LoadSummary {
        dataset: ChurnDataset::new(records, labels),
        dropped_rows,
    })
}
