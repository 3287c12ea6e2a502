//! Customer churn prediction
//!
//! A logistic regression pipeline for predicting whether a customer will
//! churn, trained offline on historical account data and served through an
//! in-process inference boundary.

pub mod data;
pub mod features;
pub mod model;
pub mod predict;
pub mod training;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One customer's account attributes, the unit of prediction.
///
/// Field renames preserve the wire names shared by the training dataset and
/// the serving API, so a record deserializes identically from either side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub tenure: u32,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[serde(rename = "TechSupport")]
    pub tech_support: String,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: String,
}

impl CustomerRecord {
    /// Numeric feature values in the fixed column order
    /// (tenure, MonthlyCharges, TotalCharges).
    pub fn numeric_values(&self) -> [f64; 3] {
        [
            self.tenure as f64,
            self.monthly_charges,
            self.total_charges,
        ]
    }

    /// Categorical feature values in the fixed column order
    /// (Contract, InternetService, OnlineSecurity, TechSupport, PaperlessBilling).
    pub fn categorical_values(&self) -> [&str; 5] {
        [
            &self.contract,
            &self.internet_service,
            &self.online_security,
            &self.tech_support,
            &self.paperless_billing,
        ]
    }
}

/// Binary churn outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChurnLabel {
    Yes,
    No,
}

impl ChurnLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnLabel::Yes => "Yes",
            ChurnLabel::No => "No",
        }
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prediction output returned at the inference boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnPrediction {
    pub churn: ChurnLabel,
    /// Probability of churn, rounded to two decimal places
    pub probability: f64,
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum ChurnError {
    #[error("Pipeline artifact not found at {} - run `churn train` first", .0.display())]
    ArtifactNotFound(PathBuf),

    #[error("Pipeline artifact is corrupt: {0}")]
    ArtifactCorrupt(String),

    #[error("Record does not match the expected schema: {0}")]
    SchemaMismatch(String),

    #[error("Dataset contains no usable rows")]
    EmptyDataset,

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChurnError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub training: TrainingConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Iteration budget for the optimizer
    pub max_epochs: usize,
    pub learning_rate: f64,
    /// Loss delta below which the fit is considered converged
    pub tolerance: f64,
    /// Fraction of rows assigned to the train partition
    pub train_ratio: f32,
    /// Seed for the stratified train/test shuffle
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub dataset_path: String,
    pub artifact_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            training: TrainingConfig {
                max_epochs: 1000,
                learning_rate: 0.1,
                tolerance: 1e-6,
                train_ratio: 0.8,
                seed: 42,
            },
            data: DataConfig {
                dataset_path: "data/telco_churn.csv".to_string(),
                artifact_path: "model/churn_pipeline.bin".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChurnError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ChurnError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChurnError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
