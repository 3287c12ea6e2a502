//! Composed transform-then-classify pipeline
//!
//! The unit that gets persisted after training and loaded for serving. Both
//! components' fitted state travels in one binary artifact, loadable without
//! the original training data.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::features::FeatureTransformer;
use crate::model::ChurnClassifier;
use crate::{ChurnError, ChurnLabel, CustomerRecord, Result};

/// Fitted pipeline: feature transformer + linear classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnPipeline {
    transformer: FeatureTransformer,
    classifier: ChurnClassifier,
}

impl ChurnPipeline {
    /// Compose a fitted transformer and classifier.
    ///
    /// The two must come from the same fit: a classifier trained on vectors
    /// of a different width is rejected.
    pub fn new(transformer: FeatureTransformer, classifier: ChurnClassifier) -> Result<Self> {
        if transformer.output_dim() != classifier.num_features() {
            return Err(ChurnError::Training(format!(
                "transformer produces {} features but classifier expects {}",
                transformer.output_dim(),
                classifier.num_features()
            )));
        }
        Ok(ChurnPipeline {
            transformer,
            classifier,
        })
    }

    /// Predict churn for one record: transform with the frozen state, then
    /// classify. Returns the label and the unrounded churn probability.
    pub fn predict(&self, record: &CustomerRecord) -> (ChurnLabel, f64) {
        let vector = self.transformer.transform(record);
        let (churned, probability) = self.classifier.predict(&vector);
        let label = if churned {
            ChurnLabel::Yes
        } else {
            ChurnLabel::No
        };
        (label, probability)
    }

    pub fn transformer(&self) -> &FeatureTransformer {
        &self.transformer
    }

    pub fn classifier(&self) -> &ChurnClassifier {
        &self.classifier
    }

    /// Serialize the pipeline to a single artifact file, creating parent
    /// directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = bincode::serialize(self)
            .map_err(|e| ChurnError::Training(format!("failed to serialize pipeline: {}", e)))?;
        std::fs::write(path, bytes)?;
        log::info!("Saved pipeline artifact to {}", path.display());
        Ok(())
    }

    /// Load a pipeline artifact, distinguishing a missing file from a
    /// corrupt one
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ChurnError::ArtifactNotFound(path.to_path_buf())
            } else {
                ChurnError::Io(e)
            }
        })?;
        bincode::deserialize(&bytes).map_err(|e| ChurnError::ArtifactCorrupt(e.to_string()))
    }
}
