//! Offline training procedure
//!
//! Loads the labeled dataset, fits the pipeline on a stratified train
//! partition, evaluates it on the held-out partition, and reports the
//! results.

pub mod metrics;
pub mod trainer;

pub use metrics::{Metrics, TrainingHistory};
pub use trainer::LogisticTrainer;

use burn::tensor::backend::AutodiffBackend;
use std::fmt;

use crate::data::dataset::ChurnDataset;
use crate::data::loader;
use crate::features::FeatureTransformer;
use crate::model::ChurnPipeline;
use crate::{ChurnError, ChurnLabel, Config, Result, TrainingConfig};

/// Outcome of one training run
#[derive(Debug)]
pub struct TrainingReport {
    pub metrics: Metrics,
    pub history: TrainingHistory,
    /// Rows excluded during cleaning for failed numeric coercion
    pub dropped_rows: usize,
    pub train_size: usize,
    pub test_size: usize,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Evaluation")?;
        writeln!(f, "{}", "-".repeat(30))?;
        writeln!(
            f,
            "Rows: train={}, test={}, dropped during cleaning={}",
            self.train_size, self.test_size, self.dropped_rows
        )?;
        writeln!(
            f,
            "Fit: {} iterations, converged={}, final loss={:.6}",
            self.history.epochs(),
            self.history.converged,
            self.history.best_loss
        )?;
        write!(f, "{}", self.metrics)
    }
}

/// Run the full training procedure from the configured dataset path and
/// persist the fitted pipeline to the configured artifact path
pub fn train_and_evaluate<B: AutodiffBackend>(
    config: &Config,
    device: B::Device,
) -> Result<(ChurnPipeline, TrainingReport)> {
    let summary = loader::read_dataset(&config.data.dataset_path)?;
    let (pipeline, report) =
        fit_and_evaluate::<B>(summary.dataset, summary.dropped_rows, &config.training, device)?;
    pipeline.save(&config.data.artifact_path)?;
    Ok((pipeline, report))
}

/// Fit and evaluate a pipeline on an already-loaded dataset
pub fn fit_and_evaluate<B: AutodiffBackend>(
    dataset: ChurnDataset,
    dropped_rows: usize,
    training: &TrainingConfig,
    device: B::Device,
) -> Result<(ChurnPipeline, TrainingReport)> {
    if dataset.is_empty() {
        return Err(ChurnError::EmptyDataset);
    }

    let (train, test) = dataset.stratified_split(training.train_ratio, training.seed);
    if train.is_empty() || test.is_empty() {
        return Err(ChurnError::EmptyDataset);
    }

    // Scaling statistics and category sets come from the train partition only
    let transformer = FeatureTransformer::fit(&train.records)?;
    let train_rows = transformer.transform_batch(&train.records);

    let trainer = LogisticTrainer::<B>::new(
        device,
        training.learning_rate,
        training.max_epochs,
        training.tolerance,
    );
    let (classifier, history) = trainer.fit(&train_rows, &train.labels)?;

    let pipeline = ChurnPipeline::new(transformer, classifier)?;
    let metrics = evaluate(&pipeline, &test);

    log::info!(
        "Evaluation on {} held-out rows: accuracy {:.4}",
        test.len(),
        metrics.accuracy()
    );

    let report = TrainingReport {
        metrics,
        history,
        dropped_rows,
        train_size: train.len(),
        test_size: test.len(),
    };
    Ok((pipeline, report))
}

/// Score a fitted pipeline against a labeled partition
pub fn evaluate(pipeline: &ChurnPipeline, dataset: &ChurnDataset) -> Metrics {
    let mut metrics = Metrics::new();
    for (record, &label) in dataset.records.iter().zip(&dataset.labels) {
        let (predicted, _) = pipeline.predict(record);
        metrics.record(predicted == ChurnLabel::Yes, label == 1);
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CustomerRecord;
    use burn::backend::{Autodiff, NdArray};

    type TestBackend = Autodiff<NdArray<f32>>;

    /// Synthetic dataset where churners are short-tenure month-to-month
    /// customers with high charges
    fn synthetic(n_per_class: usize) -> ChurnDataset {
        let mut records = Vec::new();
        let mut labels = Vec::new();
        for i in 0..n_per_class {
            records.push(CustomerRecord {
                tenure: 1 + (i as u32 % 4),
                monthly_charges: 85.0 + (i % 7) as f64,
                total_charges: 90.0 + i as f64,
                contract: "Month-to-month".to_string(),
                internet_service: "Fiber optic".to_string(),
                online_security: "No".to_string(),
                tech_support: "No".to_string(),
                paperless_billing: "Yes".to_string(),
            });
            labels.push(1);
            records.push(CustomerRecord {
                tenure: 48 + (i as u32 % 20),
                monthly_charges: 30.0 + (i % 5) as f64,
                total_charges: 1500.0 + 10.0 * i as f64,
                contract: "Two year".to_string(),
                internet_service: "DSL".to_string(),
                online_security: "Yes".to_string(),
                tech_support: "Yes".to_string(),
                paperless_billing: "No".to_string(),
            });
            labels.push(0);
        }
        ChurnDataset::new(records, labels)
    }

    fn training_config() -> TrainingConfig {
        TrainingConfig {
            max_epochs: 300,
            learning_rate: 0.5,
            tolerance: 1e-8,
            train_ratio: 0.8,
            seed: 42,
        }
    }

    #[test]
    fn test_fit_and_evaluate_learns_the_pattern() {
        let device = Default::default();
        let (pipeline, report) =
            fit_and_evaluate::<TestBackend>(synthetic(25), 3, &training_config(), device).unwrap();

        assert_eq!(report.dropped_rows, 3);
        assert_eq!(report.train_size + report.test_size, 50);
        assert!(report.metrics.accuracy() > 0.9);

        let (label, prob) = pipeline.predict(&synthetic(1).records[0]);
        assert_eq!(label, ChurnLabel::Yes);
        assert!(prob > 0.5);
    }

    #[test]
    fn test_artifact_round_trip_matches_in_memory_predictions() {
        let device = Default::default();
        let dataset = synthetic(20);
        let holdout: Vec<CustomerRecord> = dataset.records[30..].to_vec();

        let (pipeline, _) =
            fit_and_evaluate::<TestBackend>(dataset, 0, &training_config(), device).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.bin");
        pipeline.save(&path).unwrap();
        let restored = ChurnPipeline::load(&path).unwrap();

        for record in &holdout {
            let (label_a, prob_a) = pipeline.predict(record);
            let (label_b, prob_b) = restored.predict(record);
            assert_eq!(label_a, label_b);
            assert_eq!(prob_a.to_bits(), prob_b.to_bits());
        }
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let device = Default::default();
        let dataset = ChurnDataset::new(Vec::new(), Vec::new());
        assert!(matches!(
            fit_and_evaluate::<TestBackend>(dataset, 0, &training_config(), device),
            Err(ChurnError::EmptyDataset)
        ));
    }
}
