//! Inference service
//!
//! The synchronous prediction boundary consumed by the transport layer:
//! one customer record in, churn label and probability out.

use std::path::PathBuf;

use crate::predict::ModelCache;
use crate::{ChurnPrediction, CustomerRecord, Result};

/// Prediction service over a cached pipeline.
///
/// A pure function of (record, cached pipeline state): the only side effect
/// is triggering the one-time artifact load on first use.
#[derive(Debug)]
pub struct ChurnPredictor {
    cache: ModelCache,
}

impl ChurnPredictor {
    /// Create a predictor loading its pipeline from the given artifact path
    pub fn new(artifact_path: impl Into<PathBuf>) -> Self {
        ChurnPredictor {
            cache: ModelCache::new(artifact_path),
        }
    }

    /// Create a predictor around an existing cache
    pub fn with_cache(cache: ModelCache) -> Self {
        ChurnPredictor { cache }
    }

    /// Predict churn for one customer record.
    ///
    /// The label is decided on the raw probability at the 0.5 threshold;
    /// the reported probability is rounded to two decimal places.
    pub fn predict(&self, record: &CustomerRecord) -> Result<ChurnPrediction> {
        let pipeline = self.cache.get_or_load()?;
        let (churn, probability) = pipeline.predict(record);
        Ok(ChurnPrediction {
            churn,
            probability: round_to_cents(probability),
        })
    }
}

fn round_to_cents(p: f64) -> f64 {
    (p * 100.0).round() / 100.0
}

/// Format a prediction for terminal display
pub fn format_prediction(record: &CustomerRecord, prediction: &ChurnPrediction) -> String {
    format!(
        r#"
┌───────────────────────────────────────┐
│  Customer (tenure {} months)
├───────────────────────────────────────┤
│  Churn:        {}
│  Probability:  {:.0}%
└───────────────────────────────────────┘
"#,
        record.tenure,
        prediction.churn,
        prediction.probability * 100.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureTransformer;
    use crate::model::{ChurnClassifier, ChurnPipeline};
    use crate::ChurnLabel;

    fn record(tenure: u32, monthly: f64, contract: &str) -> CustomerRecord {
        CustomerRecord {
            tenure,
            monthly_charges: monthly,
            total_charges: monthly * tenure.max(1) as f64,
            contract: contract.to_string(),
            internet_service: "Fiber optic".to_string(),
            online_security: "No".to_string(),
            tech_support: "No".to_string(),
            paperless_billing: "Yes".to_string(),
        }
    }

    fn predictor_with_artifact(dir: &tempfile::TempDir) -> ChurnPredictor {
        let records = vec![
            record(1, 70.0, "Month-to-month"),
            record(24, 55.0, "One year"),
            record(60, 90.0, "Two year"),
        ];
        let transformer = FeatureTransformer::fit(&records).unwrap();
        let dim = transformer.output_dim();
        let weights: Vec<f32> = (0..dim).map(|i| 0.2 - 0.05 * i as f32).collect();
        let pipeline =
            ChurnPipeline::new(transformer, ChurnClassifier::new(weights, 0.1)).unwrap();

        let path = dir.path().join("pipeline.bin");
        pipeline.save(&path).unwrap();
        ChurnPredictor::new(path)
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(0.873512), 0.87);
        assert_eq!(round_to_cents(0.875), 0.88);
        assert_eq!(round_to_cents(0.0), 0.0);
        assert_eq!(round_to_cents(1.0), 1.0);
    }

    #[test]
    fn test_predict_returns_rounded_valid_probability() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = predictor_with_artifact(&dir);

        let prediction = predictor.predict(&record(3, 75.0, "Month-to-month")).unwrap();
        assert!((0.0..=1.0).contains(&prediction.probability));
        // Two-decimal rounding holds exactly
        let cents = prediction.probability * 100.0;
        assert_eq!(cents, cents.round());
    }

    #[test]
    fn test_repeated_predictions_are_bit_identical() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = predictor_with_artifact(&dir);
        let r = record(12, 60.0, "One year");

        let first = predictor.predict(&r).unwrap();
        for _ in 0..10 {
            let next = predictor.predict(&r).unwrap();
            assert_eq!(next.churn, first.churn);
            assert_eq!(next.probability.to_bits(), first.probability.to_bits());
        }
    }

    #[test]
    fn test_prediction_serializes_to_wire_json() {
        let prediction = ChurnPrediction {
            churn: ChurnLabel::Yes,
            probability: 0.87,
        };
        let json = serde_json::to_string(&prediction).unwrap();
        assert_eq!(json, r#"{"churn":"Yes","probability":0.87}"#);
    }

    #[test]
    fn test_unknown_category_still_predicts() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = predictor_with_artifact(&dir);

        let prediction = predictor.predict(&record(3, 75.0, "Weekly")).unwrap();
        assert!((0.0..=1.0).contains(&prediction.probability));
    }

    #[test]
    fn test_injected_cache_is_shared_state() {
        use crate::predict::ModelCache;

        let dir = tempfile::tempdir().unwrap();
        // Seed the artifact through a throwaway predictor
        predictor_with_artifact(&dir);

        let cache = ModelCache::new(dir.path().join("pipeline.bin"));
        cache.get_or_load().unwrap();

        let predictor = ChurnPredictor::with_cache(cache);
        let prediction = predictor.predict(&record(8, 45.0, "Two year")).unwrap();
        assert!((0.0..=1.0).contains(&prediction.probability));
    }
}
