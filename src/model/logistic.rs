//! Linear probabilistic classifier
//!
//! Holds the coefficients learned during training and computes calibrated
//! churn probabilities from transformed feature vectors.

use serde::{Deserialize, Serialize};

/// Fitted logistic regression parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnClassifier {
    weights: Vec<f32>,
    intercept: f32,
}

impl ChurnClassifier {
    pub fn new(weights: Vec<f32>, intercept: f32) -> Self {
        ChurnClassifier { weights, intercept }
    }

    /// Number of input features the classifier expects
    pub fn num_features(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn intercept(&self) -> f32 {
        self.intercept
    }

    /// Probability of the positive class (churn) for a transformed vector
    pub fn predict_proba(&self, features: &[f32]) -> f64 {
        debug_assert_eq!(features.len(), self.weights.len());

        let mut z = self.intercept as f64;
        for (w, x) in self.weights.iter().zip(features) {
            z += *w as f64 * *x as f64;
        }
        sigmoid(z)
    }

    /// Binary decision at the 0.5 threshold, with the raw probability
    pub fn predict(&self, features: &[f32]) -> (bool, f64) {
        let probability = self.predict_proba(features);
        (probability >= 0.5, probability)
    }
}

/// Logistic link, branched to avoid exp overflow for large |z|
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_bounds_and_midpoint() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(4.0) > 0.9);
        assert!(sigmoid(-4.0) < 0.1);

        // Extreme scores saturate without overflowing to NaN
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
    }

    #[test]
    fn test_accessors_expose_fitted_parameters() {
        let classifier = ChurnClassifier::new(vec![0.25, -1.5, 0.0], 0.75);

        assert_eq!(classifier.num_features(), 3);
        assert_eq!(classifier.weights(), &[0.25, -1.5, 0.0]);
        assert_eq!(classifier.intercept(), 0.75);
    }

    #[test]
    fn test_predict_thresholds_at_half() {
        let classifier = ChurnClassifier::new(vec![1.0, -2.0], 0.5);

        let (label, prob) = classifier.predict(&[1.0, 0.0]);
        assert!(label);
        assert!(prob > 0.5);

        let (label, prob) = classifier.predict(&[0.0, 1.0]);
        assert!(!label);
        assert!(prob < 0.5);
    }

    #[test]
    fn test_probability_is_valid_for_any_input() {
        let classifier = ChurnClassifier::new(vec![10.0, -10.0, 3.0], -1.0);

        for features in [[100.0, -100.0, 50.0], [0.0, 0.0, 0.0], [-1e6, 1e6, 0.0]] {
            let p = classifier.predict_proba(&features);
            assert!((0.0..=1.0).contains(&p), "p={} out of range", p);
        }
    }
}
