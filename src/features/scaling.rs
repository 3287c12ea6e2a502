//! Z-score standardization for numeric columns

use serde::{Deserialize, Serialize};

/// Per-column standardization parameters, frozen at fit time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericScaler {
    pub mean: f64,
    pub std: f64,
}

impl NumericScaler {
    /// Compute mean and standard deviation over the training values.
    ///
    /// A constant column has zero deviation; its scale is clamped to 1 so
    /// transforms yield 0 instead of NaN.
    pub fn fit(values: &[f64]) -> Self {
        let m = mean(values);
        let s = std(values, m);
        NumericScaler {
            mean: m,
            std: if s <= f64::EPSILON { 1.0 } else { s },
        }
    }

    /// Standardize a value using the frozen training statistics
    pub fn transform(&self, x: f64) -> f32 {
        ((x - self.mean) / self.std) as f32
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 1.0;
    }
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_computes_population_stats() {
        let scaler = NumericScaler::fit(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

        assert!((scaler.mean - 5.0).abs() < 1e-12);
        assert!((scaler.std - 2.0).abs() < 1e-12);
        assert!((scaler.transform(5.0) - 0.0).abs() < 1e-6);
        assert!((scaler.transform(9.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_constant_column_transforms_to_zero() {
        let scaler = NumericScaler::fit(&[3.5, 3.5, 3.5]);

        assert_eq!(scaler.std, 1.0);
        assert_eq!(scaler.transform(3.5), 0.0);
    }

    #[test]
    fn test_transform_uses_frozen_stats() {
        let scaler = NumericScaler::fit(&[0.0, 10.0]);
        // Values far outside the training range still use training stats
        assert!((scaler.transform(105.0) - 20.0).abs() < 1e-5);
    }
}
