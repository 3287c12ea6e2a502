//! Evaluation metrics and fit-progress tracking

use std::fmt;

/// Binary classification metrics accumulated over a test partition
#[derive(Debug, Clone, Copy, Default)]
pub struct Metrics {
    pub true_pos: usize,
    pub false_pos: usize,
    pub true_neg: usize,
    pub false_neg: usize,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one prediction against its actual label
    pub fn record(&mut self, predicted_churn: bool, actual_churn: bool) {
        match (predicted_churn, actual_churn) {
            (true, true) => self.true_pos += 1,
            (true, false) => self.false_pos += 1,
            (false, false) => self.true_neg += 1,
            (false, true) => self.false_neg += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_pos + self.false_pos + self.true_neg + self.false_neg
    }

    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        (self.true_pos + self.true_neg) as f64 / self.total() as f64
    }

    /// Precision for one class (churn = true for Yes, false for No)
    pub fn precision(&self, churn: bool) -> f64 {
        let (tp, fp) = if churn {
            (self.true_pos, self.false_pos)
        } else {
            (self.true_neg, self.false_neg)
        };
        ratio(tp, tp + fp)
    }

    /// Recall for one class
    pub fn recall(&self, churn: bool) -> f64 {
        let (tp, missed) = if churn {
            (self.true_pos, self.false_neg)
        } else {
            (self.true_neg, self.false_pos)
        };
        ratio(tp, tp + missed)
    }

    /// F1 score for one class
    pub fn f1(&self, churn: bool) -> f64 {
        let p = self.precision(churn);
        let r = self.recall(churn);
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// Number of actual members of one class
    pub fn support(&self, churn: bool) -> usize {
        if churn {
            self.true_pos + self.false_neg
        } else {
            self.true_neg + self.false_pos
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy: {:.4}", self.accuracy())?;
        writeln!(f, "Confusion matrix (rows = actual, cols = predicted):")?;
        writeln!(f, "           No    Yes")?;
        writeln!(f, "  No  {:>6} {:>6}", self.true_neg, self.false_pos)?;
        writeln!(f, "  Yes {:>6} {:>6}", self.false_neg, self.true_pos)?;
        writeln!(f, "       precision  recall  f1-score  support")?;
        for (name, churn) in [("No", false), ("Yes", true)] {
            writeln!(
                f,
                "  {:<4} {:>9.2} {:>7.2} {:>9.2} {:>8}",
                name,
                self.precision(churn),
                self.recall(churn),
                self.f1(churn),
                self.support(churn)
            )?;
        }
        Ok(())
    }
}

/// Loss trajectory of a single fit
#[derive(Debug, Clone, Default)]
pub struct TrainingHistory {
    pub losses: Vec<f32>,
    pub best_loss: f32,
    pub best_epoch: usize,
    pub converged: bool,
}

impl TrainingHistory {
    pub fn new() -> Self {
        TrainingHistory {
            best_loss: f32::INFINITY,
            ..Default::default()
        }
    }

    /// Record the loss for an epoch; returns true if it is a new best
    pub fn record_epoch(&mut self, loss: f32) -> bool {
        let epoch = self.losses.len();
        self.losses.push(loss);
        if loss < self.best_loss {
            self.best_loss = loss;
            self.best_epoch = epoch;
            true
        } else {
            false
        }
    }

    pub fn epochs(&self) -> usize {
        self.losses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Metrics {
        let mut m = Metrics::new();
        // 6 actual Yes (4 caught), 14 actual No (12 caught)
        for _ in 0..4 {
            m.record(true, true);
        }
        for _ in 0..2 {
            m.record(false, true);
        }
        for _ in 0..12 {
            m.record(false, false);
        }
        for _ in 0..2 {
            m.record(true, false);
        }
        m
    }

    #[test]
    fn test_accuracy_and_supports() {
        let m = sample();
        assert_eq!(m.total(), 20);
        assert!((m.accuracy() - 0.8).abs() < 1e-12);
        assert_eq!(m.support(true), 6);
        assert_eq!(m.support(false), 14);
    }

    #[test]
    fn test_per_class_precision_recall() {
        let m = sample();
        assert!((m.precision(true) - 4.0 / 6.0).abs() < 1e-12);
        assert!((m.recall(true) - 4.0 / 6.0).abs() < 1e-12);
        assert!((m.precision(false) - 12.0 / 14.0).abs() < 1e-12);
        assert!((m.recall(false) - 12.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_metrics_do_not_divide_by_zero() {
        let m = Metrics::new();
        assert_eq!(m.accuracy(), 0.0);
        assert_eq!(m.precision(true), 0.0);
        assert_eq!(m.f1(true), 0.0);
    }

    #[test]
    fn test_history_tracks_best_epoch() {
        let mut h = TrainingHistory::new();
        assert!(h.record_epoch(0.9));
        assert!(h.record_epoch(0.5));
        assert!(!h.record_epoch(0.7));
        assert_eq!(h.best_epoch, 1);
        assert!((h.best_loss - 0.5).abs() < 1e-12);
    }
}
