//! Labeled dataset and train/test partitioning

use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::CustomerRecord;

/// Labeled dataset of customer records (label 1 = churned)
#[derive(Debug, Clone)]
pub struct ChurnDataset {
    pub records: Vec<CustomerRecord>,
    pub labels: Vec<u8>,
}

impl ChurnDataset {
    pub fn new(records: Vec<CustomerRecord>, labels: Vec<u8>) -> Self {
        debug_assert_eq!(records.len(), labels.len());
        ChurnDataset { records, labels }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fraction of churned customers in the dataset
    pub fn churn_rate(&self) -> f32 {
        if self.labels.is_empty() {
            return 0.0;
        }
        let positives = self.labels.iter().filter(|&&l| l == 1).count();
        positives as f32 / self.labels.len() as f32
    }

    /// Split into train/test partitions, preserving the churn ratio.
    ///
    /// Rows of each class are shuffled with a seeded RNG and split at
    /// `train_ratio`, so both partitions keep the overall class balance and
    /// the same seed reproduces the same partitions.
    pub fn stratified_split(self, train_ratio: f32, seed: u64) -> (Self, Self) {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

        let mut train_idx = Vec::new();
        let mut test_idx = Vec::new();

        for class in [0u8, 1u8] {
            let mut indices: Vec<usize> = (0..self.labels.len())
                .filter(|&i| self.labels[i] == class)
                .collect();
            indices.shuffle(&mut rng);

            let n_train = (indices.len() as f32 * train_ratio) as usize;
            train_idx.extend_from_slice(&indices[..n_train]);
            test_idx.extend_from_slice(&indices[n_train..]);
        }

        log::info!(
            "Split {} rows: train={}, test={}",
            self.len(),
            train_idx.len(),
            test_idx.len()
        );

        let take = |idx: &[usize]| ChurnDataset {
            records: idx.iter().map(|&i| self.records[i].clone()).collect(),
            labels: idx.iter().map(|&i| self.labels[i]).collect(),
        };

        (take(&train_idx), take(&test_idx))
    }
}
