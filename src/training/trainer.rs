//! Maximum-likelihood fit for the linear classifier
//!
//! Full-batch gradient descent on binary cross-entropy with a bounded
//! iteration budget. Weights start at zero, so the fit is deterministic for
//! a fixed train partition.

use burn::nn::{Initializer, Linear, LinearConfig};
use burn::optim::{GradientsParams, Optimizer, SgdConfig};
use burn::tensor::activation::sigmoid;
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{ElementConversion, Tensor};

use crate::model::ChurnClassifier;
use crate::training::metrics::TrainingHistory;
use crate::{ChurnError, Result};

/// Trainer for the logistic classifier
pub struct LogisticTrainer<B: AutodiffBackend> {
    device: B::Device,
    learning_rate: f64,
    max_epochs: usize,
    tolerance: f64,
}

impl<B: AutodiffBackend> LogisticTrainer<B> {
    pub fn new(device: B::Device, learning_rate: f64, max_epochs: usize, tolerance: f64) -> Self {
        LogisticTrainer {
            device,
            learning_rate,
            max_epochs,
            tolerance,
        }
    }

    /// Fit coefficients on transformed row vectors and 0/1 labels.
    ///
    /// Runs until the loss delta drops below the tolerance or the iteration
    /// budget is exhausted; in the latter case the best iterate reached is
    /// returned and a warning is logged.
    pub fn fit(
        &self,
        rows: &[Vec<f32>],
        labels: &[u8],
    ) -> Result<(ChurnClassifier, TrainingHistory)> {
        let n = rows.len();
        if n == 0 || labels.len() != n {
            return Err(ChurnError::EmptyDataset);
        }
        let dim = rows[0].len();

        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        let targets: Vec<f32> = labels.iter().map(|&l| l as f32).collect();

        let x = Tensor::<B, 1>::from_floats(flat.as_slice(), &self.device).reshape([n, dim]);
        let y = Tensor::<B, 1>::from_floats(targets.as_slice(), &self.device).reshape([n, 1]);

        let mut model: Linear<B> = LinearConfig::new(dim, 1)
            .with_initializer(Initializer::Zeros)
            .init(&self.device);
        let mut optimizer = SgdConfig::new().init();

        let mut history = TrainingHistory::new();
        let mut best: Option<(Vec<f32>, f32)> = None;
        let mut prev_loss = f32::INFINITY;

        log::info!(
            "Fitting logistic classifier: {} rows, {} features, budget {} iterations",
            n,
            dim,
            self.max_epochs
        );

        for epoch in 0..self.max_epochs {
            let probs = sigmoid(model.forward(x.clone()));
            let loss = binary_cross_entropy(probs, y.clone());
            let loss_val: f32 = loss.clone().into_scalar().elem();

            if history.record_epoch(loss_val) {
                best = Some(extract_coefficients(&model)?);
            }

            if (prev_loss - loss_val).abs() < self.tolerance as f32 {
                history.converged = true;
                log::debug!("Converged at iteration {} (loss {:.6})", epoch, loss_val);
                break;
            }
            prev_loss = loss_val;

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optimizer.step(self.learning_rate, model, grads);

            if epoch % 100 == 0 {
                log::debug!(
                    "Iteration {}/{}: loss={:.6}",
                    epoch,
                    self.max_epochs,
                    loss_val
                );
            }
        }

        if !history.converged {
            log::warn!(
                "Optimizer did not converge within {} iterations; using best iterate \
                 (loss {:.6} at iteration {})",
                self.max_epochs,
                history.best_loss,
                history.best_epoch
            );
        }

        let (weights, intercept) =
            best.ok_or_else(|| ChurnError::Training("no iterate produced a finite loss".into()))?;
        Ok((ChurnClassifier::new(weights, intercept), history))
    }
}

/// Binary cross-entropy over probabilities, clamped for numeric stability
fn binary_cross_entropy<B: Backend>(probs: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
    let eps = 1e-7;
    let clamped = probs.clamp(eps, 1.0 - eps);
    let loss = targets.clone().neg() * clamped.clone().log()
        - (targets.neg() + 1.0) * (clamped.neg() + 1.0).log();
    loss.mean()
}

/// Pull the fitted weights and intercept out of the linear layer
fn extract_coefficients<B: Backend>(model: &Linear<B>) -> Result<(Vec<f32>, f32)> {
    let weights = model
        .weight
        .val()
        .to_data()
        .to_vec::<f32>()
        .map_err(|e| ChurnError::Training(format!("failed to read weights: {:?}", e)))?;

    let intercept = match &model.bias {
        Some(bias) => bias
            .val()
            .to_data()
            .to_vec::<f32>()
            .map_err(|e| ChurnError::Training(format!("failed to read intercept: {:?}", e)))?[0],
        None => 0.0,
    };

    Ok((weights, intercept))
}
