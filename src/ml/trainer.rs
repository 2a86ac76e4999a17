// ============================================================
// Layer 5 - Training Loop
// ============================================================
// Mini-batch Adam on mean squared error.
//
//   for epoch in 1..=epochs
//       for batch in shuffled loader
//           forward → MSE → backward → Adam step
//
// Adam betas are fixed at (0.9, 0.999), epsilon 1e-8; only the
// learning rate comes from the hyperparameters.
//
// A non-finite batch loss aborts the fit with TrainingDiverged so
// the search can skip the combination.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    data::dataloader::DataLoaderBuilder,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};

use crate::data::{batcher::DnaBatcher, dataset::DnaDataset};
use crate::error::{DnaModelError, Result};
use crate::ml::model::DnaCnn;

/// Passes over the data and mini-batch size for every fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitSchedule {
    pub epochs:     usize,
    pub batch_size: usize,
}

impl Default for FitSchedule {
    fn default() -> Self {
        Self { epochs: 6, batch_size: 128 }
    }
}

impl FitSchedule {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 || self.batch_size == 0 {
            return Err(DnaModelError::InvalidConfig(
                "epochs and batch size must both be at least 1".into(),
            ));
        }
        Ok(())
    }
}

pub fn train_model<B: AutodiffBackend>(
    mut model:     DnaCnn<B>,
    dataset:       DnaDataset,
    learning_rate: f64,
    schedule:      &FitSchedule,
    seed:          u64,
    device:        &B::Device,
) -> Result<DnaCnn<B>> {
    schedule.validate()?;
    if dataset.sample_count() == 0 {
        return Err(DnaModelError::InvalidConfig("cannot fit on an empty dataset".into()));
    }

    let optim_cfg = AdamConfig::new()
        .with_beta_1(0.9)
        .with_beta_2(0.999)
        .with_epsilon(1e-8);
    let mut optim = optim_cfg.init::<B, DnaCnn<B>>();

    // Single-threaded loader: batch order depends only on the seed
    let batcher = DnaBatcher::<B>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(schedule.batch_size)
        .shuffle(seed)
        .build(dataset);

    for epoch in 1..=schedule.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in loader.iter() {
            let out = model.forward_regression(batch.inputs, batch.targets);

            let loss_val: f64 = out.loss.clone().into_scalar().elem::<f64>();
            if !loss_val.is_finite() {
                return Err(DnaModelError::TrainingDiverged(format!(
                    "loss became {loss_val} in epoch {epoch} (lr={learning_rate})"
                )));
            }
            loss_sum += loss_val;
            batches  += 1;

            let grads = out.loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(learning_rate, model, grads);
        }

        tracing::debug!(
            "Epoch {:>3}/{} | train_mse={:.5}",
            epoch,
            schedule.epochs,
            loss_sum / batches.max(1) as f64,
        );
    }

    Ok(model)
}
