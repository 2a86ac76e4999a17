// ============================================================
// Layer 5 - CNN Regressor and Factory
// ============================================================
// Binds the burn model to the domain traits:
//
//   CnnFactory   implements ModelFactory    (build)
//   CnnRegressor implements RegressionModel (fit, predict, save, load)
//
// Training runs on Autodiff<NdArray>; prediction uses model.valid()
// so dropout is off and no autodiff graph is recorded.
//
// Files written by save(stem):
//   <stem>.mpk.gz       weights, full precision MessagePack + gzip
//   <stem>.config.json  architecture, hyperparameters, schedule
//
// Full precision matters: a reloaded model has to reproduce the
// in-memory predictions bit for bit.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    module::AutodiffModule,
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkGzFileRecorder, Recorder},
};
use serde::{Deserialize, Serialize};

use crate::data::{batcher::DnaBatcher, dataset::DnaDataset};
use crate::domain::hyperparams::Hyperparameters;
use crate::domain::sequence::EncodedSequence;
use crate::domain::traits::{ModelFactory, RegressionModel};
use crate::error::{DnaModelError, Result};
use crate::ml::model::{DnaCnn, DnaCnnConfig, DnaCnnRecord};
use crate::ml::trainer::{train_model, FitSchedule};

pub type TrainBackend = Autodiff<NdArray>;
pub type InferBackend = NdArray;

type WeightsRecorder = NamedMpkGzFileRecorder<FullPrecisionSettings>;

// The NdArray RNG is process-global; seeding and drawing the initial
// weights must not interleave with another thread's build.
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Everything needed to rebuild the module before loading weights
#[derive(Debug, Serialize, Deserialize)]
struct CnnArtifact {
    params:   Hyperparameters,
    schedule: FitSchedule,
    seed:     u64,
    model:    DnaCnnConfig,
}

pub fn weights_path(stem: &Path) -> PathBuf {
    stem.with_extension("mpk.gz")
}

pub fn architecture_path(stem: &Path) -> PathBuf {
    stem.with_extension("config.json")
}

// ─── CnnFactory ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct CnnFactory {
    schedule: FitSchedule,
    device:   NdArrayDevice,
}

impl CnnFactory {
    pub fn new(schedule: FitSchedule) -> Self {
        Self { schedule, device: NdArrayDevice::default() }
    }

    pub fn schedule(&self) -> &FitSchedule {
        &self.schedule
    }
}

impl ModelFactory for CnnFactory {
    type Model = CnnRegressor;

    fn build(&self, params: &Hyperparameters, seed: u64) -> Result<CnnRegressor> {
        self.schedule.validate()?;
        if params.hidden_units == 0 || params.sequence_length == 0 {
            return Err(DnaModelError::InvalidConfig(format!(
                "cannot build a model from {params}"
            )));
        }
        if !(params.learning_rate.is_finite() && params.learning_rate > 0.0) {
            return Err(DnaModelError::InvalidConfig(format!(
                "learning rate must be positive in {params}"
            )));
        }

        let config = DnaCnnConfig::new(params.sequence_length, params.hidden_units);
        let model = {
            let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            TrainBackend::seed(seed);
            config.init::<TrainBackend>(&self.device)
        };

        Ok(CnnRegressor {
            params:   *params,
            schedule: self.schedule,
            seed,
            config,
            model,
            device:   self.device.clone(),
        })
    }
}

// ─── CnnRegressor ─────────────────────────────────────────────────────────────
pub struct CnnRegressor {
    params:   Hyperparameters,
    schedule: FitSchedule,
    seed:     u64,
    config:   DnaCnnConfig,
    model:    DnaCnn<TrainBackend>,
    device:   NdArrayDevice,
}

impl CnnRegressor {
    pub fn schedule(&self) -> &FitSchedule {
        &self.schedule
    }

    fn check_lengths(&self, inputs: &[EncodedSequence]) -> Result<()> {
        let expected = self.params.sequence_length;
        match inputs.iter().position(|s| s.len() != expected) {
            Some(row) => Err(DnaModelError::LengthMismatch {
                row: row + 1,
                expected,
                found: inputs[row].len(),
            }),
            None => Ok(()),
        }
    }
}

impl RegressionModel for CnnRegressor {
    fn fit(&mut self, inputs: &[EncodedSequence], targets: &[f32]) -> Result<()> {
        if inputs.len() != targets.len() {
            return Err(DnaModelError::InvalidConfig(format!(
                "{} inputs but {} targets",
                inputs.len(),
                targets.len()
            )));
        }
        self.check_lengths(inputs)?;

        let dataset = DnaDataset::from_pairs(inputs, targets);
        self.model = train_model(
            self.model.clone(),
            dataset,
            self.params.learning_rate,
            &self.schedule,
            self.seed,
            &self.device,
        )?;
        Ok(())
    }

    fn predict(&self, inputs: &[EncodedSequence]) -> Result<Vec<f32>> {
        self.check_lengths(inputs)?;

        let model   = self.model.valid();
        let batcher = DnaBatcher::<InferBackend>::new(self.device.clone());
        let mut out = Vec::with_capacity(inputs.len());

        for chunk in inputs.chunks(self.schedule.batch_size.max(1)) {
            let values = model
                .forward(batcher.inputs(chunk))
                .into_data()
                .to_vec::<f32>()
                .map_err(|e| DnaModelError::Backend(format!("{e:?}")))?;
            out.extend(values);
        }

        if let Some(bad) = out.iter().find(|v| !v.is_finite()) {
            return Err(DnaModelError::TrainingDiverged(format!("model predicted {bad}")));
        }
        Ok(out)
    }

    fn save(&self, stem: &Path) -> Result<PathBuf> {
        let artifact = CnnArtifact {
            params:   self.params,
            schedule: self.schedule,
            seed:     self.seed,
            model:    self.config.clone(),
        };
        let arch_path = architecture_path(stem);
        let json = serde_json::to_string_pretty(&artifact)
            .map_err(|e| DnaModelError::Persistence(e.to_string()))?;
        fs::write(&arch_path, json).map_err(|e| {
            DnaModelError::Persistence(format!("Cannot write '{}': {e}", arch_path.display()))
        })?;

        WeightsRecorder::new()
            .record(self.model.clone().into_record(), stem.to_path_buf())
            .map_err(|e| {
                DnaModelError::Persistence(format!(
                    "Failed to save weights to '{}': {e:?}",
                    weights_path(stem).display()
                ))
            })?;

        tracing::debug!("Saved model weights to '{}'", weights_path(stem).display());
        Ok(weights_path(stem))
    }

    fn load(stem: &Path) -> Result<Self> {
        let arch_path = architecture_path(stem);
        let json = fs::read_to_string(&arch_path).map_err(|e| {
            DnaModelError::Persistence(format!("Cannot read '{}': {e}", arch_path.display()))
        })?;
        let artifact: CnnArtifact = serde_json::from_str(&json)
            .map_err(|e| DnaModelError::Persistence(format!("'{}': {e}", arch_path.display())))?;

        let device = NdArrayDevice::default();
        let record: DnaCnnRecord<TrainBackend> = WeightsRecorder::new()
            .load(stem.to_path_buf(), &device)
            .map_err(|e| {
                DnaModelError::Persistence(format!(
                    "Cannot load weights '{}': {e:?}",
                    weights_path(stem).display()
                ))
            })?;
        let model = artifact.model.init::<TrainBackend>(&device).load_record(record);

        Ok(Self {
            params:   artifact.params,
            schedule: artifact.schedule,
            seed:     artifact.seed,
            config:   artifact.model,
            model,
            device,
        })
    }

    fn artifact_paths(stem: &Path) -> Vec<PathBuf> {
        vec![weights_path(stem), architecture_path(stem)]
    }

    fn sequence_length(&self) -> usize {
        self.params.sequence_length
    }

    fn hyperparameters(&self) -> Hyperparameters {
        self.params
    }
}
