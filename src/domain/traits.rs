// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The pipeline is written against these traits only:
//
//   RecordSource    → where rows come from (tabular file, memory)
//   RegressionModel → fit / predict / save / load
//   ModelFactory    → builds an untrained RegressionModel from
//                     one hyperparameter combination
//
// The burn-backed implementations live in Layer 5 (ml).
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::{Path, PathBuf};

use crate::domain::hyperparams::Hyperparameters;
use crate::domain::record::RawRecord;
use crate::domain::sequence::EncodedSequence;
use crate::error::Result;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce (sequence, expression) rows.
pub trait RecordSource {
    fn load_records(&self) -> Result<Vec<RawRecord>>;
}

/// Rows already in memory
impl RecordSource for Vec<RawRecord> {
    fn load_records(&self) -> Result<Vec<RawRecord>> {
        Ok(self.clone())
    }
}

// ─── RegressionModel ──────────────────────────────────────────────────────────
/// A trainable sequence → scalar regressor.
///
/// Targets and predictions are in normalized units.
pub trait RegressionModel: Sized + Send {
    /// Train on `inputs` for the model's configured schedule.
    /// Calling `fit` again continues from the current weights.
    fn fit(&mut self, inputs: &[EncodedSequence], targets: &[f32]) -> Result<()>;

    /// One prediction per input, in input order
    fn predict(&self, inputs: &[EncodedSequence]) -> Result<Vec<f32>>;

    /// Persist under `stem` (the implementation picks extensions).
    /// Returns the path of the weights file.
    fn save(&self, stem: &Path) -> Result<PathBuf>;

    /// Rebuild an independent instance from files written by `save`
    fn load(stem: &Path) -> Result<Self>;

    /// Every file `save(stem)` writes
    fn artifact_paths(stem: &Path) -> Vec<PathBuf>;

    /// Input length L the model was built for
    fn sequence_length(&self) -> usize;

    fn hyperparameters(&self) -> Hyperparameters;
}

// ─── ModelFactory ─────────────────────────────────────────────────────────────
/// Builds fresh, untrained models. Building twice with the same
/// params and seed yields identical initial weights.
pub trait ModelFactory: Sync {
    type Model: RegressionModel;

    fn build(&self, params: &Hyperparameters, seed: u64) -> Result<Self::Model>;
}
