// ============================================================
// Layer 2 - PredictUseCase
// ============================================================
// Reloads a saved artifact and scores new sequences:
//
//   Step 1: Read the manifest (L, target scaler)   (Layer 6 - infra)
//   Step 2: Rebuild the CNN and load its weights   (Layer 5 - ml)
//   Step 3: Encode each sequence                   (Layer 3 - domain)
//   Step 4: Predict, then map back with the scaler (Layer 4 - data)

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::domain::sequence::SequenceCodec;
use crate::domain::traits::RegressionModel;
use crate::infra::checkpoint::{ModelManifest, ModelStore};
use crate::ml::regressor::CnnRegressor;

/// One scored sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub sequence:   String,
    /// Model output in normalized units
    pub normalized: f32,
    /// Model output in expression units
    pub expression: f64,
}

pub struct PredictUseCase {
    model:    CnnRegressor,
    manifest: ModelManifest,
}

impl PredictUseCase {
    /// `model_path` may be the stem or any of its files
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self> {
        let stem = ModelStore::stem_from(model_path.as_ref());
        let (model, manifest) = ModelStore::load::<CnnRegressor>(&stem)
            .with_context(|| format!("Cannot load model '{}'", stem.display()))?;

        tracing::info!(
            "Loaded model trained {} with {} (held-out r2 {:.4})",
            manifest.created,
            manifest.best_params,
            manifest.test_r2
        );
        Ok(Self { model, manifest })
    }

    pub fn manifest(&self) -> &ModelManifest {
        &self.manifest
    }

    pub fn predict(&self, sequences: &[String]) -> Result<Vec<Prediction>> {
        let expected = self.manifest.sequence_length;

        let mut encoded = Vec::with_capacity(sequences.len());
        for (i, raw) in sequences.iter().enumerate() {
            let text = raw.trim();
            let found = text.chars().count();
            if found != expected {
                bail!("Sequence {} has length {found}, the model expects {expected}", i + 1);
            }
            let seq = SequenceCodec::encode_str(text)
                .with_context(|| format!("Sequence {} cannot be encoded", i + 1))?;
            encoded.push(seq);
        }

        let outputs = self.model.predict(&encoded)?;
        Ok(sequences
            .iter()
            .zip(outputs)
            .map(|(raw, normalized)| Prediction {
                sequence:   raw.trim().to_string(),
                normalized,
                expression: self.manifest.scaler.denormalize(normalized as f64),
            })
            .collect())
    }
}
