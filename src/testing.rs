// Test doubles shared by unit tests: a RegressionModel whose quality
// is controlled by its hyperparameters, so search logic can be
// checked without training a network.
//
//   target      = number of G bases
//   prediction  = #G + (hidden_units - 1) * #A
//   lr > 1.0    → fit fails with TrainingDiverged
//
// `corrupt_on_save` makes save() record hidden_units + 1, so the
// reloaded copy disagrees with the in-memory one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::hyperparams::Hyperparameters;
use crate::domain::sequence::{Base, EncodedSequence, SequenceCodec};
use crate::domain::traits::{ModelFactory, RegressionModel};
use crate::error::{DnaModelError, Result};

pub const STUB_LENGTH: usize = 6;

fn count(seq: &EncodedSequence, base: Base) -> f32 {
    seq.rows().iter().filter(|row| row[base.index()] == 1.0).count() as f32
}

/// Row i has i % 7 leading G bases; the rest cycle through A, C, T.
/// Any 5 consecutive rows have distinct G counts.
pub fn stub_inputs(n: usize) -> (Vec<EncodedSequence>, Vec<f32>) {
    let fill = [Base::A, Base::C, Base::T];
    let inputs: Vec<EncodedSequence> = (0..n)
        .map(|i| {
            let g = i % (STUB_LENGTH + 1);
            let raw: String = (0..STUB_LENGTH)
                .map(|j| if j < g { Base::G } else { fill[(i / 7 + j - g) % 3] })
                .map(Base::as_char)
                .collect();
            SequenceCodec::encode_str(&raw).unwrap()
        })
        .collect();
    let targets = inputs.iter().map(|s| count(s, Base::G)).collect();
    (inputs, targets)
}

#[derive(Debug)]
pub struct StubModel {
    params:              Hyperparameters,
    pub corrupt_on_save: bool,
}

impl RegressionModel for StubModel {
    fn fit(&mut self, _inputs: &[EncodedSequence], _targets: &[f32]) -> Result<()> {
        if self.params.learning_rate > 1.0 {
            return Err(DnaModelError::TrainingDiverged("stub diverged".into()));
        }
        Ok(())
    }

    fn predict(&self, inputs: &[EncodedSequence]) -> Result<Vec<f32>> {
        let weight = self.params.hidden_units as f32 - 1.0;
        Ok(inputs
            .iter()
            .map(|s| count(s, Base::G) + weight * count(s, Base::A))
            .collect())
    }

    fn save(&self, stem: &Path) -> Result<PathBuf> {
        let path = stem.with_extension("stub.json");
        let mut params = self.params;
        if self.corrupt_on_save {
            params.hidden_units += 1;
        }
        let json = serde_json::to_string(&params).unwrap();
        fs::write(&path, json).map_err(|e| DnaModelError::Persistence(e.to_string()))?;
        Ok(path)
    }

    fn load(stem: &Path) -> Result<Self> {
        let json = fs::read_to_string(stem.with_extension("stub.json"))
            .map_err(|e| DnaModelError::Persistence(e.to_string()))?;
        Ok(Self { params: serde_json::from_str(&json).unwrap(), corrupt_on_save: false })
    }

    fn artifact_paths(stem: &Path) -> Vec<PathBuf> {
        vec![stem.with_extension("stub.json")]
    }

    fn sequence_length(&self) -> usize {
        self.params.sequence_length
    }

    fn hyperparameters(&self) -> Hyperparameters {
        self.params
    }
}

#[derive(Debug, Default)]
pub struct StubFactory;

impl StubFactory {
    pub fn params(learning_rate: f64, hidden_units: usize) -> Hyperparameters {
        Hyperparameters { learning_rate, hidden_units, sequence_length: STUB_LENGTH }
    }
}

impl ModelFactory for StubFactory {
    type Model = StubModel;

    fn build(&self, params: &Hyperparameters, _seed: u64) -> Result<StubModel> {
        Ok(StubModel { params: *params, corrupt_on_save: false })
    }
}
