// ============================================================
// Layer 6 - Round-Trip Verification
// ============================================================
// Reloads a saved model and checks it against the in-memory one
// on four homopolymer probes (all A, all C, all G, all T) of the
// model's sequence length. Predictions must match exactly; any
// difference is a serialization fidelity bug.

use std::path::Path;

use crate::domain::sequence::{Base, EncodedSequence, Sequence, SequenceCodec};
use crate::domain::traits::RegressionModel;
use crate::error::{DnaModelError, Result};

pub fn probe_sequences(sequence_length: usize) -> Vec<EncodedSequence> {
    Base::ALL
        .iter()
        .map(|&base| SequenceCodec::encode(&Sequence::homopolymer(base, sequence_length)))
        .collect()
}

/// Ok(true) on an exact match, PersistenceMismatch otherwise.
pub fn verify<M: RegressionModel>(model: &M, stem: &Path) -> Result<bool> {
    let reloaded = M::load(stem)?;
    if reloaded.sequence_length() != model.sequence_length() {
        return Err(DnaModelError::Persistence(format!(
            "reloaded model expects length {}, in-memory model {}",
            reloaded.sequence_length(),
            model.sequence_length()
        )));
    }

    let probes   = probe_sequences(model.sequence_length());
    let expected = model.predict(&probes)?;
    let found    = reloaded.predict(&probes)?;

    tracing::info!("In-memory predictions: {:?}", expected);
    tracing::info!("Reloaded predictions:  {:?}", found);

    for (index, (&e, &f)) in expected.iter().zip(&found).enumerate() {
        if e != f {
            return Err(DnaModelError::PersistenceMismatch { index, expected: e, found: f });
        }
    }
    if expected.len() != found.len() {
        return Err(DnaModelError::Persistence(format!(
            "reloaded model returned {} predictions for {} probes",
            found.len(),
            expected.len()
        )));
    }
    Ok(true)
}
