// ============================================================
// Layer 4 - Record Preprocessor
// ============================================================
// Two pipeline stages live here:
//
//   clean()  (CLEANING) → drop rows whose expression is missing,
//                         NaN or infinite; trim sequence text
//   encode() (ENCODING) → fix L from the first row, require every
//                         row to have length L, one-hot encode

use crate::domain::record::{CleanRecord, EncodedDataset, RawRecord};
use crate::domain::sequence::SequenceCodec;
use crate::error::{DnaModelError, Result};

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, records: Vec<RawRecord>) -> Result<Vec<CleanRecord>> {
        let total = records.len();
        let mut cleaned = Vec::with_capacity(total);

        for record in records {
            let expression = match record.expression {
                Some(v) if v.is_finite() => v,
                _ => continue,
            };
            let sequence = record.sequence.as_deref().map(str::trim).unwrap_or_default();
            if sequence.is_empty() {
                return Err(DnaModelError::DataLoad(format!("row {} has no sequence", record.row)));
            }
            cleaned.push(CleanRecord {
                row: record.row,
                sequence: sequence.to_string(),
                expression,
            });
        }

        if cleaned.is_empty() {
            return Err(DnaModelError::EmptyDataset);
        }

        tracing::info!(
            "Cleaning kept {} of {} rows ({} with non-finite expression dropped)",
            cleaned.len(),
            total,
            total - cleaned.len()
        );
        Ok(cleaned)
    }

    pub fn encode(&self, records: &[CleanRecord]) -> Result<EncodedDataset> {
        let first = records.first().ok_or(DnaModelError::EmptyDataset)?;
        let sequence_length = first.sequence.chars().count();

        let mut inputs  = Vec::with_capacity(records.len());
        let mut targets = Vec::with_capacity(records.len());

        for record in records {
            let found = record.sequence.chars().count();
            if found != sequence_length {
                return Err(DnaModelError::LengthMismatch {
                    row: record.row,
                    expected: sequence_length,
                    found,
                });
            }
            let encoded = SequenceCodec::encode_str(&record.sequence).map_err(|e| {
                tracing::error!("Row {} cannot be encoded: {}", record.row, e);
                e
            })?;
            inputs.push(encoded);
            targets.push(record.expression);
        }

        tracing::info!("Encoded {} sequences of length {}", inputs.len(), sequence_length);
        Ok(EncodedDataset { inputs, targets, sequence_length })
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
