// ============================================================
// Layer 3 - Expression Records
// ============================================================
// Rows move through three shapes on their way to the model:
//
//   RawRecord      → exactly what the table contained (may be null/NaN)
//   CleanRecord    → finite expression, trimmed sequence text
//   EncodedDataset → one-hot inputs + targets, all of length L

use serde::{Deserialize, Serialize};

use crate::domain::sequence::EncodedSequence;

/// One row as read from the input table.
/// `row` is the 1-based data row number (header excluded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub row:        usize,
    pub sequence:   Option<String>,
    pub expression: Option<f64>,
}

impl RawRecord {
    pub fn new(row: usize, sequence: Option<String>, expression: Option<f64>) -> Self {
        Self { row, sequence, expression }
    }
}

/// A row that survived cleaning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub row:        usize,
    pub sequence:   String,
    pub expression: f64,
}

/// Encoded inputs paired with raw (not yet normalized) targets
#[derive(Debug, Clone)]
pub struct EncodedDataset {
    pub inputs:          Vec<EncodedSequence>,
    pub targets:         Vec<f64>,
    pub sequence_length: usize,
}

impl EncodedDataset {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
