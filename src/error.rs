// ============================================================
// Error Taxonomy
// ============================================================
// Every library-level failure is one of these variants.
// The CLI and use-case layers wrap them in anyhow with context.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DnaModelError {
    #[error("Failed to load data: {0}")]
    DataLoad(String),

    #[error("Dataset is empty after cleaning")]
    EmptyDataset,

    #[error("Row {row}: sequence has length {found}, expected {expected}")]
    LengthMismatch { row: usize, expected: usize, found: usize },

    #[error("Invalid symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("Row {row} of the encoding is not a one-hot base vector")]
    InvalidEncoding { row: usize },

    #[error("All {attempted} hyperparameter combinations failed to fit")]
    SearchExhausted { attempted: usize },

    #[error("Training diverged: {0}")]
    TrainingDiverged(String),

    #[error("Tensor backend error: {0}")]
    Backend(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Reloaded model disagrees on probe {index}: in-memory {expected}, reloaded {found}")]
    PersistenceMismatch { index: usize, expected: f32, found: f32 },
}

pub type Result<T> = std::result::Result<T, DnaModelError>;

// ─── Pipeline stages ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Loading,
    Cleaning,
    Encoding,
    Splitting,
    Searching,
    Retraining,
    Evaluating,
    Done,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Loading    => "LOADING",
            PipelineStage::Cleaning   => "CLEANING",
            PipelineStage::Encoding   => "ENCODING",
            PipelineStage::Splitting  => "SPLITTING",
            PipelineStage::Searching  => "SEARCHING",
            PipelineStage::Retraining => "RETRAINING",
            PipelineStage::Evaluating => "EVALUATING",
            PipelineStage::Done       => "DONE",
            PipelineStage::Failed     => "FAILED",
        };
        f.write_str(name)
    }
}

/// A pipeline failure, tagged with the stage that produced it.
#[derive(Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct StageError {
    pub stage:  PipelineStage,
    #[source]
    pub source: DnaModelError,
}
