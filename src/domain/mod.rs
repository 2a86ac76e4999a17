// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust types and traits. No burn, no polars, no file I/O.

/// Bases, sequences and the one-hot codec
pub mod sequence;

/// Raw, cleaned and encoded dataset rows
pub mod record;

/// Hyperparameter combinations and the search grid
pub mod hyperparams;

/// RecordSource, RegressionModel and ModelFactory
pub mod traits;
