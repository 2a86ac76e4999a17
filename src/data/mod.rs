// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// From a table on disk to tensor batches:
//
//   CSV/TSV file
//       │
//       ▼
//   TableLoader       → RawRecord rows (sequence, expression)
//       │
//       ▼
//   Preprocessor      → drops non-finite rows, checks length L,
//       │               one-hot encodes
//       ▼
//   TargetScaler      → zero mean / unit variance targets
//       │
//       ▼
//   split_train_test  → seeded held-out split; k_fold for CV
//       │
//       ▼
//   DnaDataset        → Burn Dataset
//       │
//       ▼
//   DnaBatcher        → [N, L, 4] inputs, [N, 1] targets
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads sequence/expression rows with polars
pub mod loader;

/// Cleaning and encoding stages
pub mod preprocessor;

/// Target standardisation and its inverse
pub mod normalizer;

/// Seeded train/test split and k-fold indices
pub mod splitter;

/// Implements Burn's Dataset trait for encoded samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
