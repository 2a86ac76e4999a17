// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// File-system concerns shared by the use cases:
//
//   checkpoint.rs    - ModelStore: dated artifact naming, manifest
//                      save/load next to the model files
//
//   verification.rs  - reload a saved model and compare its
//                      predictions with the in-memory one
//
//   metrics.rs       - search report CSV, one row per combination
//
// Reference: Rust Book §7 (Modules)

/// Dated model artifacts and manifest
pub mod checkpoint;

/// Save/reload prediction check
pub mod verification;

/// Search report CSV logger
pub mod metrics;
