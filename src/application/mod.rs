// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Workflow coordination only. No tensor code and no printing:
// the CLI formats whatever these return.
//
//   pipeline.rs          TrainingPipeline state machine
//   train_use_case.rs    pipeline + report + persistence + verification
//   predict_use_case.rs  reload an artifact and score new sequences

/// Stage-by-stage training run, generic over the model factory
pub mod pipeline;

/// The `train` workflow
pub mod train_use_case;

/// The `predict` workflow
pub mod predict_use_case;
