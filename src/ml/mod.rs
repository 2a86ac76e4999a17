// ============================================================
// Layer 5 - ML / Model Layer (Burn)
// ============================================================
// The only layer (besides the data batcher) that touches burn.
//
//   model.rs     - two-stage Conv1d regressor (DnaCnn)
//   trainer.rs   - Adam / MSE mini-batch loop
//   regressor.rs - CnnRegressor + CnnFactory: the domain traits
//                  implemented on Autodiff<NdArray>
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// Convolutional regression architecture
pub mod model;

/// Mini-batch training loop
pub mod trainer;

/// RegressionModel / ModelFactory implementations
pub mod regressor;
