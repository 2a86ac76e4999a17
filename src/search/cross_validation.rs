// ============================================================
// K-Fold Cross-Validation
// ============================================================
// For one combination: build a fresh model per fold, fit on the
// other k-1 folds, score r² on the held-out fold.
//
// Fold i builds its model with seed + i, so every combination is
// compared on identical initialisation seeds.

use crate::data::splitter::{k_fold, select};
use crate::domain::hyperparams::Hyperparameters;
use crate::domain::sequence::EncodedSequence;
use crate::domain::traits::{ModelFactory, RegressionModel};
use crate::error::Result;
use crate::search::scoring::r2_score;

/// sklearn's default fold count
pub const DEFAULT_FOLDS: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct CrossValidator {
    folds: usize,
    seed:  u64,
}

impl CrossValidator {
    pub fn new(folds: usize, seed: u64) -> Self {
        Self { folds, seed }
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    /// Fails if `n` samples cannot be cut into the configured folds
    pub fn check(&self, n: usize) -> Result<()> {
        k_fold(n, self.folds).map(|_| ())
    }

    /// One r² per fold, in fold order
    pub fn evaluate<F: ModelFactory>(
        &self,
        factory: &F,
        params:  &Hyperparameters,
        inputs:  &[EncodedSequence],
        targets: &[f32],
    ) -> Result<Vec<f64>> {
        let folds = k_fold(inputs.len(), self.folds)?;
        let mut scores = Vec::with_capacity(folds.len());

        for (i, fold) in folds.iter().enumerate() {
            let mut model = factory.build(params, self.seed.wrapping_add(i as u64))?;
            model.fit(&select(inputs, &fold.train), &select(targets, &fold.train))?;

            let predictions = model.predict(&select(inputs, &fold.validation))?;
            let score = r2_score(&select(targets, &fold.validation), &predictions);
            tracing::debug!("  fold {}/{} r2={:.6} for {}", i + 1, folds.len(), score, params);
            scores.push(score);
        }
        Ok(scores)
    }
}

impl Default for CrossValidator {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDS, 42)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{stub_inputs, StubFactory};

    #[test]
    fn test_one_score_per_fold() {
        let (inputs, targets) = stub_inputs(20);
        let cv = CrossValidator::new(4, 1);
        let scores = cv.evaluate(&StubFactory, &StubFactory::params(0.01, 1), &inputs, &targets).unwrap();
        assert_eq!(scores.len(), 4);
        // hidden_units = 1 makes the stub predict the targets exactly
        assert!(scores.iter().all(|s| (s - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_check_rejects_tiny_training_set() {
        let cv = CrossValidator::new(5, 1);
        assert!(cv.check(3).is_err());
        assert!(cv.check(5).is_ok());
    }
}
