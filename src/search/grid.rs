use crate::domain::hyperparams::ParamGrid;
use crate::domain::sequence::EncodedSequence;
use crate::domain::traits::ModelFactory;
use crate::error::Result;
use crate::search::cross_validation::CrossValidator;
use crate::search::report::SearchOutcome;
use crate::search::{evaluate_candidates, SearchStrategy};

/// Exhaustive search over the full Cartesian grid
#[derive(Debug, Clone)]
pub struct GridSearch {
    validator: CrossValidator,
    jobs:      usize,
}

impl GridSearch {
    pub fn new(validator: CrossValidator, jobs: usize) -> Self {
        Self { validator, jobs }
    }
}

impl<F: ModelFactory> SearchStrategy<F> for GridSearch {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn search(
        &self,
        factory: &F,
        inputs:  &[EncodedSequence],
        targets: &[f32],
        grid:    &ParamGrid,
    ) -> Result<SearchOutcome> {
        evaluate_candidates(&self.validator, self.jobs, factory, inputs, targets, grid.combinations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DnaModelError;
    use crate::testing::{stub_inputs, StubFactory, STUB_LENGTH};

    fn grid(learning_rates: Vec<f64>, hidden_units: Vec<usize>) -> ParamGrid {
        ParamGrid::new(learning_rates, hidden_units, vec![STUB_LENGTH]).unwrap()
    }

    #[test]
    fn test_picks_best_combination() {
        let (inputs, targets) = stub_inputs(30);
        let search = GridSearch::new(CrossValidator::new(3, 42), 1);
        let outcome = search
            .search(&StubFactory, &inputs, &targets, &grid(vec![0.01], vec![3, 1, 2]))
            .unwrap();
        assert_eq!(outcome.best_params.hidden_units, 1);
        assert!((outcome.best_score - 1.0).abs() < 1e-9);
        assert_eq!(outcome.report.entries.len(), 3);
        // report keeps grid order
        assert_eq!(outcome.report.entries[0].params.hidden_units, 3);
    }

    #[test]
    fn test_failed_combination_is_skipped() {
        let (inputs, targets) = stub_inputs(30);
        let search = GridSearch::new(CrossValidator::new(3, 42), 1);
        let outcome = search
            .search(&StubFactory, &inputs, &targets, &grid(vec![5.0, 0.01], vec![2]))
            .unwrap();
        assert_eq!(outcome.report.failed_count(), 1);
        assert_eq!(outcome.best_params.learning_rate, 0.01);
    }

    #[test]
    fn test_all_failed_is_exhausted() {
        let (inputs, targets) = stub_inputs(30);
        let search = GridSearch::new(CrossValidator::new(3, 42), 1);
        let err = search
            .search(&StubFactory, &inputs, &targets, &grid(vec![2.0, 3.0], vec![1]))
            .unwrap_err();
        assert!(matches!(err, DnaModelError::SearchExhausted { attempted: 2 }));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (inputs, targets) = stub_inputs(30);
        let g = grid(vec![0.01, 0.1], vec![1, 2, 3]);
        let seq = GridSearch::new(CrossValidator::new(3, 42), 1)
            .search(&StubFactory, &inputs, &targets, &g)
            .unwrap();
        let par = GridSearch::new(CrossValidator::new(3, 42), 3)
            .search(&StubFactory, &inputs, &targets, &g)
            .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_too_few_samples_for_folds() {
        let (inputs, targets) = stub_inputs(3);
        let search = GridSearch::new(CrossValidator::new(5, 42), 1);
        let err = search
            .search(&StubFactory, &inputs, &targets, &grid(vec![0.01], vec![1]))
            .unwrap_err();
        assert!(matches!(err, DnaModelError::InvalidConfig(_)));
    }
}
