// Random search: evaluates `iterations` distinct grid points chosen
// with a seeded RNG. Chosen points are evaluated in grid order so
// the tie-break rule still means "first in the grid".

use rand::{rngs::StdRng, seq::index, SeedableRng};

use crate::domain::hyperparams::ParamGrid;
use crate::domain::sequence::EncodedSequence;
use crate::domain::traits::ModelFactory;
use crate::error::{DnaModelError, Result};
use crate::search::cross_validation::CrossValidator;
use crate::search::report::SearchOutcome;
use crate::search::{evaluate_candidates, SearchStrategy};

#[derive(Debug, Clone)]
pub struct RandomSearch {
    validator:  CrossValidator,
    jobs:       usize,
    iterations: usize,
    seed:       u64,
}

impl RandomSearch {
    pub fn new(validator: CrossValidator, jobs: usize, iterations: usize, seed: u64) -> Self {
        Self { validator, jobs, iterations, seed }
    }
}

impl<F: ModelFactory> SearchStrategy<F> for RandomSearch {
    fn name(&self) -> &'static str {
        "random"
    }

    fn search(
        &self,
        factory: &F,
        inputs:  &[EncodedSequence],
        targets: &[f32],
        grid:    &ParamGrid,
    ) -> Result<SearchOutcome> {
        if self.iterations == 0 {
            return Err(DnaModelError::InvalidConfig("random search needs at least one iteration".into()));
        }

        let combos = grid.combinations();
        let candidates = if self.iterations >= combos.len() {
            combos
        } else {
            let mut rng = StdRng::seed_from_u64(self.seed);
            let mut picked = index::sample(&mut rng, combos.len(), self.iterations).into_vec();
            picked.sort_unstable();
            picked.into_iter().map(|i| combos[i]).collect()
        };

        evaluate_candidates(&self.validator, self.jobs, factory, inputs, targets, candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{stub_inputs, StubFactory, STUB_LENGTH};

    fn grid() -> ParamGrid {
        ParamGrid::new(vec![0.001, 0.01, 0.1], vec![1, 2, 3, 4], vec![STUB_LENGTH]).unwrap()
    }

    #[test]
    fn test_samples_requested_count() {
        let (inputs, targets) = stub_inputs(20);
        let search = RandomSearch::new(CrossValidator::new(2, 0), 1, 5, 9);
        let outcome = search.search(&StubFactory, &inputs, &targets, &grid()).unwrap();
        assert_eq!(outcome.report.entries.len(), 5);
    }

    #[test]
    fn test_same_seed_same_candidates() {
        let (inputs, targets) = stub_inputs(20);
        let a = RandomSearch::new(CrossValidator::new(2, 0), 1, 4, 9)
            .search(&StubFactory, &inputs, &targets, &grid())
            .unwrap();
        let b = RandomSearch::new(CrossValidator::new(2, 0), 1, 4, 9)
            .search(&StubFactory, &inputs, &targets, &grid())
            .unwrap();
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_more_iterations_than_grid_uses_whole_grid() {
        let (inputs, targets) = stub_inputs(20);
        let search = RandomSearch::new(CrossValidator::new(2, 0), 1, 100, 9);
        let outcome = search.search(&StubFactory, &inputs, &targets, &grid()).unwrap();
        assert_eq!(outcome.report.entries.len(), 12);
        assert_eq!(outcome.best_params.hidden_units, 1);
    }
}
