// ============================================================
// Hyperparameter Search
// ============================================================
// The pipeline depends only on SearchStrategy:
//
//   search(factory, inputs, targets, grid) → SearchOutcome
//
// Strategies decide WHICH combinations to try; every candidate is
// scored the same way (k-fold CV, mean/std of fold r²) and the
// winner is picked by SearchReport::best.
//
//   grid.rs    - every combination in the Cartesian product
//   random.rs  - a seeded sample of the grid
//
// A combination that fails to fit is recorded and skipped. Only
// when every combination fails is SearchExhausted returned.

use rayon::prelude::*;

use crate::domain::hyperparams::{Hyperparameters, ParamGrid};
use crate::domain::sequence::EncodedSequence;
use crate::domain::traits::ModelFactory;
use crate::error::{DnaModelError, Result};

/// r² and least-squares fit
pub mod scoring;

/// Per-combination k-fold evaluation
pub mod cross_validation;

/// Entries, selection rule, outcome
pub mod report;

/// Exhaustive grid search
pub mod grid;

/// Seeded random subset of the grid
pub mod random;

use cross_validation::CrossValidator;
use report::{EntryOutcome, SearchEntry, SearchOutcome, SearchReport};

pub trait SearchStrategy<F: ModelFactory> {
    fn name(&self) -> &'static str;

    fn search(
        &self,
        factory: &F,
        inputs:  &[EncodedSequence],
        targets: &[f32],
        grid:    &ParamGrid,
    ) -> Result<SearchOutcome>;
}

/// Score `candidates` (in order) and select the winner.
/// `jobs > 1` evaluates candidates on a dedicated rayon pool;
/// the report keeps candidate order either way.
pub(crate) fn evaluate_candidates<F: ModelFactory>(
    validator:  &CrossValidator,
    jobs:       usize,
    factory:    &F,
    inputs:     &[EncodedSequence],
    targets:    &[f32],
    candidates: Vec<Hyperparameters>,
) -> Result<SearchOutcome> {
    if inputs.len() != targets.len() {
        return Err(DnaModelError::InvalidConfig(format!(
            "{} inputs but {} targets",
            inputs.len(),
            targets.len()
        )));
    }
    validator.check(inputs.len())?;

    let attempted = candidates.len();
    tracing::info!(
        "Evaluating {} combination(s) with {}-fold cross-validation on {} samples",
        attempted,
        validator.folds(),
        inputs.len()
    );

    let evaluate = |params: Hyperparameters| -> SearchEntry {
        match validator.evaluate(factory, &params, inputs, targets) {
            Ok(scores) => SearchEntry::scored(params, scores),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", params, e);
                SearchEntry::failed(params, e.to_string())
            }
        }
    };

    let entries: Vec<SearchEntry> = if jobs <= 1 {
        candidates.into_iter().map(&evaluate).collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| DnaModelError::InvalidConfig(format!("cannot start {jobs} search threads: {e}")))?;
        pool.install(|| candidates.into_par_iter().map(&evaluate).collect())
    };

    for entry in &entries {
        match &entry.outcome {
            EntryOutcome::Scored { mean_score, std_score, .. } => {
                tracing::info!("{:.6} ({:.6}) with: {}", mean_score, std_score, entry.params);
            }
            EntryOutcome::Failed { reason } => {
                tracing::info!("failed ({}) with: {}", reason, entry.params);
            }
        }
    }

    let report = SearchReport::new(entries);
    let (best_params, best_score, best_std) = match report.best() {
        Some(best) => {
            let (mean, std) = best.scores().unwrap_or_default();
            (best.params, mean, std)
        }
        None => return Err(DnaModelError::SearchExhausted { attempted }),
    };

    tracing::info!("Best: {:.6} using {}", best_score, best_params);
    Ok(SearchOutcome { best_params, best_score, best_std, report })
}
