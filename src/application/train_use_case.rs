// ============================================================
// Layer 2 - TrainUseCase
// ============================================================
// One `train` invocation, in order:
//
//   Step 1: Build the CNN factory and search strategy  (Layer 5 / search)
//   Step 2: Run the training pipeline                   (Layer 2 - pipeline)
//   Step 3: Append the search report CSV                (Layer 6 - infra)
//   Step 4: Save model + manifest under today's stem    (Layer 6 - infra)
//   Step 5: Reload and verify predictions match         (Layer 6 - infra)
//
// Nothing is written to disk unless the pipeline reached DONE.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::pipeline::{PipelineSettings, TrainingPipeline};
use crate::data::loader::TableLoader;
use crate::domain::hyperparams::Hyperparameters;
use crate::domain::traits::RegressionModel;
use crate::infra::{
    checkpoint::{ModelManifest, ModelStore},
    metrics::SearchReportLogger,
    verification::verify,
};
use crate::ml::regressor::CnnFactory;
use crate::ml::trainer::FitSchedule;
use crate::search::{
    cross_validation::{CrossValidator, DEFAULT_FOLDS},
    grid::GridSearch,
    random::RandomSearch,
    SearchStrategy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    Grid,
    Random,
}

// ─── Training Configuration ──────────────────────────────────────────────────
// Every knob of a training run. Serialisable so the manifest can
// record exactly what produced a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub input:             String,
    pub output_dir:        String,
    pub seed:              u64,
    pub test_fraction:     f64,
    pub folds:             usize,
    pub epochs:            usize,
    pub batch_size:        usize,
    pub learning_rates:    Vec<f64>,
    /// Empty = derive [L/8, L/4, L/2]
    pub hidden_units:      Vec<usize>,
    pub search:            SearchMethod,
    pub random_iterations: usize,
    pub jobs:              usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        let schedule = FitSchedule::default();
        Self {
            input:             "data/expression.csv".to_string(),
            output_dir:        ".".to_string(),
            seed:              42,
            test_fraction:     0.15,
            folds:             DEFAULT_FOLDS,
            epochs:            schedule.epochs,
            batch_size:        schedule.batch_size,
            learning_rates:    vec![0.001],
            hidden_units:      Vec::new(),
            search:            SearchMethod::Grid,
            random_iterations: 10,
            jobs:              1,
        }
    }
}

impl TrainConfig {
    pub fn schedule(&self) -> FitSchedule {
        FitSchedule { epochs: self.epochs, batch_size: self.batch_size }
    }

    pub fn strategy(&self) -> Box<dyn SearchStrategy<CnnFactory>> {
        let validator = CrossValidator::new(self.folds, self.seed);
        match self.search {
            SearchMethod::Grid => Box::new(GridSearch::new(validator, self.jobs)),
            SearchMethod::Random => Box::new(RandomSearch::new(
                validator,
                self.jobs,
                self.random_iterations,
                self.seed,
            )),
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            test_fraction:  self.test_fraction,
            seed:           self.seed,
            learning_rates: self.learning_rates.clone(),
            hidden_units:   self.hidden_units.clone(),
        }
    }
}

/// What the CLI prints after a successful run
#[derive(Debug, Clone)]
pub struct TrainSummary {
    pub stem:        PathBuf,
    pub best_params: Hyperparameters,
    pub cv_score:    f64,
    pub cv_std:      f64,
    pub test_r2:     f64,
    pub train_size:  usize,
    pub test_size:   usize,
    pub verified:    bool,
    pub report_csv:  PathBuf,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<TrainSummary> {
        let cfg = &self.config;

        // ── Step 1: Factory and strategy ─────────────────────────────────────
        let factory = CnnFactory::new(cfg.schedule());
        factory.schedule().validate()?;
        let mut pipeline = TrainingPipeline::new(factory, cfg.strategy(), cfg.pipeline_settings());

        // ── Step 2: Pipeline ─────────────────────────────────────────────────
        tracing::info!("Training on '{}' (seed {})", cfg.input, cfg.seed);
        let source = TableLoader::new(&cfg.input);
        let outcome = pipeline
            .run(&source)
            .with_context(|| format!("Training on '{}' failed", cfg.input))?;

        // ── Step 3: Search report ────────────────────────────────────────────
        let logger = SearchReportLogger::new(&cfg.output_dir)?;
        logger.log(&outcome.search.report)?;

        // ── Step 4: Persist ──────────────────────────────────────────────────
        let store = ModelStore::new(&cfg.output_dir)?;
        let manifest = ModelManifest {
            created:         ModelStore::today(),
            best_params:     outcome.search.best_params,
            sequence_length: outcome.sequence_length,
            scaler:          outcome.scaler,
            test_r2:         outcome.test_r2,
            config:          cfg.clone(),
            search:          outcome.search.report.clone(),
        };

        // ── Step 5: Verify ───────────────────────────────────────────────────
        let (stem, verified) = save_verified(&store, &outcome.model, &manifest)?;

        Ok(TrainSummary {
            stem,
            best_params: outcome.search.best_params,
            cv_score:    outcome.search.best_score,
            cv_std:      outcome.search.best_std,
            test_r2:     outcome.test_r2,
            train_size:  outcome.train_size,
            test_size:   outcome.test_size,
            verified,
            report_csv:  logger.csv_path().to_path_buf(),
        })
    }
}

/// Save, reload and compare. A model that fails the comparison is
/// deleted again so only verified artifacts stay on disk.
fn save_verified<M: RegressionModel>(
    store:    &ModelStore,
    model:    &M,
    manifest: &ModelManifest,
) -> Result<(PathBuf, bool)> {
    let stem = store
        .save(model, manifest)
        .with_context(|| format!("Cannot save model into '{}'", store.dir().display()))?;

    match verify(model, &stem) {
        Ok(verified) => {
            tracing::info!("Reloaded model reproduces in-memory predictions");
            Ok((stem, verified))
        }
        Err(e) => {
            ModelStore::remove::<M>(&stem);
            Err(e).with_context(|| format!("Saved model '{}' failed verification", stem.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::TargetScaler;
    use crate::domain::traits::ModelFactory;
    use crate::error::DnaModelError;
    use crate::search::report::SearchReport;
    use crate::testing::{StubFactory, StubModel, STUB_LENGTH};

    fn stub_manifest() -> ModelManifest {
        ModelManifest {
            created:         ModelStore::today(),
            best_params:     StubFactory::params(0.01, 2),
            sequence_length: STUB_LENGTH,
            scaler:          TargetScaler { mean: 0.0, scale: 1.0 },
            test_r2:         0.9,
            config:          TrainConfig::default(),
            search:          SearchReport::default(),
        }
    }

    #[test]
    fn test_verified_model_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path()).unwrap();
        let model = StubFactory.build(&StubFactory::params(0.01, 2), 0).unwrap();

        let (stem, verified) = save_verified(&store, &model, &stub_manifest()).unwrap();
        assert!(verified);
        assert!(ModelStore::artifact_paths::<StubModel>(&stem).iter().all(|p| p.exists()));
    }

    #[test]
    fn test_mismatched_reload_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path()).unwrap();
        let mut model = StubFactory.build(&StubFactory::params(0.01, 2), 0).unwrap();
        model.corrupt_on_save = true;

        let err = save_verified(&store, &model, &stub_manifest()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DnaModelError>(),
            Some(DnaModelError::PersistenceMismatch { .. })
        ));

        let stem = store.stem_for(ModelStore::today());
        for path in ModelStore::artifact_paths::<StubModel>(&stem) {
            assert!(!path.exists(), "left behind: {}", path.display());
        }
    }

    #[test]
    fn test_config_json_round_trip() {
        let cfg = TrainConfig {
            hidden_units: vec![2, 4],
            search: SearchMethod::Random,
            ..TrainConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"search\":\"random\""));
        let back: TrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_strategy_follows_method() {
        let grid = TrainConfig::default();
        assert_eq!(grid.strategy().name(), "grid");
        let random = TrainConfig { search: SearchMethod::Random, ..TrainConfig::default() };
        assert_eq!(random.strategy().name(), "random");
    }

    #[test]
    fn test_missing_input_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let cfg = TrainConfig {
            input: dir.path().join("absent.csv").to_string_lossy().into_owned(),
            output_dir: out.to_string_lossy().into_owned(),
            ..TrainConfig::default()
        };
        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(format!("{err:#}").contains("LOADING"));
        assert!(!out.exists());
    }
}
