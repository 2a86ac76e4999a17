// ============================================================
// Layer 2 - Training Pipeline
// ============================================================
// A single training run as a state machine:
//
//   LOADING → CLEANING → ENCODING → SPLITTING → SEARCHING
//           → RETRAINING → EVALUATING → DONE
//
// Any stage error moves the pipeline to FAILED and is returned as
// a StageError naming the stage it came from. Stages never retry.
//
//   LOADING     RecordSource::load_records
//   CLEANING    drop non-finite expression rows
//   ENCODING    fix L from the first row, one-hot everything
//   SPLITTING   fit TargetScaler on all targets, seeded held-out split
//   SEARCHING   SearchStrategy over the training partition only
//   RETRAINING  fresh model with the winning params, fit on all of train
//   EVALUATING  r² of the held-out predictions
//
// The pipeline is generic over the ModelFactory, so the same code
// drives the burn CNN and the test doubles.

use crate::data::{normalizer::TargetScaler, preprocessor::Preprocessor, splitter::split_train_test};
use crate::domain::hyperparams::ParamGrid;
use crate::domain::sequence::EncodedSequence;
use crate::domain::traits::{ModelFactory, RecordSource, RegressionModel};
use crate::error::{PipelineStage, Result, StageError};
use crate::search::{report::SearchOutcome, scoring::r2_score, SearchStrategy};

/// Knobs that shape a run but not the model itself
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub test_fraction:  f64,
    pub seed:           u64,
    pub learning_rates: Vec<f64>,
    /// Empty derives [L/8, L/4, L/2] once L is known
    pub hidden_units:   Vec<usize>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            test_fraction:  0.15,
            seed:           42,
            learning_rates: vec![0.001],
            hidden_units:   Vec::new(),
        }
    }
}

/// Everything a finished run produced
pub struct TrainingOutcome<M> {
    pub model:           M,
    pub search:          SearchOutcome,
    pub scaler:          TargetScaler,
    pub sequence_length: usize,
    pub train_size:      usize,
    pub test_size:       usize,
    pub test_r2:         f64,
}

pub struct TrainingPipeline<F: ModelFactory> {
    factory:  F,
    strategy: Box<dyn SearchStrategy<F>>,
    settings: PipelineSettings,
    stage:    PipelineStage,
}

impl<F: ModelFactory> TrainingPipeline<F> {
    pub fn new(factory: F, strategy: Box<dyn SearchStrategy<F>>, settings: PipelineSettings) -> Self {
        Self { factory, strategy, settings, stage: PipelineStage::Loading }
    }

    /// Current (or final) stage
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn run(&mut self, source: &dyn RecordSource) -> std::result::Result<TrainingOutcome<F::Model>, StageError> {
        match self.run_stages(source) {
            Ok(outcome) => {
                self.enter(PipelineStage::Done);
                Ok(outcome)
            }
            Err(source) => {
                let stage = self.stage;
                self.stage = PipelineStage::Failed;
                tracing::error!("Pipeline failed in {}: {}", stage, source);
                Err(StageError { stage, source })
            }
        }
    }

    fn enter(&mut self, stage: PipelineStage) {
        self.stage = stage;
        tracing::info!("Stage {}", stage);
    }

    fn run_stages(&mut self, source: &dyn RecordSource) -> Result<TrainingOutcome<F::Model>> {
        let preprocessor = Preprocessor::new();

        // ── LOADING ──────────────────────────────────────────────────────────
        self.enter(PipelineStage::Loading);
        let raw = source.load_records()?;
        tracing::info!("Loaded {} rows", raw.len());

        // ── CLEANING ─────────────────────────────────────────────────────────
        self.enter(PipelineStage::Cleaning);
        let cleaned = preprocessor.clean(raw)?;

        // ── ENCODING ─────────────────────────────────────────────────────────
        self.enter(PipelineStage::Encoding);
        let dataset = preprocessor.encode(&cleaned)?;
        let sequence_length = dataset.sequence_length;

        // ── SPLITTING ────────────────────────────────────────────────────────
        self.enter(PipelineStage::Splitting);
        let scaler  = TargetScaler::fit(&dataset.targets)?;
        let targets = scaler.transform(&dataset.targets);
        let pairs: Vec<(EncodedSequence, f32)> = dataset.inputs.into_iter().zip(targets).collect();
        let (train, test) = split_train_test(pairs, self.settings.test_fraction, self.settings.seed)?;
        let (train_x, train_y): (Vec<EncodedSequence>, Vec<f32>) = train.into_iter().unzip();
        let (test_x, test_y):   (Vec<EncodedSequence>, Vec<f32>) = test.into_iter().unzip();
        tracing::info!(
            "Targets scaled with mean={:.4} scale={:.4}; {} train / {} test",
            scaler.mean,
            scaler.scale,
            train_x.len(),
            test_x.len()
        );

        // ── SEARCHING ────────────────────────────────────────────────────────
        self.enter(PipelineStage::Searching);
        let grid = ParamGrid::for_sequence_length(
            sequence_length,
            self.settings.learning_rates.clone(),
            self.settings.hidden_units.clone(),
        )?;
        tracing::info!("{} search over {} combination(s)", self.strategy.name(), grid.len());
        let search = self.strategy.search(&self.factory, &train_x, &train_y, &grid)?;

        // ── RETRAINING ───────────────────────────────────────────────────────
        self.enter(PipelineStage::Retraining);
        let mut model = self.factory.build(&search.best_params, self.settings.seed)?;
        model.fit(&train_x, &train_y)?;

        // ── EVALUATING ───────────────────────────────────────────────────────
        self.enter(PipelineStage::Evaluating);
        let predictions = model.predict(&test_x)?;
        let test_r2 = r2_score(&test_y, &predictions);
        tracing::info!("Held-out r2 = {:.6} ({} samples)", test_r2, test_x.len());

        Ok(TrainingOutcome {
            model,
            search,
            scaler,
            sequence_length,
            train_size: train_x.len(),
            test_size: test_x.len(),
            test_r2,
        })
    }
}
