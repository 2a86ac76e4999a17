// Kept in its own test binary: the backend RNG is process-global,
// so concurrent CNN tests would perturb the draws compared here.

mod common;

use dna_expression_cnn::application::pipeline::{PipelineSettings, TrainingPipeline};
use dna_expression_cnn::domain::traits::RegressionModel;
use dna_expression_cnn::ml::regressor::CnnFactory;
use dna_expression_cnn::ml::trainer::FitSchedule;
use dna_expression_cnn::search::{cross_validation::CrossValidator, grid::GridSearch};

#[test]
fn same_seed_same_search_and_score() {
    let run = || {
        let settings = PipelineSettings {
            learning_rates: vec![0.01, 0.001],
            hidden_units:   vec![2, 4],
            seed:           3,
            ..PipelineSettings::default()
        };
        let mut pipeline = TrainingPipeline::new(
            CnnFactory::new(FitSchedule { epochs: 3, batch_size: 8 }),
            Box::new(GridSearch::new(CrossValidator::new(3, 3), 1)),
            settings,
        );
        pipeline.run(&common::records(40, 5)).unwrap()
    };

    let a = run();
    let b = run();
    assert_eq!(a.search, b.search);
    assert_eq!(a.test_r2, b.test_r2);

    let probe = vec![dna_expression_cnn::domain::sequence::SequenceCodec::encode_str("GATTACAGATTA").unwrap()];
    assert_eq!(a.model.predict(&probe).unwrap(), b.model.predict(&probe).unwrap());
}
