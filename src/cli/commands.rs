// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Two subcommands, `train` and `predict`, and their flags.
//
// List flags take comma-separated values:
//   --learning-rates 0.001,0.0005 --hidden-units 10,20,40
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::train_use_case::{SearchMethod, TrainConfig};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search hyperparameters, train the CNN and save it
    Train(TrainArgs),

    /// Predict expression for sequences with a saved model
    Predict(PredictArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchArg {
    /// Every combination of the grid
    Grid,
    /// A seeded subset of the grid
    Random,
}

impl From<SearchArg> for SearchMethod {
    fn from(a: SearchArg) -> Self {
        match a {
            SearchArg::Grid   => SearchMethod::Grid,
            SearchArg::Random => SearchMethod::Random,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV/TSV file with a header; first column sequence, second expression
    #[arg(long)]
    pub input: String,

    /// Where the model files and search report are written
    #[arg(long, default_value = ".")]
    pub output_dir: String,

    /// Seed for the held-out split, weight init and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Fraction of rows held out for the final r2
    #[arg(long, default_value_t = 0.15)]
    pub test_fraction: f64,

    /// Cross-validation folds per combination
    #[arg(long, default_value_t = 5)]
    pub folds: usize,

    #[arg(long, default_value_t = 6)]
    pub epochs: usize,

    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    #[arg(long, value_delimiter = ',', default_value = "0.001")]
    pub learning_rates: Vec<f64>,

    /// Dense layer sizes to try; omitted = L/8, L/4, L/2
    #[arg(long, value_delimiter = ',')]
    pub hidden_units: Vec<usize>,

    #[arg(long, value_enum, default_value_t = SearchArg::Grid)]
    pub search: SearchArg,

    /// Combinations sampled by --search random
    #[arg(long, default_value_t = 10)]
    pub random_iterations: usize,

    /// Combinations evaluated in parallel
    #[arg(long, default_value_t = 1)]
    pub jobs: usize,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            input:             a.input,
            output_dir:        a.output_dir,
            seed:              a.seed,
            test_fraction:     a.test_fraction,
            folds:             a.folds,
            epochs:            a.epochs,
            batch_size:        a.batch_size,
            learning_rates:    a.learning_rates,
            hidden_units:      a.hidden_units,
            search:            a.search.into(),
            random_iterations: a.random_iterations,
            jobs:              a.jobs,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Model stem (e.g. dnamodel2024-03-01) or one of its files
    #[arg(long)]
    pub model: String,

    /// Sequences to score, all of the model's length
    #[arg(required = true)]
    pub sequences: Vec<String>,
}
