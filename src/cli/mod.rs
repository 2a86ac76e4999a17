// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
//
//   1. `train`   - search, retrain, evaluate, save, verify
//   2. `predict` - score sequences with a saved model
//
// Only this layer prints.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "dnamodel",
    version,
    about = "Train a CNN that predicts expression from fixed-length DNA sequences."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let summary = TrainUseCase::new(args.into()).execute()?;

    println!("Best parameters: {}", summary.best_params);
    println!("Cross-validated r2: {:.6} ({:.6})", summary.cv_score, summary.cv_std);
    println!(
        "Held-out r2: {:.6} ({} train / {} test)",
        summary.test_r2, summary.train_size, summary.test_size
    );
    println!("Model saved as '{}'", summary.stem.display());
    println!("Search report: '{}'", summary.report_csv.display());
    println!("Reload verified: {}", summary.verified);
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let use_case = PredictUseCase::new(&args.model)?;
    for p in use_case.predict(&args.sequences)? {
        println!("{}\t{:.6}\t{:.6}", p.sequence, p.expression, p.normalized);
    }
    Ok(())
}
