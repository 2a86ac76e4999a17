#![recursion_limit = "256"]

//! Train a 1-D CNN that predicts an expression value from a
//! fixed-length DNA sequence, pick its hyperparameters by k-fold
//! search, and persist it as a dated, self-describing artifact.

pub mod error;

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod search;
pub mod infra;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{DnaModelError, PipelineStage, Result, StageError};
