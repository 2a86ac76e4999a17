// Synthetic expression data shared by the integration tests.
#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::Path;

use rand::{rngs::StdRng, Rng, SeedableRng};

use dna_expression_cnn::domain::record::RawRecord;

pub const LENGTH: usize = 12;

/// Expression is a linear function of base composition:
/// one unit per G, half a unit per C.
pub fn expression(sequence: &str) -> f64 {
    sequence
        .chars()
        .map(|c| match c {
            'G' => 1.0,
            'C' => 0.5,
            _ => 0.0,
        })
        .sum()
}

pub fn sequences(n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..LENGTH).map(|_| ['A', 'C', 'G', 'T'][rng.gen_range(0..4)]).collect())
        .collect()
}

pub fn records(n: usize, seed: u64) -> Vec<RawRecord> {
    sequences(n, seed)
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let y = expression(&s);
            RawRecord::new(i + 1, Some(s), Some(y))
        })
        .collect()
}

pub fn write_csv(path: &Path, n: usize, seed: u64) {
    let mut text = String::from("Sequence,Expression\n");
    for s in sequences(n, seed) {
        writeln!(text, "{},{}", s, expression(&s)).unwrap();
    }
    std::fs::write(path, text).unwrap();
}
