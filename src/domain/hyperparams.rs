// ============================================================
// Layer 3 - Hyperparameters and the Search Grid
// ============================================================
// A combination is (learning_rate, hidden_units, sequence_length).
// sequence_length only ever holds L for a given dataset; it is a
// grid dimension so every model can be rebuilt from its params.
//
// Enumeration order: learning rate outermost, sequence length
// innermost. Ties in the search are broken by this order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DnaModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub learning_rate:   f64,
    pub hidden_units:    usize,
    pub sequence_length: usize,
}

impl fmt::Display for Hyperparameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{learning_rate: {}, hidden_units: {}, sequence_length: {}}}",
            self.learning_rate, self.hidden_units, self.sequence_length
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGrid {
    pub learning_rates:   Vec<f64>,
    pub hidden_units:     Vec<usize>,
    pub sequence_lengths: Vec<usize>,
}

impl ParamGrid {
    pub fn new(
        learning_rates:   Vec<f64>,
        hidden_units:     Vec<usize>,
        sequence_lengths: Vec<usize>,
    ) -> Result<Self> {
        let grid = Self { learning_rates, hidden_units, sequence_lengths };
        grid.validate()?;
        Ok(grid)
    }

    /// Grid for a dataset of length `sequence_length`.
    /// An empty `hidden_units` list derives [L/8, L/4, L/2], each at least 1.
    pub fn for_sequence_length(
        sequence_length: usize,
        learning_rates:  Vec<f64>,
        hidden_units:    Vec<usize>,
    ) -> Result<Self> {
        let hidden_units = if hidden_units.is_empty() {
            default_hidden_units(sequence_length)
        } else {
            hidden_units
        };
        Self::new(learning_rates, hidden_units, vec![sequence_length])
    }

    fn validate(&self) -> Result<()> {
        if self.learning_rates.is_empty() || self.hidden_units.is_empty() || self.sequence_lengths.is_empty() {
            return Err(DnaModelError::InvalidConfig(
                "every grid dimension needs at least one value".into(),
            ));
        }
        if let Some(lr) = self.learning_rates.iter().find(|lr| !(lr.is_finite() && **lr > 0.0)) {
            return Err(DnaModelError::InvalidConfig(format!("learning rate {lr} must be positive")));
        }
        if self.hidden_units.contains(&0) || self.sequence_lengths.contains(&0) {
            return Err(DnaModelError::InvalidConfig(
                "hidden units and sequence length must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Number of combinations in the Cartesian product
    pub fn len(&self) -> usize {
        self.learning_rates.len() * self.hidden_units.len() * self.sequence_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn combinations(&self) -> Vec<Hyperparameters> {
        let mut out = Vec::with_capacity(self.len());
        for &learning_rate in &self.learning_rates {
            for &hidden_units in &self.hidden_units {
                for &sequence_length in &self.sequence_lengths {
                    out.push(Hyperparameters { learning_rate, hidden_units, sequence_length });
                }
            }
        }
        out
    }
}

pub fn default_hidden_units(sequence_length: usize) -> Vec<usize> {
    [8, 4, 2]
        .iter()
        .map(|divisor| (sequence_length / divisor).max(1))
        .collect()
}
