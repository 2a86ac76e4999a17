// ============================================================
// Layer 3 - Sequence Domain Types and One-Hot Codec
// ============================================================
// A DNA sequence is an ordered run of bases from {A, C, G, T}.
// The network consumes it as an (L, 4) one-hot matrix:
//
//   A → [1, 0, 0, 0]
//   C → [0, 1, 0, 0]
//   G → [0, 0, 1, 0]
//   T → [0, 0, 0, 1]
//
// Encoding rejects any other symbol. Decoding rejects any row
// that is not exactly one of the four vectors above.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DnaModelError, Result};

/// Width of one encoded row (alphabet size)
pub const ALPHABET_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    /// Canonical order used for the one-hot columns
    pub const ALL: [Base; ALPHABET_SIZE] = [Base::A, Base::C, Base::G, Base::T];

    pub fn index(self) -> usize {
        match self {
            Base::A => 0,
            Base::C => 1,
            Base::G => 2,
            Base::T => 3,
        }
    }

    pub fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Base::A),
            'C' => Some(Base::C),
            'G' => Some(Base::G),
            'T' => Some(Base::T),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }

    pub fn one_hot(self) -> [f32; ALPHABET_SIZE] {
        let mut row = [0.0; ALPHABET_SIZE];
        row[self.index()] = 1.0;
        row
    }
}

// ─── Sequence ─────────────────────────────────────────────────────────────────
/// A validated base sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence(Vec<Base>);

impl Sequence {
    pub fn new(bases: Vec<Base>) -> Self {
        Self(bases)
    }

    /// A sequence of `len` copies of the same base, e.g. "AAAA"
    pub fn homopolymer(base: Base, len: usize) -> Self {
        Self(vec![base; len])
    }

    pub fn bases(&self) -> &[Base] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Sequence {
    type Err = DnaModelError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(position, symbol)| {
                Base::from_char(symbol)
                    .ok_or(DnaModelError::InvalidSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>>>()
            .map(Sequence)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.0 {
            write!(f, "{}", base.as_char())?;
        }
        Ok(())
    }
}

// ─── EncodedSequence ──────────────────────────────────────────────────────────
/// One-hot matrix of shape (L, 4), stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedSequence {
    rows: Vec<[f32; ALPHABET_SIZE]>,
}

impl EncodedSequence {
    /// Wrap raw rows without validation. `decode` is what checks them.
    pub fn from_rows(rows: Vec<[f32; ALPHABET_SIZE]>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[[f32; ALPHABET_SIZE]] {
        &self.rows
    }

    /// Sequence length L (number of rows)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Flatten to L * 4 values in row-major order
    pub fn flatten(&self) -> Vec<f32> {
        self.rows.iter().flat_map(|row| row.iter().copied()).collect()
    }
}

// ─── SequenceCodec ────────────────────────────────────────────────────────────
pub struct SequenceCodec;

impl SequenceCodec {
    pub fn encode(sequence: &Sequence) -> EncodedSequence {
        EncodedSequence {
            rows: sequence.bases().iter().map(|b| b.one_hot()).collect(),
        }
    }

    /// Parse and encode in one step; fails on the first unknown symbol
    pub fn encode_str(raw: &str) -> Result<EncodedSequence> {
        Ok(Self::encode(&raw.parse::<Sequence>()?))
    }

    pub fn decode(encoded: &EncodedSequence) -> Result<Sequence> {
        encoded
            .rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                Base::ALL
                    .iter()
                    .copied()
                    .find(|base| base.one_hot() == *values)
                    .ok_or(DnaModelError::InvalidEncoding { row })
            })
            .collect::<Result<Vec<_>>>()
            .map(Sequence)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for raw in ["A", "ACGT", "TTTTGGGGCCCCAAAA", "GATTACA"] {
            let seq: Sequence = raw.parse().unwrap();
            let decoded = SequenceCodec::decode(&SequenceCodec::encode(&seq)).unwrap();
            assert_eq!(decoded, seq);
            assert_eq!(decoded.to_string(), raw);
        }
    }

    #[test]
    fn test_rows_are_one_hot() {
        let encoded = SequenceCodec::encode_str("ACGTTGCA").unwrap();
        assert_eq!(encoded.len(), 8);
        for row in encoded.rows() {
            assert_eq!(row.iter().sum::<f32>(), 1.0);
            assert_eq!(row.iter().filter(|&&v| v == 1.0).count(), 1);
        }
        assert_eq!(encoded.rows()[1], [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let err = SequenceCodec::encode_str("ACNT").unwrap_err();
        assert!(matches!(err, DnaModelError::InvalidSymbol { symbol: 'N', position: 2 }));
    }

    #[test]
    fn test_lowercase_is_rejected() {
        assert!("acgt".parse::<Sequence>().is_err());
    }

    #[test]
    fn test_unmatched_row_is_rejected() {
        let encoded = EncodedSequence::from_rows(vec![
            [1.0, 0.0, 0.0, 0.0],
            [0.5, 0.5, 0.0, 0.0],
        ]);
        let err = SequenceCodec::decode(&encoded).unwrap_err();
        assert!(matches!(err, DnaModelError::InvalidEncoding { row: 1 }));
    }

    #[test]
    fn test_flatten_is_row_major() {
        let encoded = SequenceCodec::encode_str("CA").unwrap();
        assert_eq!(encoded.flatten(), vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_homopolymer() {
        assert_eq!(Sequence::homopolymer(Base::G, 3).to_string(), "GGG");
    }
}
