use burn::data::dataset::Dataset;

use crate::domain::sequence::EncodedSequence;

/// One encoded sequence (flattened L * 4, row-major) and its normalized target.
#[derive(Debug, Clone)]
pub struct DnaSample {
    pub encoded: Vec<f32>,
    pub target:  f32,
}

impl DnaSample {
    pub fn new(sequence: &EncodedSequence, target: f32) -> Self {
        Self { encoded: sequence.flatten(), target }
    }
}

pub struct DnaDataset {
    samples: Vec<DnaSample>,
}

impl DnaDataset {
    pub fn new(samples: Vec<DnaSample>) -> Self { Self { samples } }

    pub fn from_pairs(inputs: &[EncodedSequence], targets: &[f32]) -> Self {
        Self::new(
            inputs
                .iter()
                .zip(targets)
                .map(|(seq, &target)| DnaSample::new(seq, target))
                .collect(),
        )
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<DnaSample> for DnaDataset {
    fn get(&self, index: usize) -> Option<DnaSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sequence::SequenceCodec;

    #[test]
    fn test_from_pairs() {
        let inputs = vec![
            SequenceCodec::encode_str("AC").unwrap(),
            SequenceCodec::encode_str("GT").unwrap(),
        ];
        let ds = DnaDataset::from_pairs(&inputs, &[0.5, -0.5]);
        assert_eq!(ds.len(), 2);
        let second = ds.get(1).unwrap();
        assert_eq!(second.target, -0.5);
        assert_eq!(second.encoded, vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert!(ds.get(2).is_none());
    }
}
