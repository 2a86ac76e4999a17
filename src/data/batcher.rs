// ============================================================
// Layer 4 - DNA Batcher
// ============================================================
// Implements Burn's Batcher trait: stacks N samples into
//
//   inputs:  [N, L, 4]  one-hot rows
//   targets: [N, 1]     normalized expression
//
// Every sample in a batch has the same L (checked in ENCODING),
// so the flat vectors concatenate straight into one tensor.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::DnaSample;
use crate::domain::sequence::{EncodedSequence, ALPHABET_SIZE};

#[derive(Debug, Clone)]
pub struct DnaBatch<B: Backend> {
    /// shape: [batch_size, seq_len, 4]
    pub inputs: Tensor<B, 3>,

    /// shape: [batch_size, 1]
    pub targets: Tensor<B, 2>,
}

#[derive(Clone, Debug)]
pub struct DnaBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> DnaBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Input tensor for prediction, no targets needed
    pub fn inputs(&self, sequences: &[EncodedSequence]) -> Tensor<B, 3> {
        let seq_len = sequences.first().map(|s| s.len()).unwrap_or(0);
        let flat: Vec<f32> = sequences.iter().flat_map(|s| s.flatten()).collect();
        Tensor::<B, 3>::from_data(
            TensorData::new(flat, [sequences.len(), seq_len, ALPHABET_SIZE]),
            &self.device,
        )
    }
}

impl<B: Backend> Batcher<DnaSample, DnaBatch<B>> for DnaBatcher<B> {
    fn batch(&self, items: Vec<DnaSample>) -> DnaBatch<B> {
        let batch_size = items.len();
        let seq_len    = items[0].encoded.len() / ALPHABET_SIZE;

        let input_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.encoded.iter().copied())
            .collect();

        let target_flat: Vec<f32> = items.iter().map(|s| s.target).collect();

        let inputs = Tensor::<B, 3>::from_data(
            TensorData::new(input_flat, [batch_size, seq_len, ALPHABET_SIZE]),
            &self.device,
        );

        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(target_flat, [batch_size, 1]),
            &self.device,
        );

        DnaBatch { inputs, targets }
    }
}
