// ============================================================
// Layer 5 - DNA Expression CNN
// ============================================================
// Input [batch, L, 4] one-hot → output [batch, 1] expression.
//
//   swap to [batch, 4, L] (channels first for Conv1d)
//   Conv1d(4 → 30, k=6, "same") → ReLU → Dropout(0.1)
//   Conv1d(30 → 40, k=6, "same") → ReLU
//   Flatten → [batch, 40 * L]
//   Linear(40 * L → hidden_units) → Dropout(0.2) → ReLU
//   Linear(hidden_units → 1)                (linear output)
//
// "same" with an even kernel pads 2 on the left and 3 on the
// right. Burn's explicit padding is symmetric, so each conv pads
// 3 on both sides (output L + 1) and the first column is dropped,
// which lines every output position up with the same window.
//
// Reference: Burn Book §3 (Building Blocks)

use burn::{
    nn::{
        conv::{Conv1d, Conv1dConfig},
        loss::{MseLoss, Reduction},
        Dropout, DropoutConfig,
        Linear, LinearConfig,
        PaddingConfig1d,
    },
    prelude::*,
    tensor::activation::relu,
};

use crate::domain::sequence::ALPHABET_SIZE;

#[derive(Config, Debug)]
pub struct DnaCnnConfig {
    pub sequence_length: usize,
    pub hidden_units:    usize,
    #[config(default = 30)]
    pub first_filters:   usize,
    #[config(default = 40)]
    pub second_filters:  usize,
    #[config(default = 6)]
    pub kernel_size:     usize,
    #[config(default = 0.1)]
    pub conv_dropout:    f64,
    #[config(default = 0.2)]
    pub dense_dropout:   f64,
}

impl DnaCnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> DnaCnn<B> {
        let pad = PaddingConfig1d::Explicit(self.kernel_size / 2);

        let conv1 = Conv1dConfig::new(ALPHABET_SIZE, self.first_filters, self.kernel_size)
            .with_padding(pad.clone())
            .init(device);
        let conv2 = Conv1dConfig::new(self.first_filters, self.second_filters, self.kernel_size)
            .with_padding(pad)
            .init(device);
        let hidden = LinearConfig::new(self.second_filters * self.sequence_length, self.hidden_units)
            .init(device);
        let output = LinearConfig::new(self.hidden_units, 1).init(device);

        DnaCnn {
            conv1,
            conv2,
            hidden,
            output,
            conv_dropout:  DropoutConfig::new(self.conv_dropout).init(),
            dense_dropout: DropoutConfig::new(self.dense_dropout).init(),
        }
    }
}

#[derive(Module, Debug)]
pub struct DnaCnn<B: Backend> {
    pub conv1:         Conv1d<B>,
    pub conv2:         Conv1d<B>,
    pub hidden:        Linear<B>,
    pub output:        Linear<B>,
    pub conv_dropout:  Dropout,
    pub dense_dropout: Dropout,
}

pub struct RegressionOutput<B: Backend> {
    pub loss:   Tensor<B, 1>,
    pub output: Tensor<B, 2>,
}

impl<B: Backend> DnaCnn<B> {
    /// inputs: [batch, L, 4] → [batch, 1]
    pub fn forward(&self, inputs: Tensor<B, 3>) -> Tensor<B, 2> {
        let [batch_size, seq_len, _] = inputs.dims();

        let x = inputs.swap_dims(1, 2); // [batch, 4, L]
        let x = same_width(self.conv1.forward(x), seq_len);
        let x = self.conv_dropout.forward(relu(x));
        let x = relu(same_width(self.conv2.forward(x), seq_len));

        let [_, channels, _] = x.dims();
        let x = x.reshape([batch_size, channels * seq_len]);

        let x = self.hidden.forward(x);
        let x = relu(self.dense_dropout.forward(x));
        self.output.forward(x)
    }

    pub fn forward_regression(&self, inputs: Tensor<B, 3>, targets: Tensor<B, 2>) -> RegressionOutput<B> {
        let output = self.forward(inputs);
        let loss = MseLoss::new().forward(output.clone(), targets, Reduction::Mean);
        RegressionOutput { loss, output }
    }
}

/// Trim a symmetrically padded conv output [b, c, L + 1] back to
/// [b, c, L], keeping the columns a 2-left/3-right pad would produce.
fn same_width<B: Backend>(x: Tensor<B, 3>, seq_len: usize) -> Tensor<B, 3> {
    let [batch, channels, width] = x.dims();
    let offset = width - seq_len;
    x.slice([0..batch, 0..channels, offset..width])
}
