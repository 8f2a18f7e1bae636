use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::Relu;
use burn::prelude::*;
use burn::tensor::activation::sigmoid;

/// Position value network.
///
/// The first convolution reads one sub-board per output cell, the second
/// reads the resulting macro grid.
///
/// ```text
/// Input:  [batch, 1, n*n, n*n]
/// Conv a: 1 -> width channels, n x n kernel, stride n  =>  [batch, width, n, n]
/// ReLU
/// Conv b: width -> 1 channel, n x n kernel, stride n   =>  [batch, 1, 1, 1]
/// Sigmoid, flatten                                     =>  [batch]
/// ```
#[derive(Module, Debug)]
pub struct ValueNet<B: Backend> {
    conv_a: Conv2d<B>,
    conv_b: Conv2d<B>,
    relu: Relu,
}

#[derive(Config, Debug)]
pub struct ValueNetConfig {
    /// Sub-board edge length.
    pub sub_size: usize,
    #[config(default = 32)]
    pub width: usize,
}

impl ValueNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ValueNet<B> {
        let n = self.sub_size;
        ValueNet {
            conv_a: Conv2dConfig::new([1, self.width], [n, n])
                .with_stride([n, n])
                .init(device),
            conv_b: Conv2dConfig::new([self.width, 1], [n, n])
                .with_stride([n, n])
                .init(device),
            relu: Relu::new(),
        }
    }
}

impl<B: Backend> ValueNet<B> {
    /// One value in `(0, 1)` per input board.
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 1> {
        let x = self.relu.forward(self.conv_a.forward(input));
        let x = sigmoid(self.conv_b.forward(x));
        x.flatten(0, 3)
    }
}
