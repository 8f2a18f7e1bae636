use std::path::Path;

use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::nn::loss::{MseLoss, Reduction};
use burn::optim::adaptor::OptimizerAdaptor;
use burn::optim::{Adam, AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;
use burn::record::DefaultRecorder;
use burn::tensor::TensorData;
use uttt::{Example, Mode, ValueEstimator};
use uttt_types::State;

use crate::error::CheckpointError;
use crate::model::{ValueNet, ValueNetConfig};

type InferBackend = NdArray<f32>;
type TrainBackend = Autodiff<InferBackend>;

#[derive(Config, Debug)]
pub struct EstimatorConfig {
    #[config(default = 3)]
    pub sub_size: usize,
    #[config(default = 32)]
    pub width: usize,
    #[config(default = 1e-4)]
    pub learning_rate: f64,
}

impl EstimatorConfig {
    fn net(&self) -> ValueNetConfig {
        ValueNetConfig::new(self.sub_size).with_width(self.width)
    }
}

/// [`ValueNet`] trained with Adam on the mean squared error of its values.
pub struct NetEstimator {
    model: ValueNet<TrainBackend>,
    optimizer: OptimizerAdaptor<Adam, ValueNet<TrainBackend>, TrainBackend>,
    config: EstimatorConfig,
    device: <TrainBackend as Backend>::Device,
    mode: Mode,
}

impl NetEstimator {
    /// Fresh parameters. A seed makes the initialisation reproducible.
    pub fn new(config: EstimatorConfig, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            TrainBackend::seed(seed);
        }
        let device = Default::default();
        let model = config.net().init(&device);
        Self::from_model(model, config, device)
    }

    /// Restores parameters written by [`NetEstimator::save`]. The optimizer starts afresh.
    pub fn load(path: &Path, config: EstimatorConfig) -> Result<Self, CheckpointError> {
        if !path.is_file() {
            return Err(CheckpointError::NotFound(path.to_path_buf()));
        }
        let device = Default::default();
        let model = config
            .net()
            .init::<TrainBackend>(&device)
            .load_file(path.to_path_buf(), &DefaultRecorder::default(), &device)
            .map_err(|e| CheckpointError::Load {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        log::info!("loaded value network from {}", path.display());
        Ok(Self::from_model(model, config, device))
    }

    fn from_model(
        model: ValueNet<TrainBackend>,
        config: EstimatorConfig,
        device: <TrainBackend as Backend>::Device,
    ) -> Self {
        Self {
            model,
            optimizer: AdamConfig::new().init(),
            config,
            device,
            mode: Mode::Inference,
        }
    }

    /// Writes the parameters to `path`, which should carry the `.mpk` extension.
    pub fn save(&self, path: &Path) -> Result<(), CheckpointError> {
        self.model
            .clone()
            .valid()
            .save_file(path.to_path_buf(), &DefaultRecorder::default())
            .map_err(|e| CheckpointError::Save {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        log::debug!("saved value network to {}", path.display());
        Ok(())
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// Copies the parameters. The copy starts with its own optimizer state.
impl Clone for NetEstimator {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            ..Self::from_model(self.model.clone(), self.config.clone(), self.device.clone())
        }
    }
}

/// Stacks states into a `[batch, 1, side, side]` tensor.
fn encode<B: Backend>(states: &[&State], device: &B::Device) -> Tensor<B, 4> {
    let side = states.first().map_or(0, |s| s.side());
    let flat: Vec<f32> = states
        .iter()
        .flat_map(|s| s.as_slice().iter().copied())
        .collect();
    Tensor::<B, 1>::from_data(TensorData::from(flat.as_slice()), device)
        .reshape([states.len(), 1, side, side])
}

fn targets<B: Backend>(batch: &[Example], device: &B::Device) -> Tensor<B, 1> {
    let labels: Vec<f32> = batch.iter().map(|e| e.label).collect();
    Tensor::<B, 1>::from_data(TensorData::from(labels.as_slice()), device)
}

fn states(batch: &[Example]) -> Vec<&State> {
    batch.iter().map(|e| &e.state).collect()
}

impl ValueEstimator for NetEstimator {
    fn estimate(&self, states: &[State]) -> Vec<f32> {
        if states.is_empty() {
            return Vec::new();
        }
        let refs: Vec<&State> = states.iter().collect();
        let data = match self.mode {
            Mode::Inference => self
                .model
                .valid()
                .forward(encode::<InferBackend>(&refs, &self.device))
                .into_data(),
            Mode::Training => self
                .model
                .forward(encode::<TrainBackend>(&refs, &self.device))
                .into_data(),
        };
        data.iter::<f32>().collect()
    }

    fn set_mode(&mut self, mode: Mode) {
        log::trace!("value network mode {mode:?}");
        self.mode = mode;
    }

    fn train_step(&mut self, batch: &[Example]) -> f32 {
        let output = self
            .model
            .forward(encode::<TrainBackend>(&states(batch), &self.device));
        let loss = MseLoss::new().forward(
            output,
            targets::<TrainBackend>(batch, &self.device),
            Reduction::Mean,
        );
        let value: f32 = loss.clone().into_scalar();

        let grads = GradientsParams::from_grads(loss.backward(), &self.model);
        self.model = self
            .optimizer
            .step(self.config.learning_rate, self.model.clone(), grads);
        value
    }

    fn loss(&self, batch: &[Example]) -> f32 {
        let output = self
            .model
            .valid()
            .forward(encode::<InferBackend>(&states(batch), &self.device));
        MseLoss::new()
            .forward(
                output,
                targets::<InferBackend>(batch, &self.device),
                Reduction::Mean,
            )
            .into_scalar()
    }
}
