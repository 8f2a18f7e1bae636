#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::module_name_repetitions)]

pub mod error;
pub mod estimator;
pub mod model;

pub use error::CheckpointError;
pub use estimator::{EstimatorConfig, NetEstimator};
pub use model::{ValueNet, ValueNetConfig};
