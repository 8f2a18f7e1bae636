#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::module_name_repetitions
)]

pub mod arena;
pub mod board;
pub mod error;
pub mod estimator;
pub mod players;
pub mod selfplay;
pub mod training;

#[cfg(test)]
mod testing;

pub use arena::{Arena, Score};
pub use board::Board;
pub use error::Error;
pub use estimator::{Example, Mode, ValueEstimator};
pub use players::{Player, PlayerKind};
pub use selfplay::SelfPlay;
pub use training::fit;
