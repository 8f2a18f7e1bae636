use serde::{Deserialize, Serialize};
use uttt_types::State;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Inference,
    Training,
}

/// A position seen by the player to move, labelled with that player's
/// estimated chance of winning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub state: State,
    pub label: f32,
}

impl Example {
    #[must_use]
    pub fn new(state: State, label: f32) -> Self {
        Self { state, label }
    }
}

/// Learned map from positions to the win probability of the player owning `+1`.
pub trait ValueEstimator {
    /// One value in `[0, 1]` per state, in order.
    fn estimate(&self, states: &[State]) -> Vec<f32>;

    fn set_mode(&mut self, mode: Mode);

    /// One gradient step on the mean squared error of `batch`. Returns the loss before the step.
    fn train_step(&mut self, batch: &[Example]) -> f32;

    /// Mean squared error of `batch` without updating anything.
    fn loss(&self, batch: &[Example]) -> f32;
}

impl<E: ValueEstimator + ?Sized> ValueEstimator for Box<E> {
    fn estimate(&self, states: &[State]) -> Vec<f32> {
        (**self).estimate(states)
    }

    fn set_mode(&mut self, mode: Mode) {
        (**self).set_mode(mode);
    }

    fn train_step(&mut self, batch: &[Example]) -> f32 {
        (**self).train_step(batch)
    }

    fn loss(&self, batch: &[Example]) -> f32 {
        (**self).loss(batch)
    }
}
