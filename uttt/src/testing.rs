//! Test doubles shared by the unit tests.

use std::{cell::RefCell, rc::Rc};

use uttt_types::{Action, State};

use crate::{
    board::Board,
    estimator::{Example, Mode, ValueEstimator},
    Player,
};

/// Estimator driven by a closure that remembers how it was called.
#[derive(Clone)]
pub struct ScriptedEstimator {
    value: Rc<dyn Fn(&State) -> f32>,
    batches: RefCell<Vec<usize>>,
    pub modes: Vec<Mode>,
    pub trained: Vec<usize>,
}

impl ScriptedEstimator {
    pub fn new(value: impl Fn(&State) -> f32 + 'static) -> Self {
        Self {
            value: Rc::new(value),
            batches: RefCell::new(Vec::new()),
            modes: Vec::new(),
            trained: Vec::new(),
        }
    }

    pub fn constant(value: f32) -> Self {
        Self::new(move |_| value)
    }

    pub fn calls(&self) -> usize {
        self.batches.borrow().len()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.borrow().clone()
    }
}

impl ValueEstimator for ScriptedEstimator {
    fn estimate(&self, states: &[State]) -> Vec<f32> {
        self.batches.borrow_mut().push(states.len());
        states.iter().map(|s| (self.value)(s)).collect()
    }

    fn set_mode(&mut self, mode: Mode) {
        self.modes.push(mode);
    }

    fn train_step(&mut self, batch: &[Example]) -> f32 {
        self.trained.push(batch.len());
        self.loss(batch)
    }

    fn loss(&self, batch: &[Example]) -> f32 {
        let total: f32 = batch
            .iter()
            .map(|e| ((self.value)(&e.state) - e.label).powi(2))
            .sum();
        total / batch.len() as f32
    }
}

/// Wraps a player and records the move number of every position it was asked about.
#[derive(Clone)]
pub struct Recorder<P> {
    inner: P,
    pub seen: Vec<u32>,
    first: Option<bool>,
}

impl<P: Player> Recorder<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            seen: Vec::new(),
            first: None,
        }
    }

    /// Behaves like a human who always gives the same answer to "go first?".
    pub fn interactive(inner: P, first: bool) -> Self {
        Self {
            first: Some(first),
            ..Self::new(inner)
        }
    }

    /// Per game, whether this player made the opening move.
    pub fn openings(&self) -> Vec<bool> {
        self.seen
            .iter()
            .filter(|&&m| m <= 1)
            .map(|&m| m == 0)
            .collect()
    }
}

impl<P: Player> Player for Recorder<P> {
    fn choose_action(&mut self, board: &Board) -> Action {
        self.seen.push(board.move_count);
        self.inner.choose_action(board)
    }

    fn is_interactive(&self) -> bool {
        self.first.is_some()
    }

    fn asks_to_move_first(&mut self) -> bool {
        self.first.unwrap_or(false)
    }
}
