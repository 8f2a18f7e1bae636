use itertools::Itertools;
use uttt_types::{Action, Mark, Outcome};

use crate::{board::Board, estimator::ValueEstimator, players::PlayerRng, Player};

/// One-ply lookahead over a value estimator.
///
/// Every candidate move is played on a copy of the board and the resulting
/// position is scored from the opponent's side. The move leaving the
/// opponent the lowest value wins; an immediate win short-circuits the
/// evaluation.
#[derive(Debug, Clone)]
pub struct ValuePlayer<E> {
    estimator: E,
    rng: PlayerRng,
    shuffle: bool,
}

impl<E: ValueEstimator> ValuePlayer<E> {
    pub fn new(estimator: E, seed: u64) -> Self {
        Self {
            estimator,
            rng: PlayerRng::new(seed),
            shuffle: true,
        }
    }

    /// Whether candidates are shuffled before scoring. Ties go to the first
    /// candidate, so without shuffling they go to the first legal action.
    #[must_use]
    pub fn with_shuffle(self, shuffle: bool) -> Self {
        Self { shuffle, ..self }
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn estimator_mut(&mut self) -> &mut E {
        &mut self.estimator
    }

    /// Chosen action and its estimated value for the mover. With probability
    /// `epsilon` the only candidate is a random legal action.
    pub fn scored_action(&mut self, board: &Board, epsilon: f64) -> (Action, f32) {
        let mut actions = board.valid_actions();
        assert!(!actions.is_empty(), "game is not over");
        if self.shuffle {
            self.rng.shuffle(&mut actions);
        }
        if self.rng.explore(epsilon) {
            let explored = self.rng.select_random(&actions).expect("at least one action");
            actions = vec![explored];
        }

        let mut next_states = Vec::with_capacity(actions.len());
        for &action in &actions {
            let mut next = board.clone();
            next.play(action);
            if next.outcome(Mark::Plus) == Outcome::Win {
                return (action, 1.0);
            }
            next_states.push(next.flip().state(Mark::Plus));
        }

        let values = self.estimator.estimate(&next_states);
        assert_eq!(values.len(), actions.len(), "one value per candidate");
        let best = values
            .iter()
            .position_min_by(|a, b| a.total_cmp(b))
            .expect("at least one value");
        (actions[best], 1.0 - values[best])
    }
}

impl<E: ValueEstimator> Player for ValuePlayer<E> {
    fn choose_action(&mut self, board: &Board) -> Action {
        self.scored_action(board, 0.0).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedEstimator;

    fn act(row: u8, col: u8) -> Action {
        Action::new(row, col)
    }

    #[test]
    fn picks_lowest_opponent_value() {
        // Opponent value grows with the index of the cell we just took
        let estimator = ScriptedEstimator::new(|state| {
            let idx = state.as_slice().iter().position(|&c| c == -1.0).unwrap();
            idx as f32 / 100.0
        });
        let mut player = ValuePlayer::new(estimator, 0);
        let (action, value) = player.scored_action(&Board::new(), 0.0);
        assert_eq!(action, act(0, 0));
        assert!((value - 1.0).abs() < 1e-6);
        assert_eq!(player.estimator().calls(), 1);
    }

    #[test]
    fn ties_go_to_first_candidate() {
        let mut player = ValuePlayer::new(ScriptedEstimator::constant(0.3), 9).with_shuffle(false);
        let mut board = Board::new();
        board.play(act(4, 4)).flip();
        let (action, value) = player.scored_action(&board, 0.0);
        assert_eq!(action, board.valid_actions()[0]);
        assert!((value - 0.7).abs() < 1e-6);
    }

    #[test]
    fn immediate_win_skips_estimator() {
        let mut board = Board::new();
        for u in [0, 1] {
            board.statuses_mut()[u] = uttt_types::Status::Won(Mark::Plus);
        }
        // Sub-board 2 is one move away from completing the macro row
        board.execute_move(act(0, 6), Mark::Plus);
        board.execute_move(act(0, 7), Mark::Plus);
        board.execute_move(act(5, 5), Mark::Minus);
        board.execute_move(act(3, 2), Mark::Minus);

        let mut player = ValuePlayer::new(ScriptedEstimator::constant(0.0), 4);
        let (action, value) = player.scored_action(&board, 0.0);
        assert_eq!(action, act(0, 8));
        assert_eq!(value, 1.0);
        assert_eq!(player.estimator().calls(), 0);
    }

    #[test]
    fn exploration_scores_single_candidate() {
        let mut player = ValuePlayer::new(ScriptedEstimator::constant(0.25), 2);
        let board = Board::new();
        let (action, value) = player.scored_action(&board, 1.0);
        assert!(board.is_valid_action(action));
        assert!((value - 0.75).abs() < 1e-6);
        assert_eq!(player.estimator().batch_sizes(), vec![1]);
    }

    #[test]
    fn scoring_leaves_board_alone() {
        let mut board = Board::new();
        board.play(act(2, 2)).flip();
        let before = board.clone();
        let mut player = ValuePlayer::new(ScriptedEstimator::constant(0.5), 1);
        let action = player.choose_action(&board);
        assert!(board.is_valid_action(action));
        assert_eq!(board, before);
        assert_eq!(player.estimator().batch_sizes(), vec![9]);
    }
}
