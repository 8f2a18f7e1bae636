use indicatif::ProgressBar;
use uttt_types::{Mark, State};

use crate::{
    board::{Board, DEFAULT_SUB_SIZE},
    estimator::{Example, Mode, ValueEstimator},
    players::ValuePlayer,
};

/// Games of a value player against itself, recorded as training examples.
///
/// Every position is labelled with a temporal-difference target: the
/// estimate of the position moved `alpha` of the way towards the value of
/// the chosen continuation. The last position of a game gets its exact
/// outcome instead.
pub struct SelfPlay {
    games: u32,
    alpha: f32,
    epsilon: f64,
    sub_size: usize,
    progress: ProgressBar,
}

impl SelfPlay {
    #[must_use]
    pub fn new(games: u32) -> Self {
        Self {
            games,
            alpha: 0.2,
            epsilon: 0.2,
            sub_size: DEFAULT_SUB_SIZE,
            progress: ProgressBar::hidden(),
        }
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    #[must_use]
    pub fn with_epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    #[must_use]
    pub fn with_sub_size(self, sub_size: usize) -> Self {
        Self { sub_size, ..self }
    }

    #[must_use]
    pub fn with_progress(self, progress: ProgressBar) -> Self {
        Self { progress, ..self }
    }

    pub fn run<E: ValueEstimator>(&self, player: &mut ValuePlayer<E>) -> Vec<Example> {
        player.estimator_mut().set_mode(Mode::Inference);
        let mut data = Vec::new();
        self.progress.set_length(u64::from(self.games));
        self.progress.set_position(0);
        for game in 0..self.games {
            let before = data.len();
            self.play_game(player, &mut data);
            log::debug!(
                "self-play game {game}: {} positions",
                (data.len() - before) / 16
            );
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();
        data
    }

    fn play_game<E: ValueEstimator>(&self, player: &mut ValuePlayer<E>, data: &mut Vec<Example>) {
        let mut board = Board::with_sub_size(self.sub_size);
        loop {
            let state = board.state(Mark::Plus);
            if let Some(label) = board.outcome(Mark::Plus).label() {
                augment(&state, label, data);
                return;
            }

            let (action, next) = player.scored_action(&board, self.epsilon);
            let current = player.estimator().estimate(std::slice::from_ref(&state))[0];
            augment(&state, current + self.alpha * (next - current), data);
            board.play(action).flip();
        }
    }
}

/// Pushes the eight symmetries of `state` with `label`, each followed by
/// its negation with the complementary label.
fn augment(state: &State, label: f32, data: &mut Vec<Example>) {
    for sym in state.symmetries() {
        let negated = sym.negated();
        data.push(Example::new(sym, label));
        data.push(Example::new(negated, 1.0 - label));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedEstimator;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn sixteen_examples_per_position() {
        let mut player = ValuePlayer::new(ScriptedEstimator::constant(0.5), 0);
        let data = SelfPlay::new(1).run(&mut player);
        assert_eq!(data.len() % 16, 0);
        // A game lasts at least 17 plies, plus the final position
        assert!(data.len() / 16 >= 18, "{}", data.len());
    }

    #[test]
    fn augmentation_pairs() {
        let mut board = Board::new();
        board.play(uttt_types::Action::new(0, 1)).flip();
        let mut data = Vec::new();
        augment(&board.state(Mark::Plus), 0.7, &mut data);
        assert_eq!(data.len(), 16);
        for pair in data.chunks(2) {
            assert!(close(pair[0].label, 0.7));
            assert!(close(pair[1].label, 0.3));
            assert_eq!(pair[1].state, pair[0].state.negated());
        }
        // Second entry of the symmetry set is the untouched state
        assert_eq!(data[2].state, board.state(Mark::Plus));
    }

    #[test]
    fn bootstrapped_and_terminal_labels() {
        let mut player = ValuePlayer::new(ScriptedEstimator::constant(0.5), 5);
        let data = SelfPlay::new(3).with_alpha(0.2).with_epsilon(0.0).run(&mut player);
        let positives: Vec<f32> = data.iter().step_by(2).map(|e| e.label).collect();
        // 0.5 + 0.2 * (0.5 - 0.5), or 0.5 + 0.2 * (1.0 - 0.5) before a winning move,
        // or an exact terminal label
        assert!(positives
            .iter()
            .all(|&l| [0.5, 0.6, 0.0].into_iter().any(|v| close(l, v))));

        let last = &data[data.len() - 16..];
        assert!(last.iter().step_by(2).all(|e| e.label == 0.0 || e.label == 0.5));
        assert_eq!(player.estimator().modes, vec![Mode::Inference]);
    }

    #[test]
    fn exploration_keeps_games_legal() {
        let mut player = ValuePlayer::new(ScriptedEstimator::constant(0.1), 8);
        let data = SelfPlay::new(2).with_epsilon(1.0).run(&mut player);
        assert!(!data.is_empty());
        assert!(data.iter().all(|e| (0.0..=1.0).contains(&e.label)));
        assert!(player.estimator().batch_sizes().iter().all(|&b| b == 1));
    }
}
