use uttt_types::{Action, Mark};

use crate::{board::Board, players::PlayerRng, Player};

/// Takes a sub-board whenever one move wins it, otherwise plays at random.
/// Only local wins are looked for, never the macro board.
#[derive(Debug, Clone, Default)]
pub struct GreedyPlayer {
    rng: PlayerRng,
}

impl GreedyPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: PlayerRng::new(seed),
        }
    }

    fn wins_locally(board: &Board, action: Action) -> bool {
        let mut trial = board.clone();
        trial.play(action);
        trial
            .micro_board(action.sub_board(board.sub_size()))
            .is_win(Mark::Plus)
    }
}

impl Player for GreedyPlayer {
    fn choose_action(&mut self, board: &Board) -> Action {
        let mut actions = board.valid_actions();
        assert!(!actions.is_empty(), "game is not over");
        self.rng.shuffle(&mut actions);
        if let Some(&action) = actions.iter().find(|&&a| Self::wins_locally(board, a)) {
            return action;
        }
        self.rng
            .select_random(&actions)
            .expect("at least one action")
    }
}
