use uttt_types::Action;

use crate::{board::Board, players::PlayerRng, Player};

#[derive(Debug, Clone, Default)]
pub struct RandomPlayer {
    rng: PlayerRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: PlayerRng::new(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn choose_action(&mut self, board: &Board) -> Action {
        self.rng
            .select_random(&board.valid_actions())
            .expect("game is not over")
    }
}
