use std::{path::PathBuf, str::FromStr};

use uttt_types::Action;

use crate::{board::Board, Error};

pub mod greedy;
pub mod human;
pub mod lookahead;
pub mod random;
pub mod rng;

pub use greedy::GreedyPlayer;
pub use human::HumanPlayer;
pub use lookahead::ValuePlayer;
pub use random::RandomPlayer;
pub use rng::PlayerRng;

/// File extension of value network checkpoints.
pub const CHECKPOINT_EXTENSION: &str = "mpk";

pub trait Player {
    /// Picks a legal action for the player owning `Mark::Plus`. The game must not be over.
    ///
    /// `self` is mutable for random state only.
    fn choose_action(&mut self, board: &Board) -> Action;

    /// Interactive players pick the starting order and force the board to be shown.
    fn is_interactive(&self) -> bool {
        false
    }

    fn asks_to_move_first(&mut self) -> bool {
        false
    }
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn choose_action(&mut self, board: &Board) -> Action {
        (**self).choose_action(board)
    }

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }

    fn asks_to_move_first(&mut self) -> bool {
        (**self).asks_to_move_first()
    }
}

/// Player selected by name on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerKind {
    Random,
    Greedy,
    Human,
    /// Value network with fresh parameters.
    Model,
    /// Value network restored from a checkpoint file.
    Checkpoint(PathBuf),
}

impl FromStr for PlayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.ends_with(&format!(".{CHECKPOINT_EXTENSION}")) {
            return Ok(PlayerKind::Checkpoint(PathBuf::from(s)));
        }
        match s {
            "random" => Ok(PlayerKind::Random),
            "greedy" => Ok(PlayerKind::Greedy),
            "human" => Ok(PlayerKind::Human),
            "model" => Ok(PlayerKind::Model),
            other => Err(Error::UnknownPlayer(other.to_owned())),
        }
    }
}
