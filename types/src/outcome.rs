use serde::{Deserialize, Serialize};

/// Result of a position from the point of view of one mark.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Ongoing,
    Win,
    Loss,
    Draw,
}

impl Outcome {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Training target for a finished game, `None` while it is still running.
    #[must_use]
    pub const fn label(self) -> Option<f32> {
        match self {
            Outcome::Ongoing => None,
            Outcome::Win => Some(1.0),
            Outcome::Draw => Some(0.5),
            Outcome::Loss => Some(0.0),
        }
    }
}
