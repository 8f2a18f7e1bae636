use serde::{Deserialize, Serialize};

use crate::Mark;

/// Status of one sub-board as summarised on the macro board.
///
/// `Won` and `Drawn` are final. `Open` and `Blocked` only say whether the
/// sub-board is a legal target for the next move and are recomputed
/// after every move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Open,
    Blocked,
    Won(Mark),
    Drawn,
}

impl Status {
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Status::Won(_) | Status::Drawn)
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Status::Open)
    }

    #[must_use]
    pub fn is_won_by(self, mark: Mark) -> bool {
        self == Status::Won(mark)
    }

    /// Same status seen from the other side of the table.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Status::Won(mark) => Status::Won(mark.opponent()),
            other => other,
        }
    }
}
