use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// One side's mark. The player about to move always owns `Plus`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Mark {
    Plus,
    Minus,
}

pub const ALL_MARKS: [Mark; 2] = [Mark::Plus, Mark::Minus];

impl Mark {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Mark::Plus => Mark::Minus,
            Mark::Minus => Mark::Plus,
        }
    }

    #[must_use]
    pub const fn value(self) -> f32 {
        match self {
            Mark::Plus => 1.0,
            Mark::Minus => -1.0,
        }
    }
}
