use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cell of the full board, addressed by row and column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize,
)]
pub struct Action {
    pub row: u8,
    pub col: u8,
}

impl Action {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index of the sub-board containing this cell.
    #[must_use]
    pub const fn sub_board(self, sub_size: usize) -> usize {
        (self.row as usize / sub_size) * sub_size + self.col as usize / sub_size
    }

    /// Row-major position of this cell inside its sub-board.
    /// This is also the index of the sub-board the opponent is sent to.
    #[must_use]
    pub const fn position(self, sub_size: usize) -> usize {
        (self.row as usize % sub_size) * sub_size + self.col as usize % sub_size
    }

    /// Row-major index into the full (n·n)×(n·n) grid.
    #[must_use]
    pub const fn index(self, side: usize) -> usize {
        self.row as usize * side + self.col as usize
    }
}

impl From<(u8, u8)> for Action {
    fn from((row, col): (u8, u8)) -> Self {
        Self::new(row, col)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseActionError {
    #[error("expected two coordinates, got {0:?}")]
    Arity(String),
    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
}

impl FromStr for Action {
    type Err = ParseActionError;

    /// Accepts `"row col"` or `"row,col"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        let [row, col] = parts.as_slice() else {
            return Err(ParseActionError::Arity(s.trim().to_owned()));
        };
        let coordinate = |p: &str| {
            p.parse::<u8>()
                .map_err(|_| ParseActionError::Coordinate(p.to_owned()))
        };
        Ok(Self::new(coordinate(*row)?, coordinate(*col)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_board_and_position() {
        let action = Action::new(4, 7);
        assert_eq!(action.sub_board(3), 5);
        assert_eq!(action.position(3), 4);
        assert_eq!(action.index(9), 43);

        let corner = Action::new(8, 8);
        assert_eq!(corner.sub_board(3), 8);
        assert_eq!(corner.position(3), 8);
    }

    #[test]
    fn parse() {
        assert_eq!("3 5".parse::<Action>(), Ok(Action::new(3, 5)));
        assert_eq!(" 0,8 \n".parse::<Action>(), Ok(Action::new(0, 8)));
        assert_eq!("2, 2".parse::<Action>(), Ok(Action::new(2, 2)));
        assert!(matches!(
            "1".parse::<Action>(),
            Err(ParseActionError::Arity(_))
        ));
        assert!(matches!(
            "1 2 3".parse::<Action>(),
            Err(ParseActionError::Arity(_))
        ));
        assert_eq!(
            "a 2".parse::<Action>(),
            Err(ParseActionError::Coordinate("a".to_owned()))
        );
        assert_eq!(
            "-1 2".parse::<Action>(),
            Err(ParseActionError::Coordinate("-1".to_owned()))
        );
    }

    #[test]
    fn display_parses_back() {
        let action = Action::new(6, 1);
        assert_eq!(action.to_string().parse::<Action>(), Ok(action));
    }
}
