use std::fmt::Display;

use itertools::iproduct;
use smallvec::SmallVec;
use uttt_types::{Action, Mark, Outcome, State, Status, ALL_MARKS};

pub const DEFAULT_SUB_SIZE: usize = 3;

/// Canonical game position, always stored from the point of view of the
/// player about to move: that player owns `Mark::Plus`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    sub_size: usize,
    pub move_count: u32,
    cells: Vec<Option<Mark>>,
    statuses: Vec<Status>,
}

/// Copy of one sub-board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MicroBoard {
    sub_size: usize,
    cells: Vec<Option<Mark>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::with_sub_size(DEFAULT_SUB_SIZE)
    }

    #[must_use]
    pub fn with_sub_size(sub_size: usize) -> Self {
        assert!(sub_size >= 2, "sub-boards need at least two cells per side");
        let side = sub_size * sub_size;
        assert!(side <= usize::from(u8::MAX), "board too large for u8 coordinates");
        Self {
            sub_size,
            move_count: 0,
            cells: vec![None; side * side],
            statuses: vec![Status::Open; sub_size * sub_size],
        }
    }

    #[must_use]
    pub const fn sub_size(&self) -> usize {
        self.sub_size
    }

    /// Edge length of the full grid.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.sub_size * self.sub_size
    }

    #[must_use]
    pub fn cell(&self, action: Action) -> Option<Mark> {
        self.cells[action.index(self.side())]
    }

    #[must_use]
    pub fn status(&self, sub_board: usize) -> Status {
        self.statuses[sub_board]
    }

    #[must_use]
    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    #[cfg(test)]
    pub(crate) fn statuses_mut(&mut self) -> &mut [Status] {
        &mut self.statuses
    }

    /// Legal targets: empty cells of open sub-boards, sub-boards in
    /// row-major order and cells row-major inside each sub-board.
    #[must_use]
    pub fn valid_actions(&self) -> Vec<Action> {
        let n = self.sub_size;
        let mut actions = Vec::new();
        for (ur, uc) in iproduct!(0..n, 0..n) {
            if !self.statuses[ur * n + uc].is_open() {
                continue;
            }
            for (row, col) in iproduct!(ur * n..(ur + 1) * n, uc * n..(uc + 1) * n) {
                if self.cells[row * self.side() + col].is_none() {
                    // Fits: side is checked against u8::MAX on construction
                    #[allow(clippy::cast_possible_truncation)]
                    actions.push(Action::new(row as u8, col as u8));
                }
            }
        }
        actions
    }

    #[must_use]
    pub fn is_valid_action(&self, action: Action) -> bool {
        let side = self.side();
        usize::from(action.row) < side
            && usize::from(action.col) < side
            && self.cell(action).is_none()
            && self.statuses[action.sub_board(self.sub_size)].is_open()
    }

    /// Places `mover`'s mark on `action` and updates the macro board.
    ///
    /// The cell must be empty. A sub-board that is filled and won by the
    /// same move is recorded as won.
    pub fn execute_move(&mut self, action: Action, mover: Mark) -> &mut Self {
        let n = self.sub_size;
        let idx = action.index(self.side());
        assert!(self.cells[idx].is_none(), "cell {action} is already taken");
        self.cells[idx] = Some(mover);

        let u = action.sub_board(n);
        let v = action.position(n);
        if !self.statuses[u].is_resolved() {
            let micro = self.micro_board(u);
            if micro.is_full() {
                self.statuses[u] = Status::Drawn;
            }
            for mark in ALL_MARKS {
                if micro.is_win(mark) {
                    self.statuses[u] = Status::Won(mark);
                }
            }
        }

        // Sent to `v`, or anywhere when `v` is already decided
        let free_choice = self.statuses[v].is_resolved();
        for (w, status) in self.statuses.iter_mut().enumerate() {
            if !status.is_resolved() {
                *status = if free_choice || w == v {
                    Status::Open
                } else {
                    Status::Blocked
                };
            }
        }

        self.move_count += 1;
        self
    }

    /// Plays `action` for the player to move.
    pub fn play(&mut self, action: Action) -> &mut Self {
        self.execute_move(action, Mark::Plus)
    }

    /// Whether `mark` owns a full line of sub-boards.
    #[must_use]
    pub fn is_win(&self, mark: Mark) -> bool {
        has_line(self.sub_size, |i| self.statuses[i].is_won_by(mark))
    }

    /// Whether every sub-board is decided.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.statuses.iter().all(|s| s.is_resolved())
    }

    #[must_use]
    pub fn outcome(&self, mark: Mark) -> Outcome {
        if self.is_win(mark) {
            Outcome::Win
        } else if self.is_win(mark.opponent()) {
            Outcome::Loss
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome(Mark::Plus).is_over()
    }

    /// Hands the position to the other player.
    pub fn flip(&mut self) -> &mut Self {
        for cell in self.cells.iter_mut().flatten() {
            *cell = cell.opponent();
        }
        for status in &mut self.statuses {
            *status = status.flipped();
        }
        self
    }

    #[must_use]
    pub fn state(&self, mark: Mark) -> State {
        let cells = self
            .cells
            .iter()
            .map(|cell| cell.map_or(0.0, |m| m.value() * mark.value()))
            .collect();
        State::new(self.side(), cells)
    }

    #[must_use]
    pub fn symmetries(&self, mark: Mark) -> SmallVec<State, 8> {
        self.state(mark).symmetries()
    }

    #[must_use]
    pub fn micro_board(&self, sub_board: usize) -> MicroBoard {
        let n = self.sub_size;
        let (ur, uc) = (sub_board / n, sub_board % n);
        let cells = iproduct!(ur * n..(ur + 1) * n, uc * n..(uc + 1) * n)
            .map(|(row, col)| self.cells[row * self.side() + col])
            .collect();
        MicroBoard {
            sub_size: n,
            cells,
        }
    }
}

impl MicroBoard {
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells[row * self.sub_size + col]
    }

    #[must_use]
    pub fn is_win(&self, mark: Mark) -> bool {
        has_line(self.sub_size, |i| self.cells[i] == Some(mark))
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn outcome(&self, mark: Mark) -> Outcome {
        if self.is_win(mark) {
            Outcome::Win
        } else if self.is_win(mark.opponent()) {
            Outcome::Loss
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }
}

// Rows, columns and both diagonals of an n×n grid indexed row-major.
fn has_line(n: usize, owns: impl Fn(usize) -> bool) -> bool {
    let row = (0..n).any(|r| (0..n).all(|c| owns(r * n + c)));
    let col = (0..n).any(|c| (0..n).all(|r| owns(r * n + c)));
    let diagonal = (0..n).all(|i| owns(i * n + i));
    let anti_diagonal = (0..n).all(|i| owns(i * n + n - 1 - i));
    row || col || diagonal || anti_diagonal
}

impl Display for Board {
    /// `X` is whoever moved first, regardless of whose turn it is.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.sub_size;
        let side = self.side();
        let first = if self.move_count % 2 == 0 {
            Mark::Plus
        } else {
            Mark::Minus
        };
        let width = side.to_string().len();
        let separator = vec!["-".repeat(n * (width + 1) + 1); n].join("+");

        writeln!(f, "Move number {}", self.move_count)?;
        write!(f, "{:width$}  ", "")?;
        for col in 0..side {
            if col > 0 && col % n == 0 {
                write!(f, "  ")?;
            }
            write!(f, " {col:>width$}")?;
        }
        writeln!(f)?;
        for row in 0..side {
            if row > 0 && row % n == 0 {
                writeln!(f, "{:width$}  {separator}", "")?;
            }
            write!(f, "{row:>width$}  ")?;
            for col in 0..side {
                if col > 0 && col % n == 0 {
                    write!(f, " |")?;
                }
                let symbol = match self.cells[row * side + col] {
                    None => '.',
                    Some(mark) if mark == first => 'X',
                    Some(_) => 'O',
                };
                write!(f, " {symbol:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
