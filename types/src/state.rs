use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Square single-channel array handed to the value estimator.
/// Entries are `+1` for the perspective owner, `-1` for the opponent and `0` for empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    side: usize,
    cells: Vec<f32>,
}

impl State {
    #[must_use]
    pub fn new(side: usize, cells: Vec<f32>) -> Self {
        assert_eq!(cells.len(), side * side, "state must be square");
        Self { side, cells }
    }

    #[must_use]
    pub fn zeros(side: usize) -> Self {
        Self::new(side, vec![0.0; side * side])
    }

    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[row * self.side + col]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            side: self.side,
            cells: self.cells.iter().map(|c| -c).collect(),
        }
    }

    /// Quarter turn counter-clockwise.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let n = self.side;
        self.remap(|row, col| (col, n - 1 - row))
    }

    /// Reverses the order of the columns.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let n = self.side;
        self.remap(|row, col| (row, n - 1 - col))
    }

    /// The eight dihedral images: for each quarter turn, the mirrored image
    /// followed by the plain one. Index 1 is the identity.
    #[must_use]
    pub fn symmetries(&self) -> SmallVec<State, 8> {
        let mut syms = SmallVec::new();
        let mut turned = self.clone();
        for _ in 0..4 {
            syms.push(turned.mirrored());
            let next = turned.rotated();
            syms.push(turned);
            turned = next;
        }
        syms
    }

    // Output cell (row, col) reads input cell `source(row, col)`.
    fn remap(&self, source: impl Fn(usize, usize) -> (usize, usize)) -> Self {
        let n = self.side;
        let mut cells = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let (r, c) = source(row, col);
                cells.push(self.cells[r * n + c]);
            }
        }
        Self { side: n, cells }
    }
}
