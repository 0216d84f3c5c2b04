// grid.rs - Toroidal grid of cell states

use std::hash::{Hash, Hasher};

use crate::rules::{DEAD, RuleTable, StateIndex};
use crate::shapes::Shape;

// Compile-time panel geometry
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;

pub type TRow<const W: usize> = [StateIndex; W];

/// Fixed-size grid whose edges wrap. Cells are stored row-major and
/// addressed as `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<const W: usize = WIDTH, const H: usize = HEIGHT> {
    cells: [TRow<W>; H],
}

pub type PanelGrid = Grid<WIDTH, HEIGHT>;

impl<const W: usize, const H: usize> Default for Grid<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Grid<W, H> {
    /// All cells dead.
    pub fn new() -> Self {
        Self {
            cells: [[DEAD; W]; H],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> StateIndex {
        self.cells[y][x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, state: StateIndex) {
        self.cells[y][x] = state;
    }

    /// Reads a cell at any integer offset; both axes wrap.
    pub fn get_wrapped(&self, x: isize, y: isize) -> StateIndex {
        let x = x.rem_euclid(W as isize) as usize;
        let y = y.rem_euclid(H as isize) as usize;
        self.cells[y][x]
    }

    pub fn rows(&self) -> &[TRow<W>; H] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells = [[DEAD; W]; H];
    }

    /// The eight surrounding coordinates with toroidal wrap. Edge cells are
    /// not special beyond the wrap arithmetic.
    #[inline]
    pub fn neighbors(x: usize, y: usize) -> [(usize, usize); 8] {
        let left = if x == 0 { W - 1 } else { x - 1 };
        let right = if x == W - 1 { 0 } else { x + 1 };
        let up = if y == 0 { H - 1 } else { y - 1 };
        let down = if y == H - 1 { 0 } else { y + 1 };
        [
            (left, up),
            (x, up),
            (right, up),
            (left, y),
            (right, y),
            (left, down),
            (x, down),
            (right, down),
        ]
    }

    /// Number of neighbouring cells whose state counts as alive.
    #[inline]
    pub fn alive_neighbors(&self, rules: &RuleTable, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for (nx, ny) in Self::neighbors(x, y) {
            count += rules.is_alive(self.cells[ny][nx]) as u8;
        }
        count
    }

    /// Writes `state` under every live mask cell with the shape's top-left
    /// corner at `(x, y)`. Does not wrap: the shape must fit.
    pub fn stamp(&mut self, shape: &Shape, x: usize, y: usize, state: StateIndex) {
        debug_assert!(
            x + shape.width() <= W && y + shape.height() <= H,
            "shape `{}` at ({}, {}) does not fit a {}x{} grid",
            shape.name,
            x,
            y,
            W,
            H
        );
        for (sx, sy) in shape.live_cells() {
            self.cells[y + sy][x + sx] = state;
        }
    }

    /// True when every live mask cell holds `state` at origin `(x, y)`.
    pub fn matches_shape(&self, shape: &Shape, x: usize, y: usize, state: StateIndex) -> bool {
        shape
            .live_cells()
            .all(|(sx, sy)| self.get(x + sx, y + sy) == state)
    }

    /// Cells whose state has the alive flag.
    pub fn live_count(&self, rules: &RuleTable) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&state| rules.is_alive(state))
            .count()
    }

    /// Count of cells in each state, indexed by state.
    pub fn census(&self, rules: &RuleTable) -> Vec<usize> {
        let mut counts = vec![0; rules.len()];
        for &state in self.cells.iter().flatten() {
            counts[state as usize] += 1;
        }
        counts
    }

    pub fn hash_grid(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}
