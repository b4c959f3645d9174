use hashbrown::{HashMap, HashSet};

use crate::{dims::Dims, grid::Grid};

/// Ordered cells from the start to the goal. Empty when the goal can't be reached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path(Vec<Dims>);

impl Path {
    pub fn new(cells: Vec<Dims>) -> Self {
        Self(cells)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Dims] {
        &self.0
    }

    pub fn into_cells(self) -> Vec<Dims> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn start(&self) -> Option<Dims> {
        self.0.first().copied()
    }

    pub fn goal(&self) -> Option<Dims> {
        self.0.last().copied()
    }

    /// Number of moves, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn contains(&self, pos: Dims) -> bool {
        self.0.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dims> {
        self.0.iter()
    }

    /// Checks that the path walks from `start` to `goal` over open, 4-adjacent cells without
    /// visiting any cell twice.
    pub fn is_walk_on(&self, grid: &Grid, start: Dims, goal: Dims) -> bool {
        if self.start() != Some(start) || self.goal() != Some(goal) {
            return false;
        }

        let mut seen = HashSet::with_capacity(self.len());
        let cells_ok = self.0.iter().all(|&pos| grid.is_open(pos) && seen.insert(pos));

        cells_ok && self.0.windows(2).all(|pair| pair[0].is_adjacent(pair[1]))
    }
}

impl IntoIterator for Path {
    type Item = Dims;
    type IntoIter = std::vec::IntoIter<Dims>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<Dims>> for Path {
    fn from(cells: Vec<Dims>) -> Self {
        Self(cells)
    }
}

/// Walks the predecessor map back from `goal` until a cell without predecessor (the start).
pub fn reconstruct(predecessors: &HashMap<Dims, Dims>, goal: Dims) -> Path {
    let mut cells = vec![goal];
    let mut current = goal;
    while let Some(&prev) = predecessors.get(&current) {
        cells.push(prev);
        current = prev;
    }

    cells.reverse();
    Path(cells)
}
