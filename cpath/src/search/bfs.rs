use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use super::{endpoints_open, path::reconstruct, Pathfinder, SearchError, SearchReport};
use crate::{dims::Dims, grid::Grid, progress::Flag};

/// Breadth-first search, shortest path by number of moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl Pathfinder for Bfs {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn search(
        &self,
        grid: &Grid,
        start: Dims,
        goal: Dims,
        stop: &Flag,
    ) -> Result<SearchReport, SearchError> {
        if !endpoints_open(grid, start, goal) {
            return Ok(SearchReport::default());
        }

        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        let mut predecessors = HashMap::new();
        let mut expanded = 0;

        // cells are marked when queued, so nothing gets queued twice
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if stop.is_stopped() {
                return Err(SearchError::Stopped);
            }
            expanded += 1;

            if current == goal {
                return Ok(SearchReport {
                    path: reconstruct(&predecessors, goal),
                    expanded,
                });
            }

            for next in grid.neighbors(current) {
                if visited.insert(next) {
                    predecessors.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        log::trace!("bfs exhausted {expanded} cells without reaching {goal:?}");
        Ok(SearchReport::unreachable(expanded))
    }
}
