use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;

use super::{endpoints_open, path::reconstruct, Pathfinder, SearchError, SearchReport};
use crate::{dims::Dims, grid::Grid, progress::Flag};

/// A* with the Manhattan distance as heuristic.
///
/// Every move costs 1 and only axis moves exist, so the heuristic never overestimates and the
/// found path is as short as the one from [`super::Bfs`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

/// Queue entry. The same cell may be queued several times, entries whose `g` is worse than the
/// best known cost are skipped when popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: i32,
    g: i32,
    order: usize,
    pos: Dims,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed, `BinaryHeap` is a max-heap; equal `f` pops in insertion order
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn heuristic(from: Dims, to: Dims) -> i32 {
    from.manhattan(to)
}

impl Pathfinder for AStar {
    fn name(&self) -> &'static str {
        "astar"
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

        let mut open = BinaryHeap::new();
        let mut g_score = HashMap::new();
        let mut predecessors = HashMap::new();
        let mut order = 0;
        let mut expanded = 0;

        g_score.insert(start, 0);
        open.push(OpenNode {
            f: heuristic(start, goal),
            g: 0,
            order,
            pos: start,
        });

        while let Some(OpenNode { g, pos: current, .. }) = open.pop() {
            if stop.is_stopped() {
                return Err(SearchError::Stopped);
            }

            // stale entry, the cell was queued again with a better cost
            if g_score.get(&current).is_some_and(|&best| g > best) {
                continue;
            }
            expanded += 1;

            if current == goal {
                return Ok(SearchReport {
                    path: reconstruct(&predecessors, goal),
                    expanded,
                });
            }

            let tentative = g + 1;
            for next in grid.neighbors(current) {
                if g_score.get(&next).is_some_and(|&best| best <= tentative) {
                    continue;
                }

                g_score.insert(next, tentative);
                predecessors.insert(next, current);
                order += 1;
                open.push(OpenNode {
                    f: tentative + heuristic(next, goal),
                    g: tentative,
                    order,
                    pos: next,
                });
            }
        }

        log::trace!("astar exhausted {expanded} cells without reaching {goal:?}");
        Ok(SearchReport::unreachable(expanded))
    }
}
