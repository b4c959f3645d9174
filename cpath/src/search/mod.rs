//! Pathfinding over a [`Grid`].
//!
//! Both strategies move in the four axis directions with unit cost and return the shortest path,
//! or an empty one when the goal can't be reached. Every call allocates its own search state,
//! the grid is only read.

mod astar;
mod bfs;
mod path;

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{dims::Dims, grid::Grid, progress::Flag};
pub use astar::{heuristic, AStar};
pub use bfs::Bfs;
pub use path::{reconstruct, Path};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search was stopped")]
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchReport {
    pub path: Path,
    /// Cells taken from the frontier, including the goal.
    pub expanded: usize,
}

impl SearchReport {
    fn unreachable(expanded: usize) -> Self {
        Self {
            path: Path::empty(),
            expanded,
        }
    }
}

pub trait Pathfinder: fmt::Debug + Sync + Send {
    fn name(&self) -> &'static str;

    /// Searches for the shortest path, the stop flag is checked before each cell is expanded.
    ///
    /// When `start` or `goal` is a wall (or out of bounds) the search doesn't run at all and the
    /// path is empty.
    fn search(
        &self,
        grid: &Grid,
        start: Dims,
        goal: Dims,
        stop: &Flag,
    ) -> Result<SearchReport, SearchError>;

    fn find_report(&self, grid: &Grid, start: Dims, goal: Dims) -> SearchReport {
        // a fresh flag is never raised
        self.search(grid, start, goal, &Flag::new())
            .unwrap_or_default()
    }

    fn find_path(&self, grid: &Grid, start: Dims, goal: Dims) -> Path {
        self.find_report(grid, start, goal).path
    }
}

fn endpoints_open(grid: &Grid, start: Dims, goal: Dims) -> bool {
    grid.is_open(start) && grid.is_open(goal)
}

/// Pathfinding strategy selector, parsed from `"bfs"` or `"astar"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Algorithm {
    #[default]
    Bfs,
    AStar,
}

impl Algorithm {
    /// Anything but exactly `astar` selects BFS.
    pub fn from_name(name: &str) -> Self {
        if name == "astar" {
            Algorithm::AStar
        } else {
            Algorithm::Bfs
        }
    }

    pub fn pathfinder(self) -> &'static dyn Pathfinder {
        match self {
            Algorithm::Bfs => &Bfs,
            Algorithm::AStar => &AStar,
        }
    }

    pub fn name(self) -> &'static str {
        self.pathfinder().name()
    }
}

impl FromStr for Algorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for Algorithm {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.name().to_string()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finds the path with the selected strategy.
pub fn find_path(grid: &Grid, start: Dims, goal: Dims, algorithm: Algorithm) -> Path {
    algorithm.pathfinder().find_path(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;
    use rand::{Rng as _, SeedableRng as _};

    use super::*;
    use crate::{
        array::Array2D,
        generator::{generate_seeded, Random},
        grid::Tile,
    };

    const STRATEGIES: [Algorithm; 2] = [Algorithm::Bfs, Algorithm::AStar];

    fn barrier() -> Grid {
        "
        ..#..
        ..#..
        ..#..
        ..#..
        .....
        "
        .parse()
        .unwrap()
    }

    /// Shortest distances (in cells) from `start` found by enumerating every simple path.
    fn exhaustive_lengths(grid: &Grid, start: Dims) -> HashMap<Dims, usize> {
        fn walk(
            grid: &Grid,
            pos: Dims,
            len: usize,
            on_path: &mut Array2D<bool>,
            best: &mut HashMap<Dims, usize>,
        ) {
            let entry = best.entry(pos).or_insert(len);
            *entry = (*entry).min(len);

            for next in grid.neighbors(pos) {
                if !on_path[next] {
                    on_path[next] = true;
                    walk(grid, next, len + 1, on_path, best);
                    on_path[next] = false;
                }
            }
        }

        let mut best = HashMap::new();
        if grid.is_open(start) {
            let mut on_path = Array2D::new(false, grid.width(), grid.height());
            on_path[start] = true;
            walk(grid, start, 1, &mut on_path, &mut best);
        }
        best
    }

    fn random_grid(rng: &mut Random, width: usize, height: usize) -> Grid {
        let mut grid = Grid::new_open(width, height);
        for pos in Dims::iter_fill(Dims::ZERO, grid.size()) {
            if rng.gen_bool(0.3) {
                grid.set(pos, Tile::Wall);
            }
        }
        grid
    }

    #[test]
    fn detours_through_the_gap() {
        let grid = barrier();
        let (start, goal) = (Dims(0, 0), Dims(4, 0));

        for algorithm in STRATEGIES {
            let path = find_path(&grid, start, goal, algorithm);
            assert!(path.is_walk_on(&grid, start, goal), "{algorithm}");
            assert!(path.contains(Dims(2, 4)), "{algorithm}");
            // 6 moves down and across to the gap, 6 moves back up to the goal
            assert_eq!(path.len(), 13, "{algorithm}");
        }
    }

    #[test]
    fn open_grid_diagonal() {
        let grid = Grid::new_open(3, 3);
        let (start, goal) = (Dims(0, 0), Dims(2, 2));

        for algorithm in STRATEGIES {
            let path = find_path(&grid, start, goal, algorithm);
            assert_eq!(path.len(), 5, "{algorithm}");
            assert!(path.is_walk_on(&grid, start, goal), "{algorithm}");
        }
    }

    #[test]
    fn wall_endpoints_give_empty_path() {
        let grid = barrier();
        for algorithm in STRATEGIES {
            assert!(find_path(&grid, Dims(2, 0), Dims(4, 0), algorithm).is_empty());
            assert!(find_path(&grid, Dims(0, 0), Dims(2, 3), algorithm).is_empty());

            let report = algorithm
                .pathfinder()
                .find_report(&grid, Dims(2, 1), Dims(2, 1));
            assert_eq!(report, SearchReport::default());
        }
    }

    #[test]
    fn out_of_bounds_endpoints_give_empty_path() {
        let grid = Grid::new_open(3, 3);
        for algorithm in STRATEGIES {
            assert!(find_path(&grid, Dims(-1, 0), Dims(2, 2), algorithm).is_empty());
            assert!(find_path(&grid, Dims(0, 0), Dims(3, 2), algorithm).is_empty());
        }
    }

    #[test]
    fn start_is_goal() {
        let grid = barrier();
        for algorithm in STRATEGIES {
            let path = find_path(&grid, Dims(3, 2), Dims(3, 2), algorithm);
            assert_eq!(path.cells(), &[Dims(3, 2)]);
        }
    }

    #[test]
    fn unreachable_goal() {
        let grid: Grid = "
            ..#..
            ..#..
            ..#..
        "
        .parse()
        .unwrap();

        for algorithm in STRATEGIES {
            let report = algorithm
                .pathfinder()
                .find_report(&grid, Dims(0, 0), Dims(4, 2));
            assert!(report.path.is_empty());
            // the whole left side was searched
            assert_eq!(report.expanded, 6);
        }
    }

    #[test]
    fn matches_exhaustive_search() {
        let mut rng = Random::seed_from_u64(0xC0FFEE);

        for _ in 0..8 {
            let grid = random_grid(&mut rng, 4, 4);
            let open: Vec<_> = grid.open_cells().collect();

            for &start in &open {
                let lengths = exhaustive_lengths(&grid, start);
                for &goal in &open {
                    let bfs = find_path(&grid, start, goal, Algorithm::Bfs);
                    let astar = find_path(&grid, start, goal, Algorithm::AStar);

                    match lengths.get(&goal) {
                        Some(&len) => {
                            assert_eq!(bfs.len(), len, "bfs {start:?} -> {goal:?}\n{grid}");
                            assert_eq!(astar.len(), len, "astar {start:?} -> {goal:?}\n{grid}");
                            assert!(bfs.is_walk_on(&grid, start, goal));
                            assert!(astar.is_walk_on(&grid, start, goal));
                        }
                        None => {
                            assert!(bfs.is_empty());
                            assert!(astar.is_empty());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn strategies_agree_on_generated_mazes() {
        for seed in 0..5 {
            let grid = generate_seeded(31, 21, seed).unwrap();
            let start = Dims(1, 1);
            let goal = Dims(29, 19);

            let bfs = Bfs.find_report(&grid, start, goal);
            let astar = AStar.find_report(&grid, start, goal);

            assert!(bfs.path.is_walk_on(&grid, start, goal));
            // a perfect maze has exactly one simple path
            assert_eq!(bfs.path, astar.path);
            assert!(astar.expanded <= bfs.expanded);
        }
    }

    #[test]
    fn astar_expands_less_in_the_open() {
        let grid = Grid::new_open(15, 15);
        let (start, goal) = (Dims(0, 7), Dims(14, 7));

        let bfs = Bfs.find_report(&grid, start, goal);
        let astar = AStar.find_report(&grid, start, goal);

        assert_eq!(bfs.path.len(), astar.path.len());
        assert!(astar.expanded < bfs.expanded);
    }

    #[test]
    fn stopped_search() {
        let grid = Grid::new_open(4, 4);
        let stop = Flag::new();
        stop.stop();

        for algorithm in STRATEGIES {
            let result = algorithm
                .pathfinder()
                .search(&grid, Dims(0, 0), Dims(3, 3), &stop);
            assert_eq!(result, Err(SearchError::Stopped));
        }
    }

    #[test]
    fn algorithm_names() {
        assert_eq!(Algorithm::from_name("astar"), Algorithm::AStar);
        assert_eq!(Algorithm::from_name("AStar"), Algorithm::Bfs);
        assert_eq!(Algorithm::from_name(" astar "), Algorithm::Bfs);
        assert_eq!(Algorithm::from_name("bfs"), Algorithm::Bfs);
        assert_eq!(Algorithm::from_name("dijkstra"), Algorithm::Bfs);
        assert_eq!(Algorithm::from_name(""), Algorithm::Bfs);
        assert_eq!("astar".parse::<Algorithm>(), Ok(Algorithm::AStar));

        assert_eq!(Algorithm::AStar.to_string(), "astar");
        assert_eq!(Algorithm::Bfs.name(), "bfs");
    }

    #[test]
    fn algorithm_serde() {
        let algo: Algorithm = serde_json::from_str(r#""astar""#).unwrap();
        assert_eq!(algo, Algorithm::AStar);
        let algo: Algorithm = serde_json::from_str(r#""greedy""#).unwrap();
        assert_eq!(algo, Algorithm::Bfs);
        assert_eq!(serde_json::to_string(&Algorithm::AStar).unwrap(), r#""astar""#);
    }
}
