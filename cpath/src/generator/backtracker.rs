use rand::seq::SliceRandom as _;

use super::{GeneratorError, MazeGenerator, Random};
use crate::{
    dims::Dims,
    grid::{Grid, Tile},
    progress::ProgressHandle,
};

const START: Dims = Dims(1, 1);

/// Randomized recursive backtracking, carving passages two cells at a time.
///
/// Open cells end up forming a spanning tree over the odd coordinates of the interior, so there
/// is exactly one simple path between any two of them. The recursion is unrolled into an explicit
/// stack, which keeps the visiting order but not the call depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveBacktracker;

struct Frame {
    pos: Dims,
    dirs: [Dims; 4],
    next: usize,
}

impl Frame {
    fn new(pos: Dims, rng: &mut Random) -> Self {
        let mut dirs = Dims::DIRECTIONS;
        dirs.shuffle(rng);
        Self { pos, dirs, next: 0 }
    }
}

impl MazeGenerator for RecursiveBacktracker {
    fn generate(
        &self,
        width: usize,
        height: usize,
        rng: &mut Random,
        progress: ProgressHandle,
    ) -> Result<Grid, GeneratorError> {
        let fits = |len: usize| len > 0 && i32::try_from(len).is_ok();
        if !fits(width) || !fits(height) || width.checked_mul(height).is_none() {
            return Err(GeneratorError::InvalidSize(width, height));
        }

        let mut grid = Grid::new_walls(width, height);
        progress.lock().from = self.guess_progress_complexity(width, height);

        if !grid.is_in_bounds(START) {
            log::debug!("{width}x{height} maze is too small to carve");
            progress.lock().finish();
            return Ok(grid);
        }

        grid.set(START, Tile::Open);
        let mut carved = 1;
        let mut stack = vec![Frame::new(START, rng)];

        while let Some(frame) = stack.last_mut() {
            let Some(&dir) = frame.dirs.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            let pos = frame.pos;
            let next = pos + dir * 2;
            if !grid.is_interior(next) || grid.is_open(next) {
                continue;
            }

            grid.set(pos + dir, Tile::Open);
            grid.set(next, Tile::Open);
            carved += 1;
            progress.lock().done = carved;

            if progress.is_stopped() {
                return Err(GeneratorError::Stopped);
            }

            stack.push(Frame::new(next, rng));
        }

        log::debug!("carved {carved} cells into {width}x{height} maze");
        progress.lock().finish();

        Ok(grid)
    }

    /// Count of odd interior coordinates, those are the cells the carve visits.
    fn guess_progress_complexity(&self, width: usize, height: usize) -> usize {
        let lattice = |len: usize| len.saturating_sub(1) / 2;
        (lattice(width) * lattice(height)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;

    fn carve(width: usize, height: usize, seed: u64) -> Grid {
        let mut rng = Random::seed_from_u64(seed);
        RecursiveBacktracker
            .generate(width, height, &mut rng, ProgressHandle::new())
            .unwrap()
    }

    #[test]
    fn mazes_are_perfect() {
        for (w, h) in [(5, 5), (7, 9), (20, 20), (6, 8), (31, 11)] {
            for seed in 0..10 {
                let grid = carve(w, h, seed);
                assert!(grid.is_perfect(), "{w}x{h} seed {seed}:\n{grid}");
            }
        }
    }

    #[test]
    fn every_lattice_cell_is_carved() {
        let grid = carve(11, 9, 7);
        let lattice = RecursiveBacktracker.guess_progress_complexity(11, 9);
        assert_eq!(lattice, 20);

        for pos in Dims::iter_fill(Dims::ZERO, grid.size()) {
            if pos.0 % 2 == 1 && pos.1 % 2 == 1 && grid.is_interior(pos) {
                assert!(grid.is_open(pos), "{pos:?} is not carved");
            }
            if pos.0 % 2 == 0 && pos.1 % 2 == 0 {
                assert!(grid.is_wall(pos), "{pos:?} is a pillar");
            }
        }

        // tree over the lattice: every cell but the first brings one corridor cell with it
        assert_eq!(grid.open_count(), lattice * 2 - 1);
    }

    #[test]
    fn border_stays_walled() {
        let grid = carve(12, 10, 3);
        let Dims(w, h) = grid.size();
        for pos in Dims::iter_fill(Dims::ZERO, grid.size()) {
            if pos.0 == 0 || pos.1 == 0 || pos.0 == w - 1 || pos.1 == h - 1 {
                assert!(grid.is_wall(pos));
            }
        }
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(carve(1, 1, 0).open_count(), 0);
        assert_eq!(carve(1, 7, 0).open_count(), 0);

        let grid = carve(2, 2, 0);
        assert_eq!(grid.open_cells().collect::<Vec<_>>(), vec![START]);

        let grid = carve(3, 3, 0);
        assert_eq!(grid.open_cells().collect::<Vec<_>>(), vec![START]);
    }

    #[test]
    fn reports_progress() {
        let mut rng = Random::seed_from_u64(1);
        let progress = ProgressHandle::new();
        RecursiveBacktracker
            .generate(9, 9, &mut rng, progress.clone())
            .unwrap();

        let progress = progress.progress();
        assert!(progress.is_done);
        assert_eq!(progress.from, 16);
        assert_eq!(progress.done, 16);
    }

    #[test]
    fn stops_when_flag_is_raised() {
        let mut rng = Random::seed_from_u64(1);
        let progress = ProgressHandle::new();
        progress.stop();

        let result = RecursiveBacktracker.generate(9, 9, &mut rng, progress);
        assert_eq!(result, Err(GeneratorError::Stopped));
    }
}
