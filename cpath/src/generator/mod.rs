mod backtracker;

use std::fmt;

use rand::{thread_rng, Rng as _, SeedableRng as _};
use thiserror::Error;

use crate::{grid::Grid, progress::ProgressHandle};
pub use backtracker::RecursiveBacktracker;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid maze size {0}x{1}")]
    InvalidSize(usize, usize),
    #[error("generation was stopped")]
    Stopped,
}

pub trait MazeGenerator: fmt::Debug + Sync + Send {
    fn generate(
        &self,
        width: usize,
        height: usize,
        rng: &mut Random,
        progress: ProgressHandle,
    ) -> Result<Grid, GeneratorError>;

    /// Number of steps reported through the progress handle for the given size.
    fn guess_progress_complexity(&self, width: usize, height: usize) -> usize {
        width * height
    }
}

pub fn random_seed() -> u64 {
    thread_rng().gen()
}

/// Generates a perfect maze with a random seed.
pub fn generate(width: usize, height: usize) -> Result<Grid, GeneratorError> {
    generate_seeded(width, height, random_seed())
}

/// Generates a perfect maze, the same seed and size always produce the same maze.
pub fn generate_seeded(width: usize, height: usize, seed: u64) -> Result<Grid, GeneratorError> {
    generate_with_progress(width, height, seed, ProgressHandle::new())
}

/// Like [`generate_seeded`], reporting into `progress`, which may be watched from another thread.
pub fn generate_with_progress(
    width: usize,
    height: usize,
    seed: u64,
    progress: ProgressHandle,
) -> Result<Grid, GeneratorError> {
    let mut rng = Random::seed_from_u64(seed);
    RecursiveBacktracker.generate(width, height, &mut rng, progress)
}
