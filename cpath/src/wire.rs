//! Request and response types spoken with the visual client.
//!
//! A maze travels as a row-major matrix of `0` (open) and `1` (wall), cells as `{"x": .., "y": ..}`
//! objects.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    dims::Dims,
    generator::{self, GeneratorError},
    grid::{Grid, GridError},
    search::{Algorithm, Path},
};

/// Size used for a missing or zero dimension in [`MazeRequest`].
pub const DEFAULT_SIZE: usize = 20;

/// Largest width or height a maze may be generated with.
pub const MAX_SIZE: usize = 4096;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("invalid maze: {0}")]
    Grid(#[from] GridError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error("maze of {width}x{height} is too large, sides are limited to {max}")]
    TooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("{name} {point:?} is outside of the {width}x{height} maze")]
    OutOfBounds {
        name: &'static str,
        point: Point,
        width: usize,
        height: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(alias = "X")]
    pub x: i32,
    #[serde(alias = "Y")]
    pub y: i32,
}

impl From<Dims> for Point {
    fn from(Dims(x, y): Dims) -> Self {
        Point { x, y }
    }
}

impl From<Point> for Dims {
    fn from(Point { x, y }: Point) -> Self {
        Dims(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MazeRequest {
    #[serde(default)]
    pub width: usize,
    #[serde(default)]
    pub height: usize,
    /// Fixed seed, for reproducible mazes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl MazeRequest {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seed: None,
        }
    }

    /// Width and height, with zeros replaced by [`DEFAULT_SIZE`].
    pub fn size(&self) -> (usize, usize) {
        let or_default = |len: usize| if len == 0 { DEFAULT_SIZE } else { len };
        (or_default(self.width), or_default(self.height))
    }

    /// Replaces zero dimensions with the given ones.
    pub fn fill_defaults(mut self, width: usize, height: usize) -> Self {
        if self.width == 0 {
            self.width = width;
        }
        if self.height == 0 {
            self.height = height;
        }
        self
    }
}

pub type MazeResponse = Vec<Vec<u8>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest {
    pub maze: Vec<Vec<u8>>,
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub algo: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathResponse {
    pub path: Vec<Point>,
}

impl From<Path> for PathResponse {
    fn from(path: Path) -> Self {
        Self {
            path: path.into_iter().map(Point::from).collect(),
        }
    }
}

/// Rejects sizes above [`MAX_SIZE`] before anything gets allocated.
pub fn check_size(width: usize, height: usize) -> Result<(), WireError> {
    if width > MAX_SIZE || height > MAX_SIZE {
        return Err(WireError::TooLarge {
            width,
            height,
            max: MAX_SIZE,
        });
    }
    Ok(())
}

pub fn handle_maze(request: &MazeRequest) -> Result<MazeResponse, WireError> {
    let (width, height) = request.size();
    check_size(width, height)?;

    let grid = match request.seed {
        Some(seed) => generator::generate_seeded(width, height, seed)?,
        None => generator::generate(width, height)?,
    };

    log::debug!("generated {width}x{height} maze");
    Ok(grid.to_matrix())
}

pub fn handle_path(request: &PathRequest) -> Result<PathResponse, WireError> {
    let grid = Grid::from_matrix(&request.maze)?;
    let start = checked_point(&grid, "start", request.start)?;
    let end = checked_point(&grid, "end", request.end)?;

    let path = crate::search::find_path(&grid, start, end, request.algo);
    log::debug!(
        "{} from {start:?} to {end:?}: {} cells",
        request.algo,
        path.len()
    );

    Ok(path.into())
}

fn checked_point(grid: &Grid, name: &'static str, point: Point) -> Result<Dims, WireError> {
    let pos = Dims::from(point);
    if grid.is_in_bounds(pos) {
        Ok(pos)
    } else {
        Err(WireError::OutOfBounds {
            name,
            point,
            width: grid.width(),
            height: grid.height(),
        })
    }
}
