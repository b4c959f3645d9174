use std::{fmt, str::FromStr};

use smallvec::SmallVec;
use thiserror::Error;

use crate::{array::Array2D, dims::Dims};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    Open,
    #[default]
    Wall,
}

impl Tile {
    /// Numeric code used in the wire matrix.
    pub fn code(self) -> u8 {
        match self {
            Tile::Open => 0,
            Tile::Wall => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Tile::Open),
            1 => Some(Tile::Wall),
            _ => None,
        }
    }

    pub fn is_open(self) -> bool {
        self == Tile::Open
    }

    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }

    fn symbol(self) -> char {
        match self {
            Tile::Open => '.',
            Tile::Wall => '#',
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid tile {value:?} at ({x}, {y})")]
    InvalidTile { x: usize, y: usize, value: String },
}

/// Rectangular field of open and wall tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Array2D<Tile>,
}

impl Grid {
    /// Grid of the given size with every tile set to `Wall`.
    pub fn new_walls(width: usize, height: usize) -> Self {
        Self {
            tiles: Array2D::new(Tile::Wall, width, height),
        }
    }

    /// Grid of the given size with every tile set to `Open`.
    pub fn new_open(width: usize, height: usize) -> Self {
        Self {
            tiles: Array2D::new(Tile::Open, width, height),
        }
    }

    /// Builds the grid from a row-major matrix of `0` (open) and `1` (wall).
    pub fn from_matrix(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut buf = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }

            for (x, &value) in row.iter().enumerate() {
                let tile = Tile::from_code(value).ok_or_else(|| GridError::InvalidTile {
                    x,
                    y,
                    value: value.to_string(),
                })?;
                buf.push(tile);
            }
        }

        Ok(Self {
            tiles: Array2D::from_buf(buf, width, rows.len()).ok_or(GridError::Empty)?,
        })
    }

    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.tiles
            .rows()
            .map(|row| row.iter().map(|t| t.code()).collect())
            .collect()
    }

    pub fn size(&self) -> Dims {
        self.tiles.size()
    }

    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.tiles.dim_to_idx(pos).is_some()
    }

    /// Is the position strictly inside the outer border.
    pub fn is_interior(&self, pos: Dims) -> bool {
        let Dims(w, h) = self.size();
        0 < pos.0 && pos.0 < w - 1 && 0 < pos.1 && pos.1 < h - 1
    }

    pub fn tile(&self, pos: Dims) -> Option<Tile> {
        self.tiles.get(pos).copied()
    }

    /// Out of bounds positions are never open.
    pub fn is_open(&self, pos: Dims) -> bool {
        self.tile(pos).is_some_and(Tile::is_open)
    }

    pub fn is_wall(&self, pos: Dims) -> bool {
        !self.is_open(pos)
    }

    pub fn set(&mut self, pos: Dims, tile: Tile) {
        self.tiles[pos] = tile;
    }

    /// Open 4-connected neighbors of `pos`, in the order up, down, left, right.
    pub fn neighbors(&self, pos: Dims) -> SmallVec<[Dims; 4]> {
        Dims::DIRECTIONS
            .into_iter()
            .map(|dir| pos + dir)
            .filter(|&n| self.is_open(n))
            .collect()
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Dims> + '_ {
        self.tiles.iter_pos().filter(|&pos| self.is_open(pos))
    }

    pub fn open_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_open()).count()
    }

    /// Number of edges between open cells in the 4-connected adjacency graph.
    pub fn open_edge_count(&self) -> usize {
        self.open_cells()
            .map(|pos| {
                [Dims::RIGHT, Dims::DOWN]
                    .into_iter()
                    .filter(|&dir| self.is_open(pos + dir))
                    .count()
            })
            .sum()
    }

    /// Are all open cells reachable from each other. Grids without open cells are not connected.
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.open_cells().next() else {
            return false;
        };

        let mut seen = Array2D::new(false, self.width(), self.height());
        let mut stack = vec![first];
        seen[first] = true;
        let mut reached = 1;

        while let Some(pos) = stack.pop() {
            for n in self.neighbors(pos) {
                if !seen[n] {
                    seen[n] = true;
                    reached += 1;
                    stack.push(n);
                }
            }
        }

        reached == self.open_count()
    }

    /// Open cells form a tree: connected and without cycles.
    pub fn is_perfect(&self) -> bool {
        self.is_connected() && self.open_count() == self.open_edge_count() + 1
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.rows() {
            for tile in row {
                write!(f, "{}", tile.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses rows of `.` (open) and `#` (wall), surrounding whitespace of each line is ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(y, line)| {
                line.chars()
                    .enumerate()
                    .map(|(x, c)| match c {
                        '.' => Ok(Tile::Open.code()),
                        '#' => Ok(Tile::Wall.code()),
                        _ => Err(GridError::InvalidTile {
                            x,
                            y,
                            value: c.to_string(),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_matrix(&rows)
    }
}
