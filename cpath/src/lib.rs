//! Maze generation and shortest-path search on 4-connected grids.

pub mod array;
pub mod dims;
pub mod generator;
pub mod grid;
pub mod progress;
pub mod search;
pub mod wire;
