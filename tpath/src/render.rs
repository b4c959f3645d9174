use colored::Colorize as _;
use cpath::{dims::Dims, grid::Grid, search::Path};

const WALL: &str = "██";
const OPEN: &str = "  ";
const PATH: &str = "<>";
const START: &str = "S ";
const GOAL: &str = "G ";

/// Draws the maze with two characters per cell, so corridors look square in a terminal.
pub fn render(grid: &Grid, path: &Path, start: Dims, goal: Dims, color: bool) -> String {
    let mut out = String::with_capacity((grid.width() * 2 + 1) * grid.height());

    for pos in Dims::iter_fill(Dims::ZERO, grid.size()) {
        let symbol = if pos == start {
            paint(START, color, |s| s.blue().bold().to_string())
        } else if pos == goal {
            paint(GOAL, color, |s| s.red().bold().to_string())
        } else if grid.is_wall(pos) {
            WALL.to_string()
        } else if path.contains(pos) {
            paint(PATH, color, |s| s.green().to_string())
        } else {
            OPEN.to_string()
        };
        out.push_str(&symbol);

        if pos.0 == grid.size().0 - 1 {
            out.push('\n');
        }
    }

    out
}

fn paint(symbol: &str, color: bool, style: impl Fn(&str) -> String) -> String {
    if color {
        style(symbol)
    } else {
        symbol.to_string()
    }
}
