use std::{panic, thread, time::Duration};

use cpath::{
    dims::Dims,
    generator,
    grid::Grid,
    progress::ProgressHandle,
    search::{Algorithm, SearchReport},
    wire,
};

use crate::{error::AppError, render};

const PROGRESS_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy)]
pub struct ShowOptions {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
    pub color: bool,
}

/// Generated maze together with the solved path between its first and last open cell.
#[derive(Debug, Clone)]
pub struct Solved {
    pub grid: Grid,
    pub start: Dims,
    pub goal: Dims,
    pub report: SearchReport,
}

pub fn solve(options: &ShowOptions) -> Result<Solved, AppError> {
    let ShowOptions {
        width,
        height,
        seed,
        algorithm,
        ..
    } = *options;

    let grid = generate(width, height, seed)?;
    let start = grid.open_cells().next().unwrap_or(Dims::ZERO);
    let goal = grid.open_cells().last().unwrap_or(start);
    let report = algorithm.pathfinder().find_report(&grid, start, goal);

    if !report.path.is_empty() && !report.path.is_walk_on(&grid, start, goal) {
        log::error!("{algorithm} returned an invalid path");
    }

    Ok(Solved {
        grid,
        start,
        goal,
        report,
    })
}

/// Generates on a worker thread while the progress is logged from this one.
pub fn generate(width: usize, height: usize, seed: Option<u64>) -> Result<Grid, AppError> {
    wire::check_size(width, height)?;
    let seed = seed.unwrap_or_else(generator::random_seed);
    let progress = ProgressHandle::new();

    let result = thread::scope(|s| {
        let worker = {
            let progress = progress.clone();
            s.spawn(move || generator::generate_with_progress(width, height, seed, progress))
        };

        let mut last = 0;
        while !worker.is_finished() {
            let percent = (progress.progress().percent() * 100.0) as u32;
            if percent > last {
                log::debug!("generating {width}x{height} maze: {percent}%");
                last = percent;
            }
            thread::sleep(PROGRESS_INTERVAL);
        }

        worker.join().unwrap_or_else(|err| panic::resume_unwind(err))
    });

    let grid = result?;
    log::debug!(
        "generated {width}x{height} maze with seed {seed}, {} cells carved",
        progress.progress().done
    );
    Ok(grid)
}

pub fn show(options: &ShowOptions) -> Result<String, AppError> {
    let solved = solve(options)?;
    let mut out = render::render(
        &solved.grid,
        &solved.report.path,
        solved.start,
        solved.goal,
        options.color,
    );
    out.push_str(&format!(
        "{}: {} cells, {} expanded\n",
        options.algorithm,
        solved.report.path.len(),
        solved.report.expanded
    ));
    Ok(out)
}
