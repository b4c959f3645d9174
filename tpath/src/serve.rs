//! JSON-lines request loop: one request object per input line, one response per output line.
//!
//! ```text
//! {"maze": {"width": 21, "height": 21}}
//! {"path": {"maze": [[1, 1, 1], [1, 0, 1], [1, 1, 1]], "start": {"x": 1, "y": 1}, "end": {"x": 1, "y": 1}, "algo": "astar"}}
//! ```

use std::io::{BufRead, Write};

use cpath::wire::{self, MazeRequest, MazeResponse, PathRequest, PathResponse};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, settings::Settings};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Request {
    Maze(MazeRequest),
    Path(PathRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Maze(MazeResponse),
    Path(PathResponse),
    Error { error: String },
}

impl Response {
    fn error(err: impl ToString) -> Self {
        Response::Error {
            error: err.to_string(),
        }
    }
}

pub fn handle_request(request: Request, settings: &Settings) -> Response {
    let result = match request {
        Request::Maze(request) => {
            let (width, height) = settings.get_default_size();
            wire::handle_maze(&request.fill_defaults(width, height)).map(Response::Maze)
        }
        Request::Path(request) => wire::handle_path(&request).map(Response::Path),
    };

    result.unwrap_or_else(|err| {
        log::warn!("request failed: {err}");
        Response::error(err)
    })
}

pub fn handle_line(line: &str, settings: &Settings) -> Response {
    match serde_json::from_str(line) {
        Ok(request) => handle_request(request, settings),
        Err(err) => {
            log::warn!("malformed request: {err}");
            Response::error(err)
        }
    }
}

/// Answers requests until the input ends, returns how many were answered.
pub fn serve(
    input: impl BufRead,
    mut output: impl Write,
    settings: &Settings,
) -> Result<usize, AppError> {
    let mut handled = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&line, settings);
        serde_json::to_writer(&mut output, &response)?;
        writeln!(output)?;
        output.flush()?;
        handled += 1;
    }

    log::info!("served {handled} requests");
    Ok(handled)
}
