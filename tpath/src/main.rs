use std::{
    fs::File,
    io::{self, BufReader, Read as _},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use cpath::{
    search::Algorithm,
    wire::{self, MazeRequest, PathRequest},
};
use tpath::{
    constants::settings_path,
    error::AppError,
    logging,
    serve::serve,
    settings::Settings,
    show::{show, ShowOptions},
};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "tpath")]
struct Args {
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "Log more, repeat for even more")]
    verbose: u8,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and print it as a JSON matrix of 0 (open) and 1 (wall)
    Maze {
        #[clap(long)]
        width: Option<usize>,
        #[clap(long)]
        height: Option<usize>,
        #[clap(long)]
        seed: Option<u64>,
    },
    /// Read a path request as JSON and print the path
    Path {
        #[clap(help = "File with the request, stdin when missing")]
        input: Option<PathBuf>,
    },
    /// Answer JSON requests line by line from stdin
    Serve,
    /// Generate a maze, solve it and draw both
    Show {
        #[clap(long)]
        width: Option<usize>,
        #[clap(long)]
        height: Option<usize>,
        #[clap(long)]
        seed: Option<u64>,
        #[clap(short, long, help = "bfs or astar")]
        algo: Option<Algorithm>,
        #[clap(long, action, help = "Don't color the output")]
        no_color: bool,
    },
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let path = settings_path();

    if args.reset_config {
        Settings::reset_config(&path)?;
        return Ok(());
    }

    if args.show_config_path {
        println!("{}", path.display());
        return Ok(());
    }

    if args.debug_config {
        println!("{:#?}", Settings::load(&path)?.populate());
        return Ok(());
    }

    better_panic::install();

    let settings = Settings::load_or_default(&path);
    logging::init(logging::raise_level(settings.get_log_level(), args.verbose))?;

    let (default_width, default_height) = settings.get_default_size();
    let command = args.command.unwrap_or(Command::Show {
        width: None,
        height: None,
        seed: None,
        algo: None,
        no_color: false,
    });

    match command {
        Command::Maze {
            width,
            height,
            seed,
        } => {
            let request = MazeRequest {
                width: width.unwrap_or(default_width),
                height: height.unwrap_or(default_height),
                seed,
            };
            let maze = wire::handle_maze(&request)?;
            println!("{}", serde_json::to_string(&maze)?);
        }
        Command::Path { input } => {
            let text = match input {
                Some(file) => io::read_to_string(BufReader::new(File::open(file)?))?,
                None => {
                    let mut text = String::new();
                    io::stdin().read_to_string(&mut text)?;
                    text
                }
            };
            let request: PathRequest = serde_json::from_str(&text)?;
            let response = wire::handle_path(&request)?;
            println!("{}", serde_json::to_string(&response)?);
        }
        Command::Serve => {
            serve(io::stdin().lock(), io::stdout().lock(), &settings)?;
        }
        Command::Show {
            width,
            height,
            seed,
            algo,
            no_color,
        } => {
            let options = ShowOptions {
                width: width.unwrap_or(default_width),
                height: height.unwrap_or(default_height),
                seed,
                algorithm: algo.unwrap_or(settings.get_default_algorithm()),
                color: settings.get_color() && !no_color,
            };
            print!("{}", show(&options)?);
        }
    }

    Ok(())
}
