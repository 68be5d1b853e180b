use clap::Parser;
use fjmaze::{
    maze::Maze,
    mazes::GridMaze,
    solver::{ForkJoinSolver, SearchOutcome},
};
use std::{error::Error, path::PathBuf, process::ExitCode};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "fjmaze")]
#[command(about = "Fork/join parallel maze solver")]
#[command(version)]
struct Args {
    /// Maze file: `#` wall, `S` start, `G` goal, `.` or space floor
    maze: PathBuf,

    /// Claimed nodes between fork opportunities; 0 or less searches
    /// sequentially
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    fork_after: i64,

    /// Worker threads; 0 uses one per core
    #[arg(short, long, default_value_t = 0)]
    threads: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fjmaze: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let maze = GridMaze::load(&args.maze)?;
    info!(
        path = %args.maze.display(),
        width = maze.width(),
        height = maze.height(),
        "maze loaded"
    );
    let solver = ForkJoinSolver::builder(maze)
        .fork_after(args.fork_after)
        .num_threads(args.threads)
        .build()?;
    let SearchOutcome { path, stats } = solver.solve()?;
    let maze = solver.maze();

    match path {
        Some(path) => {
            println!("path found: {} steps", path.steps());
            for node in path.iter() {
                let (row, col) = maze.coordinates(*node).expect("path nodes lie inside the maze");
                println!("({row}, {col})");
            }
        }
        None => {
            let (row, col) = maze
                .coordinates(maze.start())
                .expect("start lies inside the maze");
            println!("no path from ({row}, {col}) to a goal");
        }
    }
    println!(
        "claimed nodes: {}, forked tasks: {}",
        stats.claimed_nodes, stats.forked_tasks
    );
    for (task, node) in maze.player_positions().into_iter().enumerate() {
        if let Some((row, col)) = maze.coordinates(node) {
            debug!(task, row, col, "player stopped");
        }
    }
    Ok(())
}
