use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use image::Rgba;
use log::info;
use solver::{Algorithm, Maze, PixelClassifier, SearchConfig, PATH_COLOR};

#[derive(Parser)]
#[command(name = "maze-solver")]
#[command(about = "Find a way through a black and white maze image")]
struct Cli {
    /// Maze image, black walls on white, with exactly two openings on the border
    maze: PathBuf,

    /// Search algorithm: dfs, bfs or astar
    #[arg(long, default_value = "dfs")]
    algo: String,

    /// Where to write the image with the solution drawn on top
    #[arg(long, default_value = "maze_solution.png")]
    out: PathBuf,

    /// Give up after this many node expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Treat pixels darker than this as walls instead of requiring pure black and white
    #[arg(long)]
    threshold: Option<u8>,

    /// Path colour as R,G,B
    #[arg(long, value_parser = parse_color)]
    color: Option<Rgba<u8>>,

    /// Print the solution as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn parse_color(s: &str) -> Result<Rgba<u8>, anyhow::Error> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid colour component in {:?}", s))?;

    match parts[..] {
        [r, g, b] => Ok(Rgba([r, g, b, 255])),
        _ => Err(anyhow!("expected a colour as R,G,B, got {:?}", s)),
    }
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // fail on a bad algorithm name before touching the image
    let algorithm: Algorithm = cli.algo.parse()?;
    let classifier = cli
        .threshold
        .map_or(PixelClassifier::Exact, PixelClassifier::Threshold);
    let config = SearchConfig {
        max_expansions: cli.max_expansions,
    };

    let maze = Maze::open(&cli.maze, classifier)
        .with_context(|| format!("loading maze {}", cli.maze.display()))?;

    let result = maze
        .solve(algorithm, config)
        .with_context(|| format!("solving {} with {}", cli.maze.display(), algorithm))?;
    info!(
        "path has {} nodes and costs {}",
        result.path.len(),
        result.total_cost
    );

    maze.save(&result.path, cli.color.unwrap_or(PATH_COLOR), &cli.out)
        .with_context(|| format!("saving solution to {}", cli.out.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
