pub mod error;
pub mod graph;
pub mod grid;
pub mod maze;
pub mod problem;
pub mod search;
pub mod util;

#[cfg(test)]
mod test_utils;

pub use error::{GraphDefect, SolveError};
pub use graph::{reduce, Graph, Node, NodeId};
pub use grid::{Cell, Direction, PixelGrid, Point};
pub use maze::{Maze, PATH_COLOR};
pub use problem::{MazeProblem, Problem, SearchState};
pub use search::{solve, Algorithm, PathResult, SearchConfig, SearchPhase, SearchStats};
pub use util::{draw_path, parse_img, PixelClassifier};
