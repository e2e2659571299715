use std::path::PathBuf;

use crate::grid::Point;

/// Everything that can go wrong between opening a maze image and handing a
/// path to the renderer. Every variant is terminal for a run.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("unknown algorithm `{name}` (expected one of: dfs, bfs, astar)")]
    UnknownAlgorithm { name: String },

    #[error("could not decode maze image {}: {source}", path.display())]
    ImageDecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not write solution image {}: {source}", path.display())]
    ImageEncodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("pixel at {point} is neither black nor white: rgb({}, {}, {})", rgb[0], rgb[1], rgb[2])]
    AmbiguousPixel { point: Point, rgb: [u8; 3] },

    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("malformed graph: {0}")]
    MalformedGraph(#[from] GraphDefect),

    #[error("state {state} is not part of the problem")]
    UnknownState { state: String },

    #[error("no connection from {state} realizes action {action}")]
    InvalidTransition { state: String, action: String },

    #[error("{algorithm} exhausted the frontier without reaching the goal")]
    NoPathFound { algorithm: String },

    #[error("explored map cannot trace {state} back to the initial state")]
    InconsistentExploredMap { state: String },

    #[error("search gave up after {budget} expansions")]
    StepBudgetExceeded { budget: usize },
}

/// Reasons a reduced graph (or a path drawn from it) is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphDefect {
    #[error("the grid has no cells")]
    EmptyGrid,

    #[error("expected two boundary openings, found {found}")]
    MissingOpenings { found: usize },

    #[error("third boundary opening at {extra} (entry {initial}, exit {goal})")]
    TooManyOpenings {
        initial: Point,
        goal: Point,
        extra: Point,
    },

    #[error("{from} and {to} are not axis aligned")]
    NotAxisAligned { from: Point, to: Point },
}
