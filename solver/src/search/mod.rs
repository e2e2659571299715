//! Generic state space search over any [`Problem`].
//!
//! Depth-first and breadth-first search share one engine, [`GraphSearch`],
//! and differ only in their [`Frontier`]. Both stop as soon as the goal is
//! *generated* as a successor. [`AStar`] orders its frontier by path cost plus
//! heuristic and stops when the goal is *popped*, which makes its paths
//! cost-optimal for an admissible and consistent heuristic.

mod astar;
mod explored;
mod frontier;
mod graph_search;

use std::{fmt::Display, str::FromStr};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SolveError;
use crate::problem::Problem;

pub use astar::AStar;
pub use explored::{reconstruct, ExploredMap, VisitedItem};
pub use frontier::{Frontier, Queue, Stack};
pub use graph_search::{BreadthFirstSearch, DepthFirstSearch, GraphSearch};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    DepthFirst,
    BreadthFirst,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::DepthFirst,
        Algorithm::BreadthFirst,
        Algorithm::AStar,
    ];
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Algorithm::DepthFirst => "dfs",
                Algorithm::BreadthFirst => "bfs",
                Algorithm::AStar => "astar",
            }
        )
    }
}

impl FromStr for Algorithm {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" => Ok(Algorithm::DepthFirst),
            "bfs" | "breadth-first" => Ok(Algorithm::BreadthFirst),
            "astar" | "a*" | "best-first" => Ok(Algorithm::AStar),
            _ => Err(SolveError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// Limits applied to a single search run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// give up with [`SolveError::StepBudgetExceeded`] after this many expansions
    pub max_expansions: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// states taken off the frontier and expanded
    pub expanded: usize,
    /// successor states produced by expansions, including revisits
    pub generated: usize,
    /// largest frontier size seen
    pub frontier_high_water: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct PathResult<S> {
    pub path: Vec<S>,
    pub start: S,
    pub goal: S,
    pub total_cost: f64,
    pub algorithm: Algorithm,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase<S> {
    Initialized,
    Expanding,
    Solved(PathResult<S>),
    Exhausted,
}

impl<S> SearchPhase<S> {
    pub fn is_done(&self) -> bool {
        matches!(self, SearchPhase::Solved(_) | SearchPhase::Exhausted)
    }
}

/// Run `algorithm` on `problem` to completion.
pub fn solve<P: Problem>(
    problem: &P,
    algorithm: Algorithm,
    config: SearchConfig,
) -> Result<PathResult<P::State>, SolveError> {
    info!(
        "searching from {} to {} with {}",
        problem.initial_state(),
        problem.goal_state(),
        algorithm
    );

    let result = match algorithm {
        Algorithm::DepthFirst => DepthFirstSearch::new(problem, config).finish(problem),
        Algorithm::BreadthFirst => BreadthFirstSearch::new(problem, config).finish(problem),
        Algorithm::AStar => AStar::new(problem, config).finish(problem),
    }?;

    info!(
        "{} found a path of {} nodes, cost {} ({} expanded, {} generated)",
        algorithm,
        result.path.len(),
        result.total_cost,
        result.stats.expanded,
        result.stats.generated
    );
    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::SyntheticProblem;

    #[test]
    fn test_algorithm_names() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert_eq!("Depth-First".parse::<Algorithm>().unwrap(), Algorithm::DepthFirst);
        assert_eq!("breadth-first".parse::<Algorithm>().unwrap(), Algorithm::BreadthFirst);
        assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("best-first".parse::<Algorithm>().unwrap(), Algorithm::AStar);

        match "dijkstra".parse::<Algorithm>() {
            Err(SolveError::UnknownAlgorithm { name }) => assert_eq!(name, "dijkstra"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_solve_dispatch() {
        let problem = SyntheticProblem::new(0, 2, &[(0, 1, 1.0), (1, 2, 1.0)]);

        for algorithm in Algorithm::ALL {
            let result = solve(&problem, algorithm, SearchConfig::default()).unwrap();
            assert_eq!(result.algorithm, algorithm);
            assert_eq!(result.path, vec![0, 1, 2]);
            assert_eq!(result.total_cost, 2.0);
        }
    }

    #[test]
    fn test_solve_no_path() {
        let problem = SyntheticProblem::new(0, 2, &[(0, 1, 1.0), (1, 0, 1.0)]);

        for algorithm in Algorithm::ALL {
            match solve(&problem, algorithm, SearchConfig::default()) {
                Err(SolveError::NoPathFound { algorithm: name }) => {
                    assert_eq!(name, algorithm.to_string())
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SearchConfig::default());

        let config: SearchConfig = serde_json::from_str(r#"{"max_expansions": 10}"#).unwrap();
        assert_eq!(config.max_expansions, Some(10));
    }
}
