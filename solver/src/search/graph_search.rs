use log::{debug, warn};

use super::{
    explored::reconstruct, ExploredMap, Frontier, PathResult, Queue, SearchConfig, SearchPhase,
    SearchStats, Stack,
};
use crate::error::SolveError;
use crate::problem::Problem;

pub type DepthFirstSearch<P> = GraphSearch<P, Stack<<P as Problem>::State>>;
pub type BreadthFirstSearch<P> = GraphSearch<P, Queue<<P as Problem>::State>>;

/// Uninformed graph search. Every state enters the frontier at most once, and
/// the search ends the moment the goal shows up as a successor.
#[derive(Debug)]
pub struct GraphSearch<P: Problem, F: Frontier<P::State>> {
    start: P::State,
    goal: P::State,
    frontier: F,
    explored: ExploredMap<P::State>,
    phase: SearchPhase<P::State>,
    stats: SearchStats,
    config: SearchConfig,
    _problem: std::marker::PhantomData<P>,
}

impl<P: Problem, F: Frontier<P::State>> GraphSearch<P, F> {
    pub fn new(problem: &P, config: SearchConfig) -> Self {
        let start = problem.initial_state();
        let mut frontier = F::default();
        frontier.push(start);

        Self {
            start,
            goal: problem.goal_state(),
            frontier,
            explored: ExploredMap::new(start),
            phase: SearchPhase::Initialized,
            stats: SearchStats {
                frontier_high_water: 1,
                ..Default::default()
            },
            config,
            _problem: std::marker::PhantomData,
        }
    }

    /// Step until the search is solved or exhausted
    pub fn finish(mut self, problem: &P) -> Result<PathResult<P::State>, SolveError> {
        loop {
            match self.step(problem)? {
                SearchPhase::Solved(result) => return Ok(result),
                SearchPhase::Exhausted => {
                    return Err(SolveError::NoPathFound {
                        algorithm: F::ALGORITHM.to_string(),
                    })
                }
                SearchPhase::Initialized | SearchPhase::Expanding => {}
            }
        }
    }

    /// Expand a single state from the frontier
    pub fn step(&mut self, problem: &P) -> Result<SearchPhase<P::State>, SolveError> {
        if self.phase.is_done() {
            return Ok(self.phase.clone());
        }
        if matches!(self.phase, SearchPhase::Initialized) && self.start == self.goal {
            return self.solved();
        }

        let Some(current) = self.frontier.pop() else {
            debug!("{} exhausted after {} expansions", F::ALGORITHM, self.stats.expanded);
            self.phase = SearchPhase::Exhausted;
            return Ok(self.phase.clone());
        };
        self.phase = SearchPhase::Expanding;

        if let Some(budget) = self.config.max_expansions {
            if self.stats.expanded >= budget {
                warn!("{} hit its budget of {} expansions", F::ALGORITHM, budget);
                return Err(SolveError::StepBudgetExceeded { budget });
            }
        }
        self.stats.expanded += 1;

        let cost = self
            .explored
            .get(current)
            .map(|item| item.cost)
            .ok_or_else(|| SolveError::InconsistentExploredMap {
                state: current.to_string(),
            })?;

        for action in problem.possible_actions(current)? {
            let next = problem.resulting_state(current, action)?;
            let next_cost = cost + problem.action_cost(current, action)?;
            self.stats.generated += 1;

            if next == self.goal {
                self.explored.record(next, current, next_cost);
                return self.solved();
            }

            if !self.explored.contains(next) {
                self.explored.record(next, current, next_cost);
                self.frontier.push(next);
            }
        }

        self.stats.frontier_high_water = self.stats.frontier_high_water.max(self.frontier.len());
        Ok(self.phase.clone())
    }

    fn solved(&mut self) -> Result<SearchPhase<P::State>, SolveError> {
        let path = reconstruct(&self.explored, self.start, self.goal)?;
        let total_cost = self.explored.get(self.goal).map_or(0.0, |item| item.cost);

        self.phase = SearchPhase::Solved(PathResult {
            path,
            start: self.start,
            goal: self.goal,
            total_cost,
            algorithm: F::ALGORITHM,
            stats: self.stats,
        });
        Ok(self.phase.clone())
    }

    pub fn phase(&self) -> &SearchPhase<P::State> {
        &self.phase
    }

    pub fn explored(&self) -> &ExploredMap<P::State> {
        &self.explored
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}
