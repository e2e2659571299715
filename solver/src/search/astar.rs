use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashSet},
};

use log::{debug, warn};

use super::{
    explored::reconstruct, Algorithm, ExploredMap, PathResult, SearchConfig, SearchPhase,
    SearchStats,
};
use crate::error::SolveError;
use crate::problem::Problem;

/// The objects that we store in the priority queue
#[derive(Debug)]
struct ToVisit<S> {
    /// path cost so far plus the heuristic estimate
    total: f64,
    cost: f64,
    state: S,
    /// insertion counter, breaks ties in favour of older entries
    order: u64,
}

impl<S> Ord for ToVisit<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for BinaryHeap to be a min-heap
        other
            .total
            .total_cmp(&self.total)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl<S> PartialOrd for ToVisit<S> {
    fn partial_cmp(&self, other: &ToVisit<S>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> PartialEq for ToVisit<S> {
    fn eq(&self, other: &ToVisit<S>) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for ToVisit<S> {}

/// Best-first search ordered by path cost plus heuristic.
///
/// A cheaper path to a state that is still waiting in the queue replaces its
/// parent and cost and queues the state again; the superseded entry is
/// skipped when it surfaces. The goal is accepted when it is popped, not when
/// it is generated.
#[derive(Debug)]
pub struct AStar<P: Problem> {
    start: P::State,
    goal: P::State,
    visit_list: BinaryHeap<ToVisit<P::State>>,
    explored: ExploredMap<P::State>,
    closed: HashSet<P::State>,
    phase: SearchPhase<P::State>,
    stats: SearchStats,
    config: SearchConfig,
    pushed: u64,
    _problem: std::marker::PhantomData<P>,
}

impl<P: Problem> AStar<P> {
    pub fn new(problem: &P, config: SearchConfig) -> Self {
        let start = problem.initial_state();

        Self {
            start,
            goal: problem.goal_state(),
            visit_list: BinaryHeap::from([ToVisit {
                total: problem.heuristic(start),
                cost: 0.0,
                state: start,
                order: 0,
            }]),
            explored: ExploredMap::new(start),
            closed: HashSet::new(),
            phase: SearchPhase::Initialized,
            stats: SearchStats {
                frontier_high_water: 1,
                ..Default::default()
            },
            config,
            pushed: 1,
            _problem: std::marker::PhantomData,
        }
    }

    pub fn finish(mut self, problem: &P) -> Result<PathResult<P::State>, SolveError> {
        loop {
            match self.step(problem)? {
                SearchPhase::Solved(result) => return Ok(result),
                SearchPhase::Exhausted => {
                    return Err(SolveError::NoPathFound {
                        algorithm: Algorithm::AStar.to_string(),
                    })
                }
                SearchPhase::Initialized | SearchPhase::Expanding => {}
            }
        }
    }

    /// Take the cheapest live entry off the queue, dropping stale ones
    fn pop_live(&mut self) -> Option<ToVisit<P::State>> {
        while let Some(visit) = self.visit_list.pop() {
            if self.closed.contains(&visit.state) {
                continue;
            }
            match self.explored.get(visit.state) {
                Some(item) if item.cost < visit.cost => continue,
                _ => return Some(visit),
            }
        }
        None
    }

    pub fn step(&mut self, problem: &P) -> Result<SearchPhase<P::State>, SolveError> {
        if self.phase.is_done() {
            return Ok(self.phase.clone());
        }

        let Some(visit) = self.pop_live() else {
            debug!("astar exhausted after {} expansions", self.stats.expanded);
            self.phase = SearchPhase::Exhausted;
            return Ok(self.phase.clone());
        };
        self.phase = SearchPhase::Expanding;

        if visit.state == self.goal {
            return self.solved(visit.cost);
        }

        if let Some(budget) = self.config.max_expansions {
            if self.stats.expanded >= budget {
                warn!("astar hit its budget of {} expansions", budget);
                return Err(SolveError::StepBudgetExceeded { budget });
            }
        }
        self.stats.expanded += 1;
        self.closed.insert(visit.state);

        for action in problem.possible_actions(visit.state)? {
            let next = problem.resulting_state(visit.state, action)?;
            let cost = visit.cost + problem.action_cost(visit.state, action)?;
            self.stats.generated += 1;

            if self.closed.contains(&next) {
                continue;
            }

            let improves = match self.explored.get(next) {
                None => true,
                Some(item) => cost < item.cost,
            };
            if improves {
                self.explored.record(next, visit.state, cost);
                self.visit_list.push(ToVisit {
                    total: cost + problem.heuristic(next),
                    cost,
                    state: next,
                    order: self.pushed,
                });
                self.pushed += 1;
            }
        }

        self.stats.frontier_high_water = self
            .stats
            .frontier_high_water
            .max(self.visit_list.len());
        Ok(self.phase.clone())
    }

    fn solved(&mut self, total_cost: f64) -> Result<SearchPhase<P::State>, SolveError> {
        let path = reconstruct(&self.explored, self.start, self.goal)?;

        self.phase = SearchPhase::Solved(PathResult {
            path,
            start: self.start,
            goal: self.goal,
            total_cost,
            algorithm: Algorithm::AStar,
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
