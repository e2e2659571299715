use std::collections::HashMap;

use crate::error::SolveError;
use crate::problem::{Problem, SearchState};

impl SearchState for u32 {}

/// A directed, weighted toy problem. The action taken from a state is the
/// number of the state it leads to.
pub struct SyntheticProblem {
    initial: u32,
    goal: u32,
    edges: Vec<(u32, u32, f64)>,
    heuristic: HashMap<u32, f64>,
}

impl SyntheticProblem {
    pub fn new(initial: u32, goal: u32, edges: &[(u32, u32, f64)]) -> Self {
        Self {
            initial,
            goal,
            edges: edges.to_vec(),
            heuristic: HashMap::new(),
        }
    }

    pub fn with_heuristic(mut self, state: u32, estimate: f64) -> Self {
        self.heuristic.insert(state, estimate);
        self
    }

    fn edge(&self, from: u32, to: u32) -> Result<&(u32, u32, f64), SolveError> {
        self.edges
            .iter()
            .find(|(a, b, _)| *a == from && *b == to)
            .ok_or_else(|| SolveError::InvalidTransition {
                state: from.to_string(),
                action: to.to_string(),
            })
    }
}

impl Problem for SyntheticProblem {
    type State = u32;
    type Action = u32;

    fn initial_state(&self) -> u32 {
        self.initial
    }

    fn goal_state(&self) -> u32 {
        self.goal
    }

    fn possible_actions(&self, state: u32) -> Result<Vec<u32>, SolveError> {
        Ok(self
            .edges
            .iter()
            .filter(|(from, _, _)| *from == state)
            .map(|(_, to, _)| *to)
            .collect())
    }

    fn resulting_state(&self, state: u32, action: u32) -> Result<u32, SolveError> {
        self.edge(state, action).map(|(_, to, _)| *to)
    }

    fn action_cost(&self, state: u32, action: u32) -> Result<f64, SolveError> {
        self.edge(state, action).map(|(_, _, cost)| *cost)
    }

    fn heuristic(&self, state: u32) -> f64 {
        self.heuristic.get(&state).copied().unwrap_or(0.0)
    }
}
