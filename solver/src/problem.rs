use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use crate::error::{GraphDefect, SolveError};
use crate::graph::{connection_directions, Graph, NodeId};
use crate::grid::{Direction, Point};

/// Supertrait that collects all the requirements on search states.
/// Must be copy, hashable (the hash identity is the explored-map key) and
/// printable for diagnostics.
pub trait SearchState: Copy + Eq + Hash + Debug + Display + 'static {}

impl SearchState for Point {}

/// A state space search problem
pub trait Problem {
    type State: SearchState;
    type Action: Copy + Debug + Display;

    fn initial_state(&self) -> Self::State;

    fn goal_state(&self) -> Self::State;

    /// All actions that are legal in `state`
    fn possible_actions(&self, state: Self::State) -> Result<Vec<Self::Action>, SolveError>;

    /// The state reached by applying `action` in `state`
    fn resulting_state(
        &self,
        state: Self::State,
        action: Self::Action,
    ) -> Result<Self::State, SolveError>;

    /// Non-negative cost of applying `action` in `state`
    fn action_cost(&self, state: Self::State, action: Self::Action) -> Result<f64, SolveError>;

    /// Estimated remaining cost from `state` to the goal, must never overestimate
    fn heuristic(&self, state: Self::State) -> f64;
}

/// A reduced maze graph seen as a search problem. States are node coordinates
/// and actions the direction of a connection.
#[derive(Debug, Clone)]
pub struct MazeProblem {
    graph: Graph,
}

impl MazeProblem {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn node_id(&self, state: Point) -> Result<NodeId, SolveError> {
        self.graph
            .id_at(state)
            .ok_or_else(|| SolveError::UnknownState {
                state: state.to_string(),
            })
    }
}

impl From<Graph> for MazeProblem {
    fn from(graph: Graph) -> Self {
        Self::new(graph)
    }
}

impl Problem for MazeProblem {
    type State = Point;
    type Action = Direction;

    fn initial_state(&self) -> Point {
        self.graph.node(self.graph.initial()).point
    }

    fn goal_state(&self) -> Point {
        self.graph.node(self.graph.goal()).point
    }

    fn possible_actions(&self, state: Point) -> Result<Vec<Direction>, SolveError> {
        let id = self.node_id(state)?;
        Ok(connection_directions(&self.graph, id)?)
    }

    fn resulting_state(&self, state: Point, action: Direction) -> Result<Point, SolveError> {
        let node = self.graph.node(self.node_id(state)?);

        for connection in &node.connections {
            let to = self.graph.node(*connection).point;
            let direction = Direction::between(state, to)
                .ok_or(GraphDefect::NotAxisAligned { from: state, to })?;
            if direction == action {
                return Ok(to);
            }
        }

        Err(SolveError::InvalidTransition {
            state: state.to_string(),
            action: action.to_string(),
        })
    }

    fn action_cost(&self, state: Point, action: Direction) -> Result<f64, SolveError> {
        let next = self.resulting_state(state, action)?;
        Ok(state.manhattan(next))
    }

    fn heuristic(&self, state: Point) -> f64 {
        state.euclidean(self.goal_state())
    }
}
