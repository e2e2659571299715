use std::collections::HashMap;

use crate::error::SolveError;
use crate::problem::SearchState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisitedItem<S> {
    /// path cost from the initial state along the recorded parents
    pub cost: f64,
    /// the state this one was first (or most cheaply) reached from, `None` for the initial state
    pub from: Option<S>,
}

/// Parent pointers of every state reached so far. Doubles as the visited set.
#[derive(Clone, Debug)]
pub struct ExploredMap<S: SearchState> {
    items: HashMap<S, VisitedItem<S>>,
}

impl<S: SearchState> ExploredMap<S> {
    /// A map holding only the initial state, with no parent and zero cost
    pub fn new(initial: S) -> Self {
        Self {
            items: HashMap::from([(
                initial,
                VisitedItem {
                    cost: 0.0,
                    from: None,
                },
            )]),
        }
    }

    pub fn record(&mut self, state: S, from: S, cost: f64) {
        self.items.insert(
            state,
            VisitedItem {
                cost,
                from: Some(from),
            },
        );
    }

    pub fn get(&self, state: S) -> Option<&VisitedItem<S>> {
        self.items.get(&state)
    }

    pub fn contains(&self, state: S) -> bool {
        self.items.contains_key(&state)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

/// Walk the parent pointers back from `goal` until `initial` is reached and
/// return the states in travel order, `initial` first.
pub fn reconstruct<S: SearchState>(
    explored: &ExploredMap<S>,
    initial: S,
    goal: S,
) -> Result<Vec<S>, SolveError> {
    let mut path = vec![goal];
    let mut current = goal;

    while current != initial {
        // a walk longer than the map itself can only mean the parents form a cycle
        if path.len() > explored.len() {
            return Err(SolveError::InconsistentExploredMap {
                state: current.to_string(),
            });
        }

        current = match explored.get(current) {
            Some(VisitedItem {
                from: Some(from), ..
            }) => *from,
            _ => {
                return Err(SolveError::InconsistentExploredMap {
                    state: current.to_string(),
                })
            }
        };
        path.push(current);
    }

    path.reverse();
    Ok(path)
}
