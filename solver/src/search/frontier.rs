use std::collections::VecDeque;

use super::Algorithm;

/// The ordering discipline for states waiting to be expanded in an uninformed
/// graph search. The discipline is the only thing separating depth-first from
/// breadth-first search.
pub trait Frontier<S>: Default {
    const ALGORITHM: Algorithm;

    fn push(&mut self, state: S);
    fn pop(&mut self) -> Option<S>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last in, first out
#[derive(Debug)]
pub struct Stack<S>(Vec<S>);

impl<S> Default for Stack<S> {
    fn default() -> Self {
        Stack(Vec::new())
    }
}

impl<S> Frontier<S> for Stack<S> {
    const ALGORITHM: Algorithm = Algorithm::DepthFirst;

    fn push(&mut self, state: S) {
        self.0.push(state);
    }

    fn pop(&mut self) -> Option<S> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// First in, first out
#[derive(Debug)]
pub struct Queue<S>(VecDeque<S>);

impl<S> Default for Queue<S> {
    fn default() -> Self {
        Queue(VecDeque::new())
    }
}

impl<S> Frontier<S> for Queue<S> {
    const ALGORITHM: Algorithm = Algorithm::BreadthFirst;

    fn push(&mut self, state: S) {
        self.0.push_back(state);
    }

    fn pop(&mut self) -> Option<S> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
