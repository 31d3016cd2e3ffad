//! Visited set and BFS frontier for one controllability check.
//!
//! Every discovered composite state is stored with the code of the state it
//! was first reached from; the initial state is its own predecessor. Since
//! states are discovered in breadth-first order, following predecessors back
//! from any state yields a shortest path to it.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use crate::types::StateCode;

#[derive(Debug)]
pub struct StateTupleSet {
    initial: StateCode,
    predecessors: HashMap<StateCode, StateCode>,
    frontier: VecDeque<StateCode>,
}

impl StateTupleSet {
    /// Creates a set holding only `initial`, which is also the only unexpanded state.
    pub fn new(initial: StateCode, capacity: usize) -> Self {
        let mut predecessors = HashMap::with_capacity(capacity);
        predecessors.insert(initial, initial);
        let mut frontier = VecDeque::with_capacity(capacity.min(1 << 16));
        frontier.push_back(initial);
        Self {
            initial,
            predecessors,
            frontier,
        }
    }

    /// Code of the initial state, the root of every predecessor chain.
    pub fn initial(&self) -> StateCode {
        self.initial
    }

    /// Records `state` as reached from `predecessor`.
    ///
    /// Returns true if `state` was new; rediscovering a state changes nothing.
    pub fn insert(&mut self, state: StateCode, predecessor: StateCode) -> bool {
        match self.predecessors.entry(state) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(predecessor);
                self.frontier.push_back(state);
                true
            }
        }
    }

    /// Takes the oldest unexpanded state.
    pub fn pop(&mut self) -> Option<StateCode> {
        self.frontier.pop_front()
    }

    /// Whether the frontier still holds states.
    pub fn has_unexpanded(&self) -> bool {
        !self.frontier.is_empty()
    }

    /// Whether `state` has been discovered.
    pub fn contains(&self, state: StateCode) -> bool {
        self.predecessors.contains_key(&state)
    }

    /// The state `state` was first reached from, if it was discovered.
    pub fn predecessor(&self, state: StateCode) -> Option<StateCode> {
        self.predecessors.get(&state).copied()
    }

    /// Number of discovered states.
    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Codes on the recorded path from the initial state to `state`, both ends included.
    ///
    /// Returns `None` if `state` was never discovered or the chain is broken.
    pub fn path_to(&self, state: StateCode) -> Option<Vec<StateCode>> {
        let mut path = vec![state];
        let mut current = state;
        while current != self.initial {
            current = self.predecessor(current)?;
            path.push(current);
            if path.len() > self.len() {
                // A cycle in the predecessor chain.
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}
