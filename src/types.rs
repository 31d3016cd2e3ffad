//! Type-safe identifiers for events, states and packed state tuples.
//!
//! Events and states are dense indices into the tables owned by a
//! [`ProductDes`][crate::model::ProductDes] and its automata. The newtypes keep
//! the two index spaces apart, so a state index is never used to look up an
//! event by mistake.
use std::fmt;

/// Packed global state: one local state per automaton, concatenated bit-wise.
pub type StateCode = u64;

/// An event identifier (0-indexed into the model's event table).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EventId(u32);

impl EventId {
    pub const fn new(index: u32) -> Self {
        EventId(index)
    }

    /// Returns the position of this event in the model's event table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl From<usize> for EventId {
    fn from(index: usize) -> Self {
        EventId(index as u32)
    }
}

impl From<EventId> for usize {
    fn from(id: EventId) -> Self {
        id.index()
    }
}

/// A local state identifier (0-indexed into its automaton's state table).
///
/// # Invariants
///
/// - Indices are dense: an automaton with `n` states uses exactly `0..n`
/// - Indices are assigned in insertion order and never change afterwards
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct StateId(u32);

impl StateId {
    pub const fn new(index: u32) -> Self {
        StateId(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw value, as packed into a [`StateCode`].
    pub const fn raw(self) -> u64 {
        self.0 as u64
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl From<usize> for StateId {
    fn from(index: usize) -> Self {
        StateId(index as u32)
    }
}

impl From<StateId> for usize {
    fn from(id: StateId) -> Self {
        id.index()
    }
}
