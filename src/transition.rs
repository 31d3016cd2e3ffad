//! Per-automaton transition lookup.
//!
//! Transitions are bucketed by source state in a compressed layout: all
//! outgoing transitions of state `s` live in `entries[offsets[s]..offsets[s + 1]]`,
//! in the order they appear in the automaton.
//!
//! Automata are expected to be deterministic. If an automaton has several
//! transitions for the same (source, event) pair, [`TransitionTable::target`]
//! returns the first one in original order.

use crate::model::Automaton;
use crate::types::{EventId, StateId};

#[derive(Debug, Clone)]
pub struct TransitionTable {
    offsets: Vec<usize>,
    entries: Vec<(EventId, StateId)>,
}

impl TransitionTable {
    /// Builds the table for `automaton`, keeping transition order within each source state.
    pub fn new(automaton: &Automaton) -> Self {
        let num_states = automaton.state_count();

        let mut offsets = vec![0; num_states + 1];
        for t in automaton.transitions() {
            offsets[t.source.index() + 1] += 1;
        }
        for i in 0..num_states {
            offsets[i + 1] += offsets[i];
        }

        // Stable placement keeps the original order inside each bucket.
        let mut cursor = offsets.clone();
        let mut entries = vec![(EventId::new(0), StateId::new(0)); automaton.transitions().len()];
        for t in automaton.transitions() {
            let slot = &mut cursor[t.source.index()];
            entries[*slot] = (t.event, t.target);
            *slot += 1;
        }

        Self { offsets, entries }
    }

    /// Number of source states covered by the table.
    pub fn num_states(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of transitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Outgoing `(event, target)` pairs of `source`.
    #[inline]
    pub fn outgoing(&self, source: StateId) -> &[(EventId, StateId)] {
        let i = source.index();
        &self.entries[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Successor of `source` under `event`, if an explicit transition exists.
    #[inline]
    pub fn target(&self, source: StateId, event: EventId) -> Option<StateId> {
        self.outgoing(source)
            .iter()
            .find(|(e, _)| *e == event)
            .map(|&(_, target)| target)
    }

    /// Whether the automaton has the transition `source --event--> target`.
    ///
    /// Unlike [`target`][Self::target], this also sees transitions shadowed by
    /// an earlier one with the same source and event.
    pub fn contains(&self, source: StateId, event: EventId, target: StateId) -> bool {
        self.outgoing(source).contains(&(event, target))
    }
}
