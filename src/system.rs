//! Composition order and per-automaton indices.
//!
//! [`SystemIndex`] fixes the order in which automata and events are visited
//! during the search:
//!
//! - automata: all plants (model order), then all specs (model order);
//!   other component kinds are left out of the composition entirely,
//! - events: all uncontrollable events (model order), then all controllable
//!   ones; propositions are dropped.
//!
//! With plants first, an uncontrollable event that some plant blocks is
//! rejected before any spec is consulted. The event order decides which of
//! several shortest counterexamples is reported.

use log::debug;

use crate::error::CheckError;
use crate::events::EventSet;
use crate::model::{ComponentKind, EventKind, ProductDes};
use crate::transition::TransitionTable;
use crate::types::{EventId, StateId};

#[derive(Debug, Clone)]
pub struct SystemIndex {
    /// Model positions of the composed automata, in composition order.
    automata: Vec<usize>,
    plant_count: usize,
    events: Vec<EventId>,
    uncontrollable_count: usize,
    alphabets: Vec<EventSet>,
    transitions: Vec<TransitionTable>,
    state_counts: Vec<usize>,
    initial: Vec<StateId>,
}

impl SystemIndex {
    /// Orders the plants and specs of `model` and indexes their alphabets and transitions.
    ///
    /// Fails if one of them has no initial state or uses an event the model
    /// does not define.
    pub fn new(model: &ProductDes) -> Result<Self, CheckError> {
        let automata_of = |kind: ComponentKind| -> Vec<usize> {
            model
                .automata()
                .iter()
                .enumerate()
                .filter(|(_, a)| a.kind() == kind)
                .map(|(i, _)| i)
                .collect()
        };
        let mut automata = automata_of(ComponentKind::Plant);
        let plant_count = automata.len();
        automata.extend(automata_of(ComponentKind::Spec));

        let events_of = |kind: EventKind| -> Vec<EventId> {
            model.event_ids().filter(|&e| model.event(e).kind == kind).collect()
        };
        let mut events = events_of(EventKind::Uncontrollable);
        let uncontrollable_count = events.len();
        events.extend(events_of(EventKind::Controllable));

        let num_events = model.events().len();
        let mut alphabets = Vec::with_capacity(automata.len());
        let mut transitions = Vec::with_capacity(automata.len());
        let mut state_counts = Vec::with_capacity(automata.len());
        let mut initial = Vec::with_capacity(automata.len());

        for &pos in &automata {
            let automaton = &model.automata()[pos];

            let mut alphabet = EventSet::new(num_events);
            for &e in automaton.events() {
                if e.index() >= num_events {
                    return Err(CheckError::UnknownEvent {
                        automaton: automaton.name().to_string(),
                        event: e,
                        defined: num_events,
                    });
                }
                if model.event(e).kind != EventKind::Proposition {
                    alphabet.insert(e);
                }
            }

            let init = automaton.initial_state().ok_or_else(|| CheckError::MissingInitialState {
                automaton: automaton.name().to_string(),
            })?;

            debug!(
                "index: {} '{}' with {} states, {} events, {} transitions",
                automaton.kind(),
                automaton.name(),
                automaton.state_count(),
                alphabet.len(),
                automaton.transitions().len()
            );

            alphabets.push(alphabet);
            transitions.push(TransitionTable::new(automaton));
            state_counts.push(automaton.state_count());
            initial.push(init);
        }

        Ok(Self {
            automata,
            plant_count,
            events,
            uncontrollable_count,
            alphabets,
            transitions,
            state_counts,
            initial,
        })
    }

    /// Number of automata in the composition.
    pub fn len(&self) -> usize {
        self.automata.len()
    }

    /// Whether no automaton takes part in the composition.
    pub fn is_empty(&self) -> bool {
        self.automata.is_empty()
    }

    /// Model position of the `i`-th composed automaton.
    pub fn model_position(&self, i: usize) -> usize {
        self.automata[i]
    }

    /// Number of plants; they occupy the first positions.
    pub fn plant_count(&self) -> usize {
        self.plant_count
    }

    /// Whether the `i`-th composed automaton is a spec.
    #[inline]
    pub fn is_spec(&self, i: usize) -> bool {
        i >= self.plant_count
    }

    /// Events in search order.
    pub fn events(&self) -> &[EventId] {
        &self.events
    }

    /// Whether the event at `position` in [`events`][Self::events] is uncontrollable.
    #[inline]
    pub fn is_uncontrollable(&self, position: usize) -> bool {
        position < self.uncontrollable_count
    }

    /// Whether `event` belongs to the alphabet of the `i`-th composed automaton.
    #[inline]
    pub fn in_alphabet(&self, i: usize, event: EventId) -> bool {
        self.alphabets[i].contains(event)
    }

    /// Alphabet of the `i`-th composed automaton, propositions excluded.
    pub fn alphabet(&self, i: usize) -> &EventSet {
        &self.alphabets[i]
    }

    /// Transition table of the `i`-th composed automaton.
    #[inline]
    pub fn transitions(&self, i: usize) -> &TransitionTable {
        &self.transitions[i]
    }

    /// State counts in composition order.
    pub fn state_counts(&self) -> &[usize] {
        &self.state_counts
    }

    /// The tuple of initial states, in composition order.
    pub fn initial_tuple(&self) -> &[StateId] {
        &self.initial
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::model::Automaton;

    fn single_state(name: &str, kind: ComponentKind) -> Automaton {
        let mut a = Automaton::new(name, kind);
        a.add_state("q0", true);
        a
    }

    #[test]
    fn test_automaton_order() {
        let mut des = ProductDes::new("order");
        des.add_automaton(single_state("S1", ComponentKind::Spec));
        des.add_automaton(single_state("P1", ComponentKind::Plant));
        des.add_automaton(single_state("X", ComponentKind::Property));
        des.add_automaton(single_state("S2", ComponentKind::Spec));
        des.add_automaton(single_state("P2", ComponentKind::Plant));
        des.add_automaton(single_state("Y", ComponentKind::Supervisor));

        let index = SystemIndex::new(&des).unwrap();
        let order: Vec<_> = (0..index.len()).map(|i| index.model_position(i)).collect();
        assert_eq!(order, vec![1, 4, 0, 3]);
        assert_eq!(index.plant_count(), 2);
        assert!(!index.is_spec(1));
        assert!(index.is_spec(2));
    }

    #[test]
    fn test_event_order() {
        let mut des = ProductDes::new("order");
        let c1 = des.add_event("c1", EventKind::Controllable);
        let u1 = des.add_event("u1", EventKind::Uncontrollable);
        let m = des.add_event(":accepting", EventKind::Proposition);
        let c2 = des.add_event("c2", EventKind::Controllable);
        let u2 = des.add_event("u2", EventKind::Uncontrollable);

        let mut p = single_state("P", ComponentKind::Plant);
        p.add_event(m);
        p.add_event(c1);
        des.add_automaton(p);

        let index = SystemIndex::new(&des).unwrap();
        assert_eq!(index.events(), &[u1, u2, c1, c2]);
        assert!(index.is_uncontrollable(1));
        assert!(!index.is_uncontrollable(2));
        // Propositions never enter an alphabet.
        assert!(index.in_alphabet(0, c1));
        assert!(!index.in_alphabet(0, m));
        assert_eq!(index.alphabet(0).len(), 1);
    }

    #[test]
    fn test_missing_initial_state() {
        let mut des = ProductDes::new("broken");
        let mut p = Automaton::new("P", ComponentKind::Plant);
        p.add_state("p0", false);
        des.add_automaton(p);

        let err = SystemIndex::new(&des).unwrap_err();
        assert_eq!(
            err,
            CheckError::MissingInitialState {
                automaton: "P".to_string()
            }
        );
    }

    #[test]
    fn test_undefined_event() {
        let mut des = ProductDes::new("broken");
        des.add_event("a", EventKind::Uncontrollable);
        let mut p = single_state("P", ComponentKind::Plant);
        p.add_event(EventId::new(5));
        des.add_automaton(p);

        let err = SystemIndex::new(&des).unwrap_err();
        assert_eq!(
            err,
            CheckError::UnknownEvent {
                automaton: "P".to_string(),
                event: EventId::new(5),
                defined: 1,
            }
        );
        assert_eq!(
            err.to_string(),
            "automaton 'P' uses event e5, but the model has only 1 events"
        );
    }

    #[test]
    fn test_undefined_event_in_ignored_kind() {
        let mut des = ProductDes::new("ignored");
        let mut x = single_state("X", ComponentKind::Supervisor);
        x.add_event(EventId::new(3));
        des.add_automaton(x);

        assert!(SystemIndex::new(&des).is_ok());
    }

    #[test]
    fn test_ignored_kind_without_initial_state() {
        let mut des = ProductDes::new("ignored");
        let mut x = Automaton::new("X", ComponentKind::Property);
        x.add_state("x0", false);
        des.add_automaton(x);

        let index = SystemIndex::new(&des).unwrap();
        assert!(index.is_empty());
        assert!(index.initial_tuple().is_empty());
    }
}
