//! In-memory product DES: a named collection of events and automata.
//!
//! States, events and transitions are stored in flat vectors and referenced by
//! [`StateId`] and [`EventId`] indices. Models are assembled in code:
//!
//! ```rust
//! use desctl::model::{Automaton, ComponentKind, EventKind, ProductDes};
//!
//! let mut des = ProductDes::new("machine");
//! let start = des.add_event("start", EventKind::Controllable);
//! let finish = des.add_event("finish", EventKind::Uncontrollable);
//!
//! let mut m = Automaton::new("M", ComponentKind::Plant);
//! let idle = m.add_state("idle", true);
//! let busy = m.add_state("busy", false);
//! m.add_transition(idle, start, busy);
//! m.add_transition(busy, finish, idle);
//! des.add_automaton(m);
//!
//! assert_eq!(des.automata().len(), 1);
//! assert_eq!(des.event_by_name("finish"), Some(finish));
//! ```

use std::fmt;

use crate::types::{EventId, StateId};

/// Classification of an event.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// Can be disabled by a supervisor.
    Controllable,
    /// Cannot be prevented; the plant may always fire it.
    Uncontrollable,
    /// State label (e.g. marking); never fires.
    Proposition,
}

/// Role of an automaton in the model.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ComponentKind {
    Plant,
    Spec,
    /// Ignored by controllability checking.
    Property,
    /// Ignored by controllability checking.
    Supervisor,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentKind::Plant => "plant",
            ComponentKind::Spec => "spec",
            ComponentKind::Property => "property",
            ComponentKind::Supervisor => "supervisor",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Event {
    pub name: String,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct State {
    pub name: String,
    pub initial: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Transition {
    pub source: StateId,
    pub event: EventId,
    pub target: StateId,
}

/// A finite automaton over the events of its model.
#[derive(Debug, Clone)]
pub struct Automaton {
    name: String,
    kind: ComponentKind,
    events: Vec<EventId>,
    states: Vec<State>,
    transitions: Vec<Transition>,
}

impl Automaton {
    /// Creates an automaton with no states, events or transitions.
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            events: Vec::new(),
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Name of the automaton.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role of this automaton in the model.
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Events this automaton synchronises on, in insertion order.
    pub fn events(&self) -> &[EventId] {
        &self.events
    }

    /// States in insertion order; a [`StateId`] is a position in this slice.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Panics if `id` is not a state of this automaton.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Transitions in insertion order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Adds `event` to the alphabet. Adding an event twice is a no-op.
    pub fn add_event(&mut self, event: EventId) {
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }

    /// Adds a state and returns its id. Several states may be flagged initial.
    pub fn add_state(&mut self, name: impl Into<String>, initial: bool) -> StateId {
        let id = StateId::from(self.states.len());
        self.states.push(State {
            name: name.into(),
            initial,
        });
        id
    }

    /// Adds a transition and records its event in the alphabet.
    pub fn add_transition(&mut self, source: StateId, event: EventId, target: StateId) {
        assert!(source.index() < self.states.len(), "Unknown source state {}", source);
        assert!(target.index() < self.states.len(), "Unknown target state {}", target);
        self.add_event(event);
        self.transitions.push(Transition { source, event, target });
    }

    /// Returns the first state flagged as initial.
    pub fn initial_state(&self) -> Option<StateId> {
        self.states.iter().position(|s| s.initial).map(StateId::from)
    }

    /// Looks up the first state called `name`.
    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.states.iter().position(|s| s.name == name).map(StateId::from)
    }
}

/// A modular discrete-event system: events plus the automata synchronised over them.
#[derive(Debug, Clone)]
pub struct ProductDes {
    name: String,
    events: Vec<Event>,
    automata: Vec<Automaton>,
}

impl ProductDes {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
            automata: Vec::new(),
        }
    }

    /// Name of the model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All events, indexed by [`EventId`].
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Panics if `id` is not defined by this model.
    pub fn event(&self, id: EventId) -> &Event {
        &self.events[id.index()]
    }

    /// Ids of all events, in definition order.
    pub fn event_ids(&self) -> impl Iterator<Item = EventId> + '_ {
        (0..self.events.len()).map(EventId::from)
    }

    /// Looks up the first event called `name`.
    pub fn event_by_name(&self, name: &str) -> Option<EventId> {
        self.events.iter().position(|e| e.name == name).map(EventId::from)
    }

    /// Automata in model order.
    pub fn automata(&self) -> &[Automaton] {
        &self.automata
    }

    /// Defines a new event and returns its id.
    pub fn add_event(&mut self, name: impl Into<String>, kind: EventKind) -> EventId {
        let id = EventId::from(self.events.len());
        self.events.push(Event { name: name.into(), kind });
        id
    }

    /// Adds `automaton` and returns its model position.
    ///
    /// Its events are not checked here; the checker rejects undefined ones.
    pub fn add_automaton(&mut self, automaton: Automaton) -> usize {
        self.automata.push(automaton);
        self.automata.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automaton_building() {
        let mut des = ProductDes::new("test");
        let a = des.add_event("a", EventKind::Uncontrollable);
        let b = des.add_event("b", EventKind::Controllable);

        let mut p = Automaton::new("P", ComponentKind::Plant);
        let p0 = p.add_state("p0", true);
        let p1 = p.add_state("p1", false);
        p.add_transition(p0, a, p1);
        p.add_transition(p1, b, p0);
        p.add_transition(p1, a, p1);

        assert_eq!(p.state_count(), 2);
        assert_eq!(p.events(), &[a, b]);
        assert_eq!(p.initial_state(), Some(p0));
        assert_eq!(p.state_by_name("p1"), Some(p1));
        assert_eq!(p.states().len(), 2);
        assert_eq!(p.state(p1).name, "p1");
        assert!(p.state(p0).initial);
        assert!(!p.state(p1).initial);
        assert_eq!(p.transitions().len(), 3);

        des.add_automaton(p);
        assert_eq!(des.event(b).kind, EventKind::Controllable);
        assert_eq!(des.event_ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_no_initial_state() {
        let mut s = Automaton::new("S", ComponentKind::Spec);
        s.add_state("s0", false);
        assert_eq!(s.initial_state(), None);
    }

    #[test]
    fn test_duplicate_event_ignored() {
        let mut s = Automaton::new("S", ComponentKind::Spec);
        let e = EventId::new(0);
        s.add_event(e);
        s.add_event(e);
        assert_eq!(s.events().len(), 1);
    }

    #[test]
    #[should_panic(expected = "Unknown target state")]
    fn test_transition_to_unknown_state_panics() {
        let mut p = Automaton::new("P", ComponentKind::Plant);
        let p0 = p.add_state("p0", true);
        p.add_transition(p0, EventId::new(0), StateId::new(7));
    }
}
