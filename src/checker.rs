//! Explicit-state controllability checking.
//!
//! A model is *controllable* if no reachable state of the synchronous product
//! of its plants and specs has an uncontrollable event that every plant
//! enables but some spec disables.
//!
//! The checker explores the product breadth-first:
//!
//! 1. Start from the tuple of initial states.
//! 2. For each unexpanded tuple, try every event in search order
//!    (uncontrollable first). Automata are visited in composition order
//!    (plants first):
//!    - event outside the alphabet: the component stays put,
//!    - explicit transition: the component moves to its target,
//!    - otherwise the event is *blocked*. An uncontrollable event blocked by a
//!      spec is a violation and ends the search; any other block just means
//!      the event cannot fire here.
//! 3. Every successor is recorded with its predecessor on first discovery.
//!
//! On a violation the predecessor chain yields a shortest counterexample,
//! which is handed to the [`TraceFactory`] and kept until the next check.
//!
//! ```rust
//! use desctl::checker::ControllabilityChecker;
//! use desctl::model::{Automaton, ComponentKind, EventKind, ProductDes};
//! use desctl::trace::DefaultTraceFactory;
//!
//! let mut des = ProductDes::new("toy");
//! let a = des.add_event("a", EventKind::Uncontrollable);
//! let mut p = Automaton::new("P", ComponentKind::Plant);
//! let p0 = p.add_state("p0", true);
//! let p1 = p.add_state("p1", false);
//! p.add_transition(p0, a, p1);
//! des.add_automaton(p);
//! let mut s = Automaton::new("S", ComponentKind::Spec);
//! s.add_state("s0", true);
//! s.add_event(a);
//! des.add_automaton(s);
//!
//! let mut checker = ControllabilityChecker::new(&des, DefaultTraceFactory).unwrap();
//! assert!(!checker.check().unwrap());
//! assert_eq!(checker.counterexample().unwrap().to_string(), "toy:uncontrollable: a");
//! ```

use log::{debug, info};
use num_bigint::BigUint;

use crate::counterexample;
use crate::encoder::StateTupleEncoder;
use crate::error::CheckError;
use crate::model::ProductDes;
use crate::store::StateTupleSet;
use crate::system::SystemIndex;
use crate::trace::{DefaultTraceFactory, TraceFactory};
use crate::types::{EventId, StateId};
use crate::verify;

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Number of composite states to reserve room for up front (default: 1024).
    pub capacity_hint: usize,
    /// Replay every counterexample against the model before reporting it
    /// (default: on in debug builds).
    pub verify_counterexamples: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            capacity_hint: 1024,
            verify_counterexamples: cfg!(debug_assertions),
        }
    }
}

/// Figures from the most recent check.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CheckStats {
    /// Distinct composite states discovered.
    pub states: usize,
    /// Composite states taken off the frontier and expanded.
    pub expansions: usize,
    /// Product of all state counts.
    pub state_space_bound: BigUint,
}

/// Outcome of firing one event from one composite state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Step {
    /// The successor tuple has been written out.
    Enabled,
    /// Some automaton cannot take the event.
    Disabled,
    /// A spec blocks an uncontrollable event all plants accept.
    Violation { automaton: usize },
}

pub struct ControllabilityChecker<'a, F: TraceFactory = DefaultTraceFactory> {
    model: &'a ProductDes,
    factory: F,
    config: CheckerConfig,
    index: SystemIndex,
    encoder: StateTupleEncoder,
    counterexample: Option<F::Trace>,
    stats: CheckStats,
}

impl<'a, F: TraceFactory> ControllabilityChecker<'a, F> {
    /// Prepares a checker for `model`.
    ///
    /// Fails if some plant or spec lacks an initial state, or if the composite
    /// state does not fit into 64 bits. Nothing is explored yet.
    pub fn new(model: &'a ProductDes, factory: F) -> Result<Self, CheckError> {
        Self::with_config(model, factory, CheckerConfig::default())
    }

    /// Like [`new`][Self::new], with explicit search settings.
    pub fn with_config(model: &'a ProductDes, factory: F, config: CheckerConfig) -> Result<Self, CheckError> {
        let index = SystemIndex::new(model)?;
        let encoder = StateTupleEncoder::new(index.state_counts())?;
        debug!(
            "checker: '{}' has {} automata ({} plants), {} events, {} bits per state",
            model.name(),
            index.len(),
            index.plant_count(),
            index.events().len(),
            encoder.total_bits()
        );
        Ok(Self {
            model,
            factory,
            config,
            index,
            encoder,
            counterexample: None,
            stats: CheckStats::default(),
        })
    }

    /// The model being checked.
    pub fn model(&self) -> &ProductDes {
        self.model
    }

    /// Settings the checker was built with.
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// The counterexample from the last check, if it returned `false`.
    pub fn counterexample(&self) -> Option<&F::Trace> {
        self.counterexample.as_ref()
    }

    /// Figures from the last check; all zero before the first one.
    pub fn stats(&self) -> &CheckStats {
        &self.stats
    }

    /// Computes the successor of `current` under `event`, writing it into `next`.
    fn fire(&self, current: &[StateId], position: usize, event: EventId, next: &mut [StateId]) -> Step {
        for i in 0..self.index.len() {
            if !self.index.in_alphabet(i, event) {
                next[i] = current[i];
            } else if let Some(target) = self.index.transitions(i).target(current[i], event) {
                next[i] = target;
            } else if self.index.is_uncontrollable(position) && self.index.is_spec(i) {
                return Step::Violation { automaton: i };
            } else {
                return Step::Disabled;
            }
        }
        Step::Enabled
    }

    /// Runs the check. Returns `Ok(true)` if the model is controllable.
    ///
    /// Each call starts from scratch, so repeated calls on the same model give
    /// the same answer and the same counterexample.
    pub fn check(&mut self) -> Result<bool, CheckError> {
        self.counterexample = None;
        self.stats = CheckStats {
            state_space_bound: self.encoder.state_space_bound(),
            ..CheckStats::default()
        };
        info!(
            "Checking controllability of '{}' (at most {} states)",
            self.model.name(),
            self.stats.state_space_bound
        );

        let initial = self.encoder.encode(self.index.initial_tuple())?;
        let mut visited = StateTupleSet::new(initial, self.config.capacity_hint);

        let mut current = vec![StateId::new(0); self.index.len()];
        let mut next = vec![StateId::new(0); self.index.len()];

        while let Some(code) = visited.pop() {
            self.stats.expansions += 1;
            self.encoder.decode_into(code, &mut current)?;

            for (position, &event) in self.index.events().iter().enumerate() {
                match self.fire(&current, position, event, &mut next) {
                    Step::Enabled => {
                        let successor = self.encoder.encode(&next)?;
                        visited.insert(successor, code);
                    }
                    Step::Disabled => {}
                    Step::Violation { automaton } => {
                        self.stats.states = visited.len();
                        debug!(
                            "check: '{}' blocks '{}' in state {:#x}",
                            self.model.automata()[self.index.model_position(automaton)].name(),
                            self.model.event(event).name,
                            code
                        );
                        let events = counterexample::reconstruct(&self.index, &self.encoder, &visited, code, event)?;
                        if self.config.verify_counterexamples {
                            verify::check_counterexample(self.model, &events).map_err(|defect| {
                                CheckError::inconsistent(format!("computed counterexample is invalid: {}", defect))
                            })?;
                        }
                        info!(
                            "'{}' is not controllable: counterexample of length {} after {} states",
                            self.model.name(),
                            events.len(),
                            self.stats.states
                        );
                        let name = format!("{}:uncontrollable", self.model.name());
                        self.counterexample = Some(self.factory.create_safety_trace(name, self.model, events));
                        return Ok(false);
                    }
                }
            }
        }

        self.stats.states = visited.len();
        info!("'{}' is controllable ({} states)", self.model.name(), self.stats.states);
        Ok(true)
    }
}
