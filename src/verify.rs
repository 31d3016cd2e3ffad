//! Independent replay of controllability counterexamples.
//!
//! A controllability counterexample is a nonempty event sequence such that
//! every event but the last can be executed by all plants and specs in
//! lockstep, and the last event is uncontrollable, accepted by every plant
//! and rejected by at least one spec.
//!
//! The replay works directly on the [`ProductDes`] and does not share any
//! lookup structure with the checker.

use thiserror::Error;

use crate::model::{Automaton, ComponentKind, EventKind, ProductDes};
use crate::types::{EventId, StateId};

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TraceDefect {
    #[error("trace is empty")]
    Empty,

    #[error("event {event} at step {step} is not part of the model")]
    UnknownEvent { step: usize, event: EventId },

    #[error("automaton '{automaton}' has no initial state")]
    NoInitialState { automaton: String },

    #[error("event '{event}' at step {step} is rejected by '{automaton}'")]
    Rejected { step: usize, event: String, automaton: String },

    #[error("last event '{event}' is not uncontrollable")]
    NotUncontrollable { event: String },

    #[error("last event '{event}' is rejected by plant '{automaton}'")]
    RejectedByPlant { event: String, automaton: String },

    #[error("last event '{event}' is accepted by every spec")]
    AcceptedBySpecs { event: String },
}

/// Result of firing one event in one automaton.
fn step(model: &ProductDes, automaton: &Automaton, state: StateId, event: EventId) -> Option<StateId> {
    let in_alphabet = automaton
        .events()
        .iter()
        .any(|&e| e == event && model.event(e).kind != EventKind::Proposition);
    if !in_alphabet {
        return Some(state);
    }
    automaton
        .transitions()
        .iter()
        .find(|t| t.source == state && t.event == event)
        .map(|t| t.target)
}

/// Checks that `events` is a controllability counterexample for `model`.
pub fn check_counterexample(model: &ProductDes, events: &[EventId]) -> Result<(), TraceDefect> {
    let (&last, prefix) = events.split_last().ok_or(TraceDefect::Empty)?;
    for (step_no, &event) in events.iter().enumerate() {
        if event.index() >= model.events().len() {
            return Err(TraceDefect::UnknownEvent { step: step_no, event });
        }
    }

    let automata: Vec<&Automaton> = model
        .automata()
        .iter()
        .filter(|a| matches!(a.kind(), ComponentKind::Plant | ComponentKind::Spec))
        .collect();

    let mut current = Vec::with_capacity(automata.len());
    for a in &automata {
        let init = a.initial_state().ok_or_else(|| TraceDefect::NoInitialState {
            automaton: a.name().to_string(),
        })?;
        current.push(init);
    }

    for (step_no, &event) in prefix.iter().enumerate() {
        for (a, state) in automata.iter().zip(current.iter_mut()) {
            *state = step(model, a, *state, event).ok_or_else(|| TraceDefect::Rejected {
                step: step_no,
                event: model.event(event).name.clone(),
                automaton: a.name().to_string(),
            })?;
        }
    }

    let name = &model.event(last).name;
    if model.event(last).kind != EventKind::Uncontrollable {
        return Err(TraceDefect::NotUncontrollable { event: name.clone() });
    }

    let mut spec_blocks = false;
    for (a, &state) in automata.iter().zip(&current) {
        let accepted = step(model, a, state, last).is_some();
        match a.kind() {
            ComponentKind::Plant if !accepted => {
                return Err(TraceDefect::RejectedByPlant {
                    event: name.clone(),
                    automaton: a.name().to_string(),
                });
            }
            ComponentKind::Spec if !accepted => spec_blocks = true,
            _ => {}
        }
    }
    if !spec_blocks {
        return Err(TraceDefect::AcceptedBySpecs { event: name.clone() });
    }

    Ok(())
}
