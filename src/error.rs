//! Errors raised by the controllability checker.
//!
//! None of these is ever folded into the boolean verdict: a model that cannot
//! be encoded is not "controllable", it is unsupported.

use thiserror::Error;

use crate::types::EventId;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum CheckError {
    /// The composite state does not fit into a 64-bit [`StateCode`][crate::types::StateCode].
    #[error("a tuple of states for these automata cannot be stored in 64 bits, {required_bits} bits would be needed")]
    StateTupleSize { required_bits: u32 },

    /// A state tuple was passed with the wrong number of components.
    #[error("state tuple has {found} components, expected {expected}")]
    ArityMismatch { expected: usize, found: usize },

    /// An automaton taking part in the composition has no initial state.
    #[error("automaton '{automaton}' has no initial state")]
    MissingInitialState { automaton: String },

    /// An automaton taking part in the composition refers to an event the model does not define.
    #[error("automaton '{automaton}' uses event {event}, but the model has only {defined} events")]
    UnknownEvent {
        automaton: String,
        event: EventId,
        defined: usize,
    },

    /// Search bookkeeping went wrong; this is a bug in the checker.
    #[error("internal inconsistency: {message}")]
    Inconsistent { message: String },
}

impl CheckError {
    pub(crate) fn inconsistent(message: impl Into<String>) -> Self {
        CheckError::Inconsistent {
            message: message.into(),
        }
    }
}
