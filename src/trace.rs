//! Counterexample traces and the factory that builds them.
//!
//! The checker never constructs a trace type directly. It hands the event
//! sequence to a [`TraceFactory`], so callers can plug in their own trace
//! representation; [`DefaultTraceFactory`] produces a [`SafetyTrace`].

use std::fmt;

use crate::model::ProductDes;
use crate::types::EventId;

pub trait TraceFactory {
    type Trace;

    /// Builds an immutable safety trace named `name` for `model`.
    fn create_safety_trace(&self, name: String, model: &ProductDes, events: Vec<EventId>) -> Self::Trace;
}

/// A finite event sequence executed from the initial state of a model.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SafetyTrace {
    name: String,
    model_name: String,
    events: Vec<EventId>,
    labels: Vec<String>,
}

impl SafetyTrace {
    /// Trace name, `<model>:uncontrollable` for checker output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the model the trace belongs to.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Fired events, ending with the one a spec blocks.
    pub fn events(&self) -> &[EventId] {
        &self.events
    }

    /// Event names, aligned with [`events`][Self::events].
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of events in the trace.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl fmt::Display for SafetyTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.labels.join(", "))
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct DefaultTraceFactory;

impl TraceFactory for DefaultTraceFactory {
    type Trace = SafetyTrace;

    fn create_safety_trace(&self, name: String, model: &ProductDes, events: Vec<EventId>) -> SafetyTrace {
        let labels = events.iter().map(|&e| model.event(e).name.clone()).collect();
        SafetyTrace {
            name,
            model_name: model.name().to_string(),
            events,
            labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventKind;

    #[test]
    fn test_default_factory() {
        let mut des = ProductDes::new("cell");
        let a = des.add_event("start", EventKind::Controllable);
        let b = des.add_event("break", EventKind::Uncontrollable);

        let trace = DefaultTraceFactory.create_safety_trace("cell:uncontrollable".into(), &des, vec![a, b]);
        assert_eq!(trace.name(), "cell:uncontrollable");
        assert_eq!(trace.model_name(), "cell");
        assert_eq!(trace.events(), &[a, b]);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.to_string(), "cell:uncontrollable: start, break");
    }
}
