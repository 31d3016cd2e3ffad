//! Reconstruction of the shortest violating event sequence.
//!
//! The visited set only records which state each state was first reached
//! from, not the event that was fired. Events are recovered by walking the
//! predecessor chain back to the initial state and, for every step, picking
//! the first event in search order that explains it.

use log::debug;

use crate::encoder::StateTupleEncoder;
use crate::error::CheckError;
use crate::store::StateTupleSet;
use crate::system::SystemIndex;
use crate::types::{EventId, StateCode, StateId};

/// Finds the first event (in search order) that takes tuple `from` to tuple `to`.
///
/// An event explains the step if every automaton either lacks it in its
/// alphabet and stays put, or has an explicit transition `from[i] -> to[i]`
/// labelled with it. On nondeterministic automata only the transition the
/// search would take (the first match) counts.
pub fn explain_step(index: &SystemIndex, from: &[StateId], to: &[StateId]) -> Option<EventId> {
    index.events().iter().copied().find(|&event| {
        (0..index.len()).all(|i| {
            if index.in_alphabet(i, event) {
                index.transitions(i).target(from[i], event) == Some(to[i])
            } else {
                from[i] == to[i]
            }
        })
    })
}

/// Builds the event sequence leading from the initial state to `end`, followed by `last`.
pub fn reconstruct(
    index: &SystemIndex,
    encoder: &StateTupleEncoder,
    visited: &StateTupleSet,
    end: StateCode,
    last: EventId,
) -> Result<Vec<EventId>, CheckError> {
    let path = visited
        .path_to(end)
        .ok_or_else(|| CheckError::inconsistent(format!("no predecessor chain to state {:#x}", end)))?;

    let mut events = Vec::with_capacity(path.len());
    let mut from = vec![StateId::new(0); encoder.arity()];
    let mut to = vec![StateId::new(0); encoder.arity()];
    for step in path.windows(2) {
        encoder.decode_into(step[0], &mut from)?;
        encoder.decode_into(step[1], &mut to)?;
        let event = explain_step(index, &from, &to).ok_or_else(|| {
            CheckError::inconsistent(format!("no event leads from state {:#x} to {:#x}", step[0], step[1]))
        })?;
        debug!("reconstruct: {:#x} --{}--> {:#x}", step[0], event, step[1]);
        events.push(event);
    }
    events.push(last);

    Ok(events)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::model::{Automaton, ComponentKind, EventKind, ProductDes};

    /// Plant counts `a` and `b` steps through p0 -a-> p1 -b-> p2; spec ignores them.
    fn chain() -> (ProductDes, EventId, EventId) {
        let mut des = ProductDes::new("chain");
        let a = des.add_event("a", EventKind::Controllable);
        let b = des.add_event("b", EventKind::Uncontrollable);
        let mut p = Automaton::new("P", ComponentKind::Plant);
        let p0 = p.add_state("p0", true);
        let p1 = p.add_state("p1", false);
        let p2 = p.add_state("p2", false);
        p.add_transition(p0, a, p1);
        p.add_transition(p1, b, p2);
        des.add_automaton(p);
        let mut s = Automaton::new("S", ComponentKind::Spec);
        s.add_state("s0", true);
        des.add_automaton(s);
        (des, a, b)
    }

    fn tuple(indices: &[u32]) -> Vec<StateId> {
        indices.iter().map(|&i| StateId::new(i)).collect()
    }

    #[test]
    fn test_explain_step() {
        let (des, a, b) = chain();
        let index = SystemIndex::new(&des).unwrap();
        assert_eq!(explain_step(&index, &tuple(&[0, 0]), &tuple(&[1, 0])), Some(a));
        assert_eq!(explain_step(&index, &tuple(&[1, 0]), &tuple(&[2, 0])), Some(b));
        assert_eq!(explain_step(&index, &tuple(&[0, 0]), &tuple(&[2, 0])), None);
    }

    #[test]
    fn test_explain_step_prefers_uncontrollable() {
        let mut des = ProductDes::new("tie");
        let c = des.add_event("c", EventKind::Controllable);
        let u = des.add_event("u", EventKind::Uncontrollable);
        let mut p = Automaton::new("P", ComponentKind::Plant);
        let p0 = p.add_state("p0", true);
        let p1 = p.add_state("p1", false);
        p.add_transition(p0, c, p1);
        p.add_transition(p0, u, p1);
        des.add_automaton(p);

        let index = SystemIndex::new(&des).unwrap();
        assert_eq!(explain_step(&index, &tuple(&[0]), &tuple(&[1])), Some(u));
    }

    #[test]
    fn test_reconstruct() {
        let (des, a, b) = chain();
        let index = SystemIndex::new(&des).unwrap();
        let encoder = StateTupleEncoder::new(index.state_counts()).unwrap();

        let s00 = encoder.encode(&tuple(&[0, 0])).unwrap();
        let s10 = encoder.encode(&tuple(&[1, 0])).unwrap();
        let s20 = encoder.encode(&tuple(&[2, 0])).unwrap();
        let mut visited = StateTupleSet::new(s00, 0);
        visited.insert(s10, s00);
        visited.insert(s20, s10);

        let events = reconstruct(&index, &encoder, &visited, s20, a).unwrap();
        assert_eq!(events, vec![a, b, a]);

        let events = reconstruct(&index, &encoder, &visited, s00, b).unwrap();
        assert_eq!(events, vec![b]);
    }

    #[test]
    fn test_reconstruct_reports_unexplained_step() {
        let (des, a, _) = chain();
        let index = SystemIndex::new(&des).unwrap();
        let encoder = StateTupleEncoder::new(index.state_counts()).unwrap();

        let s00 = encoder.encode(&tuple(&[0, 0])).unwrap();
        let s20 = encoder.encode(&tuple(&[2, 0])).unwrap();
        let mut visited = StateTupleSet::new(s00, 0);
        visited.insert(s20, s00);

        let err = reconstruct(&index, &encoder, &visited, s20, a).unwrap_err();
        assert!(matches!(err, CheckError::Inconsistent { .. }));

        let err = reconstruct(&index, &encoder, &visited, 3, a).unwrap_err();
        assert!(matches!(err, CheckError::Inconsistent { .. }));
    }
}
