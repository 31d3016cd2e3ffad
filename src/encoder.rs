//! Bit-packed encoding of composite states.
//!
//! A composite state is a tuple of local [`StateId`]s, one per automaton in
//! composition order. Automaton `i` with `n_i` states gets the minimal width
//! `w_i = ceil(log2(n_i))` bits (zero bits if `n_i <= 1`), and the tuple code is
//! the concatenation of all local indices, first automaton in the most
//! significant position:
//!
//! ```text
//!  63                                                 0
//!  [ unused | s_0 (w_0 bits) | s_1 (w_1 bits) | ... | s_{n-1} ]
//! ```
//!
//! The widths must sum to at most 64 bits. This is checked once, when the
//! encoder is built, so an unsupported model is rejected before any search
//! work is done.

use num_bigint::BigUint;

use crate::error::CheckError;
use crate::types::{StateCode, StateId};

#[derive(Debug, Clone)]
pub struct StateTupleEncoder {
    counts: Vec<usize>,
    widths: Vec<u32>,
    shifts: Vec<u32>,
    masks: Vec<u64>,
    total_bits: u32,
}

/// Number of bits needed to tell `n` states apart.
pub fn bit_width(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

impl StateTupleEncoder {
    /// Builds an encoder for automata with the given state counts.
    ///
    /// Fails with [`CheckError::StateTupleSize`] if the tuple needs more than 64 bits.
    pub fn new(state_counts: &[usize]) -> Result<Self, CheckError> {
        let widths: Vec<u32> = state_counts.iter().map(|&n| bit_width(n)).collect();
        let total_bits: u32 = widths.iter().sum();
        if total_bits > StateCode::BITS {
            return Err(CheckError::StateTupleSize {
                required_bits: total_bits,
            });
        }

        let mut shifts = vec![0; widths.len()];
        let mut offset = 0;
        for i in (0..widths.len()).rev() {
            shifts[i] = offset;
            offset += widths[i];
        }

        let masks = widths
            .iter()
            .map(|&w| if w == StateCode::BITS { u64::MAX } else { (1u64 << w) - 1 })
            .collect();

        Ok(Self {
            counts: state_counts.to_vec(),
            widths,
            shifts,
            masks,
            total_bits,
        })
    }

    /// Number of components in a tuple.
    pub fn arity(&self) -> usize {
        self.widths.len()
    }

    /// Bits used by a tuple code; at most 64.
    pub fn total_bits(&self) -> u32 {
        self.total_bits
    }

    /// Bits given to component `i`.
    pub fn width(&self, i: usize) -> u32 {
        self.widths[i]
    }

    /// Upper bound on the number of composite states: the product of all state counts.
    pub fn state_space_bound(&self) -> BigUint {
        self.counts.iter().map(|&n| BigUint::from(n)).product()
    }

    /// Packs `tuple` into a single code.
    ///
    /// Fails with [`CheckError::ArityMismatch`] if `tuple` has the wrong length.
    pub fn encode(&self, tuple: &[StateId]) -> Result<StateCode, CheckError> {
        if tuple.len() != self.arity() {
            return Err(CheckError::ArityMismatch {
                expected: self.arity(),
                found: tuple.len(),
            });
        }

        let mut code: StateCode = 0;
        for (i, state) in tuple.iter().enumerate() {
            debug_assert!(
                state.index() < self.counts[i],
                "State {} is unknown to component {} ({} states)",
                state,
                i,
                self.counts[i]
            );
            if self.widths[i] > 0 {
                code |= (state.raw() & self.masks[i]) << self.shifts[i];
            }
        }
        Ok(code)
    }

    /// Unpacks `code` into `out`, which must have exactly [`arity`][Self::arity] slots.
    pub fn decode_into(&self, code: StateCode, out: &mut [StateId]) -> Result<(), CheckError> {
        if out.len() != self.arity() {
            return Err(CheckError::ArityMismatch {
                expected: self.arity(),
                found: out.len(),
            });
        }
        self.unpack(code, out);
        Ok(())
    }

    /// Unpacks `code` into a fresh tuple.
    pub fn decode(&self, code: StateCode) -> Vec<StateId> {
        let mut out = vec![StateId::new(0); self.arity()];
        self.unpack(code, &mut out);
        out
    }

    fn unpack(&self, code: StateCode, out: &mut [StateId]) {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = if self.widths[i] == 0 {
                StateId::new(0)
            } else {
                StateId::new(((code >> self.shifts[i]) & self.masks[i]) as u32)
            };
        }
    }
}
