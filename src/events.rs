//! Compact event sets for automaton alphabets.
//!
//! Alphabet membership is queried once per (automaton, event) pair for every
//! expanded composite state, so the set is a plain bit vector over
//! [`EventId`] indices rather than a hash set.

use crate::types::EventId;

/// A set of events backed by a vector of u64 words.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct EventSet {
    words: Vec<u64>,
    count: usize,
}

impl EventSet {
    const BITS_PER_WORD: usize = 64;

    /// Creates an empty set able to hold `capacity` events without growing.
    pub fn new(capacity: usize) -> Self {
        let num_words = capacity.div_ceil(Self::BITS_PER_WORD);
        Self {
            words: vec![0; num_words],
            count: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    fn word_and_bit(event: EventId) -> (usize, usize) {
        let index = event.index();
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    #[inline]
    pub fn contains(&self, event: EventId) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(event);
        match self.words.get(word_idx) {
            Some(word) => word & (1u64 << bit_idx) != 0,
            None => false,
        }
    }

    /// Adds an event. Returns true if it was not already present.
    pub fn insert(&mut self, event: EventId) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(event);
        if word_idx >= self.words.len() {
            self.words.resize(word_idx + 1, 0);
        }

        let mask = 1u64 << bit_idx;
        let was_clear = self.words[word_idx] & mask == 0;
        if was_clear {
            self.words[word_idx] |= mask;
            self.count += 1;
        }
        was_clear
    }

    /// Iterates over members in increasing index order.
    pub fn iter(&self) -> impl Iterator<Item = EventId> + '_ {
        self.words.iter().enumerate().flat_map(|(word_idx, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit_idx = rest.trailing_zeros() as usize;
                rest &= rest - 1; // Clear lowest set bit
                Some(EventId::from(word_idx * Self::BITS_PER_WORD + bit_idx))
            })
        })
    }
}

impl FromIterator<EventId> for EventSet {
    fn from_iter<I: IntoIterator<Item = EventId>>(iter: I) -> Self {
        let mut set = EventSet::default();
        for event in iter {
            set.insert(event);
        }
        set
    }
}
