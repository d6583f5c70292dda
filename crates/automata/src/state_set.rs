#![forbid(unsafe_code)]

use std::fmt;

use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::StateId;

/// A set of states that remembers the order in which the states were
/// inserted. Membership is decided by a hash set, not by position.
#[derive(Clone, Default)]
pub struct StateSet {
    order: Vec<StateId>,
    members: FxHashSet<StateId>,
}

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the given state, returns true iff it was not yet present.
    pub fn insert(&mut self, state: StateId) -> bool {
        if self.members.insert(state) {
            self.order.push(state);
            return true;
        }

        false
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.members.contains(&state)
    }

    /// Iterates over the states in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the canonical signature of this set.
    pub fn signature(&self) -> Signature {
        Signature::new(self.order.iter().copied())
    }
}

impl PartialEq for StateSet {
    /// Two sets are equal when they have the same members, regardless of order.
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for StateSet {}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = StateSet::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?}}}", self.order.iter().format(", "))
    }
}

/// The canonical identity of a set of states: its members sorted by
/// identifier. Two sets have equal signatures iff they have the same members.
///
/// The identifiers are kept as a list rather than concatenated into a string,
/// since e.g. `{1, 23}` and `{12, 3}` would otherwise share a key.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature {
    /// Sorted and free of duplicates.
    sorted_ids: Vec<StateId>,
}

impl Signature {
    pub fn new(states: impl IntoIterator<Item = StateId>) -> Self {
        let mut sorted_ids: Vec<StateId> = states.into_iter().collect();
        sorted_ids.sort_unstable();
        sorted_ids.dedup();

        Self { sorted_ids }
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.sorted_ids.binary_search(&state).is_ok()
    }

    pub fn as_slice(&self) -> &[StateId] {
        &self.sorted_ids
    }

    pub fn len(&self) -> usize {
        self.sorted_ids.len()
    }

    /// The empty signature identifies the reject state of a DFA.
    pub fn is_empty(&self) -> bool {
        self.sorted_ids.is_empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.sorted_ids.iter().format(", "))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature{self}")
    }
}
