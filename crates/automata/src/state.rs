#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use regaut_utilities::TagIndex;

use crate::Symbol;

/// A unique type for the states.
pub struct StateTag;

/// The identifier of a state, unique among all states created by the same
/// [StateAllocator].
pub type StateId = TagIndex<usize, StateTag>;

/// A transition to the `to` state on the given symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub symbol: Symbol,
    pub to: StateId,
}

impl Transition {
    pub fn new(symbol: Symbol, to: StateId) -> Self {
        Self { symbol, to }
    }
}

/// A state of an automaton together with its outgoing transitions, which are
/// kept in the order in which they were added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    id: StateId,
    accepting: bool,
    transitions: Vec<Transition>,
}

impl State {
    /// Creates a non-accepting state without transitions.
    pub fn new(id: StateId) -> Self {
        Self {
            id,
            accepting: false,
            transitions: Vec::new(),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn add_transition(&mut self, symbol: Symbol, to: StateId) {
        self.transitions.push(Transition::new(symbol, to));
    }

    /// Returns the target of the first transition on the given symbol.
    pub fn next_state(&self, symbol: Symbol) -> Option<StateId> {
        self.targets(symbol).next()
    }

    /// Returns the targets of all transitions on the given symbol.
    pub fn targets(&self, symbol: Symbol) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .iter()
            .filter(move |transition| transition.symbol == symbol)
            .map(|transition| transition.to)
    }

    /// Returns true iff every outgoing transition loops back to this state.
    /// This includes states without any transitions.
    pub fn is_trap(&self) -> bool {
        self.transitions.iter().all(|transition| transition.to == self.id)
    }
}

/// Hands out state identifiers in increasing order, never reusing one.
///
/// The canonical signature of a state set sorts its members by identifier,
/// so all automata that are compared or combined must draw their states from
/// the same allocator.
#[derive(Debug, Default)]
pub struct StateAllocator {
    next: usize,
}

impl StateAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh identifier.
    pub fn next_id(&mut self) -> StateId {
        let id = StateId::new(self.next);
        self.next += 1;
        id
    }

    /// Returns a fresh non-accepting state without transitions.
    pub fn fresh(&mut self) -> State {
        State::new(self.next_id())
    }

    /// Returns the number of identifiers handed out so far.
    pub fn num_of_allocated(&self) -> usize {
        self.next
    }
}

/// The states of an automaton, indexed by their identifier. Iteration yields
/// the states in increasing identifier order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateTable {
    states: BTreeMap<StateId, State>,
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given state, whose identifier must not be in the table yet.
    pub fn insert(&mut self, state: State) {
        let id = state.id();
        let previous = self.states.insert(id, state);
        debug_assert!(previous.is_none(), "State {id} is already part of the table");
    }

    /// Moves all states of `other` into this table. The tables must be disjoint.
    ///
    /// The states of the smaller table are inserted into the larger one.
    pub fn append(&mut self, mut other: StateTable) {
        if self.len() < other.len() {
            std::mem::swap(self, &mut other);
        }

        for state in other {
            self.insert(state);
        }
    }

    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    pub fn get_mut(&mut self, id: StateId) -> Option<&mut State> {
        self.states.get_mut(&id)
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.values()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl IntoIterator for StateTable {
    type Item = State;
    type IntoIter = std::collections::btree_map::IntoValues<StateId, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_values()
    }
}

impl FromIterator<State> for StateTable {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let mut table = StateTable::new();
        for state in iter {
            table.insert(state);
        }
        table
    }
}
