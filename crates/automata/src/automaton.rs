#![forbid(unsafe_code)]

//! The automaton trait and the two automata produced by the pipeline.

use std::fmt;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::Alphabet;
use crate::Signature;
use crate::State;
use crate::StateId;
use crate::StateTable;
use crate::Symbol;

/// Read access to a finite automaton, as needed by the algorithms in this
/// crate and by external renderers.
///
/// States are referred to by their [StateId]; every state exposes its
/// accepting flag, trap classification and ordered transitions.
pub trait Automaton {
    /// Returns the identifier of the start state.
    fn start_state(&self) -> StateId;

    /// Returns the state with the given identifier, if it is part of this automaton.
    fn state(&self, id: StateId) -> Option<&State>;

    /// Iterates over all states in increasing identifier order.
    fn states(&self) -> impl Iterator<Item = &State> + '_;

    /// Returns the literals of the underlying expression.
    fn alphabet(&self) -> &Alphabet;

    /// Returns the number of states.
    fn num_of_states(&self) -> usize;

    /// Returns the number of transitions, epsilon transitions included.
    fn num_of_transitions(&self) -> usize {
        self.states().map(|state| state.transitions().len()).sum()
    }

    /// Iterates over the accepting states.
    fn accepting_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states().filter(|state| state.is_accepting())
    }

    /// Iterates over the states whose transitions all loop back to themselves.
    fn trap_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states().filter(|state| state.is_trap())
    }

    /// Returns metrics about the automaton.
    fn metrics(&self) -> AutomatonMetrics {
        AutomatonMetrics {
            num_of_states: self.num_of_states(),
            num_of_transitions: self.num_of_transitions(),
            num_of_accepting_states: self.accepting_states().count(),
            num_of_trap_states: self.trap_states().count(),
            alphabet_size: self.alphabet().len(),
        }
    }
}

/// A nondeterministic finite automaton with epsilon transitions.
#[derive(Clone, Debug)]
pub struct Nfa {
    start: StateId,
    states: StateTable,
    alphabet: Alphabet,
}

impl Nfa {
    /// Creates an NFA from its parts. The start state is expected to be one of
    /// the given states, unless there are no states at all. The identifiers of
    /// the states must be distinct.
    pub fn from_states(start: StateId, states: impl IntoIterator<Item = State>, alphabet: Alphabet) -> Self {
        let states: StateTable = states.into_iter().collect();
        debug_assert!(
            states.is_empty() || states.contains(start),
            "The start state {start} must be one of the states"
        );

        Self {
            start,
            states,
            alphabet,
        }
    }
}

impl Automaton for Nfa {
    fn start_state(&self) -> StateId {
        self.start
    }

    fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id)
    }

    fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter()
    }

    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn num_of_states(&self) -> usize {
        self.states.len()
    }
}

/// A deterministic finite automaton. Every state has at most one transition
/// per symbol, and remembers the set of NFA states it was constructed from.
#[derive(Clone, Debug)]
pub struct Dfa {
    start: StateId,
    states: StateTable,
    alphabet: Alphabet,
    nfa_states: FxHashMap<StateId, Signature>,
}

impl Dfa {
    pub(crate) fn new(
        start: StateId,
        states: StateTable,
        alphabet: Alphabet,
        nfa_states: FxHashMap<StateId, Signature>,
    ) -> Self {
        debug_assert!(states.contains(start), "The start state {start} must be one of the states");

        Self {
            start,
            states,
            alphabet,
            nfa_states,
        }
    }

    /// Returns the unique successor of `state` on the given character.
    pub fn next_state(&self, state: StateId, c: char) -> Option<StateId> {
        self.states.get(state)?.next_state(Symbol::Char(c))
    }

    /// Returns the signature of the NFA states represented by the given DFA state.
    pub fn nfa_states(&self, state: StateId) -> Option<&Signature> {
        self.nfa_states.get(&state)
    }
}

impl Automaton for Dfa {
    fn start_state(&self) -> StateId {
        self.start
    }

    fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id)
    }

    fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter()
    }

    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn num_of_states(&self) -> usize {
        self.states.len()
    }
}

/// Returns the states reachable from the start state, in depth first order.
pub fn reachable_states(automaton: &impl Automaton) -> Vec<StateId> {
    let start = automaton.start_state();
    if automaton.state(start).is_none() {
        return Vec::new();
    }

    let mut visited = FxHashSet::default();
    let mut result = Vec::new();
    let mut stack = vec![start];
    visited.insert(start);

    while let Some(id) = stack.pop() {
        result.push(id);

        let Some(state) = automaton.state(id) else {
            continue;
        };

        for transition in state.transitions() {
            if visited.insert(transition.to) {
                stack.push(transition.to);
            }
        }
    }

    result
}

/// Metrics for an automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutomatonMetrics {
    pub num_of_states: usize,
    pub num_of_transitions: usize,
    pub num_of_accepting_states: usize,
    pub num_of_trap_states: usize,
    /// The number of distinct literals.
    pub alphabet_size: usize,
}

impl fmt::Display for AutomatonMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.num_of_states)?;
        writeln!(f, "Number of transitions: {}", self.num_of_transitions)?;
        writeln!(f, "Number of accepting states: {}", self.num_of_accepting_states)?;
        writeln!(f, "Number of trap states: {}", self.num_of_trap_states)?;
        write!(f, "Alphabet size: {}", self.alphabet_size)
    }
}
