#![forbid(unsafe_code)]

use crate::Automaton;
use crate::StateId;
use crate::StateSet;
use crate::Symbol;

/// Computes the epsilon-closure of the given states: the smallest superset
/// that is closed under taking epsilon transitions.
///
/// The states are returned in the order in which they were discovered, the
/// seed states first. Uses an explicit stack, so the depth of the automaton
/// is not limited by the call stack.
pub fn epsilon_closure(automaton: &impl Automaton, seed: impl IntoIterator<Item = StateId>) -> StateSet {
    let mut result = StateSet::new();
    let mut stack = Vec::new();

    for state in seed {
        if result.insert(state) {
            stack.push(state);
        }
    }

    while let Some(id) = stack.pop() {
        // States outside of the automaton have no transitions.
        let Some(state) = automaton.state(id) else {
            continue;
        };

        for target in state.targets(Symbol::Epsilon) {
            if result.insert(target) {
                stack.push(target);
            }
        }
    }

    result
}

/// Returns the direct targets of the given states on the character `c`.
/// States without a transition on `c` contribute nothing.
pub fn move_on(automaton: &impl Automaton, c: char, states: &StateSet) -> StateSet {
    states
        .iter()
        .filter_map(|id| automaton.state(id))
        .flat_map(|state| state.targets(Symbol::Char(c)))
        .collect()
}
