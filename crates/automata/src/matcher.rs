#![forbid(unsafe_code)]

use regaut_utilities::debug_trace;

use crate::Automaton;
use crate::Dfa;
use crate::Nfa;
use crate::epsilon_closure;
use crate::move_on;

/// Returns true iff the DFA accepts the input. Rejects as soon as a character
/// has no transition from the current state.
pub fn dfa_accepts(dfa: &Dfa, input: &str) -> bool {
    let mut current = dfa.start_state();

    for c in input.chars() {
        match dfa.next_state(current, c) {
            Some(next) => current = next,
            None => {
                debug_trace!("No transition on {c:?} from {current}");
                return false;
            }
        }
    }

    dfa.state(current).is_some_and(|state| state.is_accepting())
}

/// Returns true iff the NFA accepts the input, by tracking the set of all
/// states the NFA can be in after every character.
pub fn nfa_accepts(nfa: &Nfa, input: &str) -> bool {
    if nfa.num_of_states() == 0 {
        return false;
    }

    let mut current = epsilon_closure(nfa, [nfa.start_state()]);
    for c in input.chars() {
        current = epsilon_closure(nfa, move_on(nfa, c, &current).iter());
        if current.is_empty() {
            return false;
        }
    }

    current
        .iter()
        .filter_map(|id| nfa.state(id))
        .any(|state| state.is_accepting())
}
