#![forbid(unsafe_code)]

use std::collections::VecDeque;

use log::debug;
use log::info;
use regaut_utilities::debug_trace;
use rustc_hash::FxHashMap;

use crate::Automaton;
use crate::Dfa;
use crate::Nfa;
use crate::Signature;
use crate::State;
use crate::StateAllocator;
use crate::StateId;
use crate::StateSet;
use crate::StateTable;
use crate::Symbol;
use crate::epsilon_closure;
use crate::move_on;

/// Converts the given NFA into an equivalent DFA using the subset construction.
///
/// # Details
///
/// Every DFA state stands for the epsilon-closure of a set of NFA states, and
/// is identified by the [Signature] of that set. The DFA has a transition for
/// every state and every symbol of the alphabet. Symbols that lead nowhere
/// in the NFA go to the state of the empty set, which is a non-accepting trap.
///
/// The DFA states are drawn from `allocator`, which should be the allocator
/// of the NFA such that both automata have disjoint identifiers. Returns
/// `None` for an NFA without states.
pub fn determinize(nfa: &Nfa, allocator: &mut StateAllocator) -> Option<Dfa> {
    if nfa.num_of_states() == 0 {
        debug!("Nothing to determinize for an NFA without states");
        return None;
    }

    info!("Determinizing NFA with {} states...", nfa.num_of_states());

    let mut states = StateTable::new();
    let mut signature_to_state: FxHashMap<Signature, StateId> = FxHashMap::default();
    let mut state_to_signature: FxHashMap<StateId, Signature> = FxHashMap::default();

    // The sets that have been discovered but whose outgoing transitions are not yet known.
    let mut unmarked: VecDeque<(StateId, StateSet)> = VecDeque::new();

    let mut discover = |set: StateSet, states: &mut StateTable, unmarked: &mut VecDeque<(StateId, StateSet)>| {
        let signature = set.signature();
        if let Some(&id) = signature_to_state.get(&signature) {
            return id;
        }

        let mut state = allocator.fresh();
        state.set_accepting(is_accepting_set(nfa, &set));
        let id = state.id();

        debug_trace!("Discovered DFA state {id} for {signature}");

        states.insert(state);
        signature_to_state.insert(signature.clone(), id);
        state_to_signature.insert(id, signature);
        unmarked.push_back((id, set));
        id
    };

    let initial = epsilon_closure(nfa, [nfa.start_state()]);
    let start = discover(initial, &mut states, &mut unmarked);

    while let Some((id, set)) = unmarked.pop_front() {
        for c in nfa.alphabet().iter() {
            let next = epsilon_closure(nfa, move_on(nfa, c, &set).iter());
            let target = discover(next, &mut states, &mut unmarked);

            debug_trace!("DFA transition {id} --[{c}]-> {target}");

            states
                .get_mut(id)
                .expect("Every unmarked set has a DFA state")
                .add_transition(Symbol::Char(c), target);
        }
    }

    info!("Determinized into DFA with {} states", states.len());

    Some(Dfa::new(start, states, nfa.alphabet().clone(), state_to_signature))
}

/// Returns true iff one of the given states is accepting.
fn is_accepting_set(nfa: &Nfa, set: &StateSet) -> bool {
    set.iter()
        .filter_map(|id| nfa.state(id))
        .any(State::is_accepting)
}

#[cfg(test)]
mod tests {
    use regaut_utilities::random_test;
    use test_log::test;

    use crate::compile_nfa;
    use crate::random_postfix;

    use super::*;

    /// Checks that every state has exactly one transition per alphabet symbol.
    fn assert_total_deterministic(dfa: &Dfa) {
        for state in dfa.states() {
            assert!(state.transitions().iter().all(|t| !t.symbol.is_epsilon()));

            for c in dfa.alphabet().iter() {
                assert_eq!(
                    state.targets(Symbol::Char(c)).count(),
                    1,
                    "State {} must have one transition on {c}",
                    state.id()
                );
            }
        }
    }

    #[test]
    fn test_empty_nfa() {
        let mut allocator = StateAllocator::new();
        let nfa = Nfa::from_states(StateId::new(0), Vec::new(), "a".chars().collect());

        assert!(determinize(&nfa, &mut allocator).is_none());
    }

    #[test]
    fn test_concatenation_dfa() {
        let mut allocator = StateAllocator::new();
        let nfa = compile_nfa("ab&", &mut allocator).unwrap();
        let dfa = determinize(&nfa, &mut allocator).unwrap();

        // {0}, {1, 2}, {3} and the empty reject set.
        assert_eq!(dfa.num_of_states(), 4);
        assert_eq!(dfa.accepting_states().count(), 1);
        assert_total_deterministic(&dfa);

        let reject: Vec<&State> = dfa
            .states()
            .filter(|state| dfa.nfa_states(state.id()).is_some_and(Signature::is_empty))
            .collect();
        assert_eq!(reject.len(), 1);
        assert!(reject[0].is_trap());
        assert!(!reject[0].is_accepting());
    }

    #[test]
    fn test_identifiers_are_disjoint() {
        let mut allocator = StateAllocator::new();
        let nfa = compile_nfa("ab|*", &mut allocator).unwrap();
        let dfa = determinize(&nfa, &mut allocator).unwrap();

        for state in dfa.states() {
            assert!(nfa.state(state.id()).is_none());
        }
        assert_eq!(allocator.num_of_allocated(), nfa.num_of_states() + dfa.num_of_states());
    }

    #[test]
    fn test_start_state_represents_initial_closure() {
        let mut allocator = StateAllocator::new();
        let nfa = compile_nfa("a*", &mut allocator).unwrap();
        let dfa = determinize(&nfa, &mut allocator).unwrap();

        let initial = epsilon_closure(&nfa, [nfa.start_state()]).signature();
        assert_eq!(dfa.nfa_states(dfa.start_state()), Some(&initial));
        assert!(dfa.state(dfa.start_state()).unwrap().is_accepting());
    }

    #[test]
    fn test_random_dfa_is_deterministic() {
        random_test(100, |rng| {
            let postfix = random_postfix(rng, 6, &['a', 'b', 'c']);
            let mut allocator = StateAllocator::new();
            let nfa = compile_nfa(&postfix, &mut allocator).unwrap();
            let dfa = determinize(&nfa, &mut allocator).unwrap();

            assert_total_deterministic(&dfa);

            // Distinct DFA states represent distinct sets of NFA states.
            let mut signatures: Vec<&Signature> =
                dfa.states().filter_map(|state| dfa.nfa_states(state.id())).collect();
            assert_eq!(signatures.len(), dfa.num_of_states());
            signatures.sort();
            signatures.dedup();
            assert_eq!(signatures.len(), dfa.num_of_states(), "{postfix}");
        });
    }
}
