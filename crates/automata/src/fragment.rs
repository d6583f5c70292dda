#![forbid(unsafe_code)]

//! Thompson's construction as a stack machine over NFA fragments.

use log::debug;
use regaut_utilities::debug_trace;
use thiserror::Error;

use crate::Alphabet;
use crate::Nfa;
use crate::Operator;
use crate::State;
use crate::StateAllocator;
use crate::StateId;
use crate::StateTable;
use crate::Symbol;

/// Returned by the composition operations when the operand stack holds fewer
/// fragments than the operator consumes. The stack is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("requires {required} operand(s), but only {available} available")]
pub struct MissingOperands {
    pub required: usize,
    pub available: usize,
}

/// An automaton under construction with a single start state and a single
/// accepting state, the `last` state.
#[derive(Clone, Debug)]
pub struct Fragment {
    states: StateTable,
    start: StateId,
    last: StateId,
}

impl Fragment {
    /// Creates the fragment consisting of the two given states, where `last`
    /// becomes the accepting state.
    fn new(start: State, mut last: State) -> Self {
        last.set_accepting(true);

        let (start_id, last_id) = (start.id(), last.id());
        let mut states = StateTable::new();
        states.insert(start);
        states.insert(last);

        Self {
            states,
            start: start_id,
            last: last_id,
        }
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    /// Returns the accepting state.
    pub fn last(&self) -> StateId {
        self.last
    }

    pub fn states(&self) -> &StateTable {
        &self.states
    }

    /// Returns the number of accepting states, which is one for every fragment.
    #[cfg(test)]
    fn num_of_accepting(&self) -> usize {
        self.states.iter().filter(|state| state.is_accepting()).count()
    }

    /// Adds an epsilon transition from the current last state to `to`, and
    /// removes its accepting mark.
    fn leave_last(&mut self, to: StateId) {
        let last = self
            .states
            .get_mut(self.last)
            .expect("The last state is always part of the fragment");

        last.add_transition(Symbol::Epsilon, to);
        last.set_accepting(false);
    }
}

/// Builds NFA fragments on an operand stack, allocating all states from the
/// given allocator. The literals of all atoms are collected in the alphabet.
pub struct FragmentBuilder<'a> {
    allocator: &'a mut StateAllocator,
    stack: Vec<Fragment>,
    alphabet: Alphabet,
}

impl<'a> FragmentBuilder<'a> {
    pub fn new(allocator: &'a mut StateAllocator) -> Self {
        Self {
            allocator,
            stack: Vec::new(),
            alphabet: Alphabet::new(),
        }
    }

    /// Returns the number of fragments on the operand stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the topmost fragment of the operand stack.
    pub fn top(&self) -> Option<&Fragment> {
        self.stack.last()
    }

    /// Pushes the fragment that accepts exactly `symbol`.
    pub fn atom(&mut self, symbol: char) {
        let mut first = self.allocator.fresh();
        let second = self.allocator.fresh();
        first.add_transition(Symbol::Char(symbol), second.id());

        debug_trace!("Atom {symbol}: {} --[{symbol}]-> {}", first.id(), second.id());

        self.stack.push(Fragment::new(first, second));
        self.alphabet.insert(symbol);
    }

    /// Replaces the two topmost fragments `A B` by the fragment accepting the
    /// concatenation of their languages.
    pub fn concatenate(&mut self) -> Result<(), MissingOperands> {
        let (mut left, right) = self.pop_two(Operator::Concatenate)?;

        debug_trace!("Concatenate {} --[ε]-> {}", left.last, right.start);

        left.leave_last(right.start);
        left.last = right.last;
        left.states.append(right.states);

        self.push(left);
        Ok(())
    }

    /// Replaces the topmost fragment by its Kleene closure.
    pub fn star(&mut self) -> Result<(), MissingOperands> {
        self.require(Operator::Star)?;
        let mut inner = self.stack.pop().expect("Checked that the operand is present");

        let mut start = self.allocator.fresh();
        let mut end = self.allocator.fresh();

        start.add_transition(Symbol::Epsilon, end.id());
        start.add_transition(Symbol::Epsilon, inner.start);

        // The loop back is added after the edge to the new end state.
        let inner_start = inner.start;
        inner.leave_last(end.id());
        inner
            .states
            .get_mut(inner.last)
            .expect("The last state is always part of the fragment")
            .add_transition(Symbol::Epsilon, inner_start);

        debug_trace!("Star {} .. {} around {}", start.id(), end.id(), inner_start);

        end.set_accepting(true);
        inner.start = start.id();
        inner.last = end.id();
        inner.states.insert(start);
        inner.states.insert(end);

        self.push(inner);
        Ok(())
    }

    /// Replaces the two topmost fragments `A B` by the fragment accepting the
    /// union of their languages.
    pub fn union(&mut self) -> Result<(), MissingOperands> {
        let (mut left, mut right) = self.pop_two(Operator::Union)?;

        let mut start = self.allocator.fresh();
        let mut end = self.allocator.fresh();

        start.add_transition(Symbol::Epsilon, left.start);
        start.add_transition(Symbol::Epsilon, right.start);
        left.leave_last(end.id());
        right.leave_last(end.id());

        debug_trace!("Union {} .. {} of {} and {}", start.id(), end.id(), left.start, right.start);

        end.set_accepting(true);
        left.start = start.id();
        left.last = end.id();
        left.states.append(right.states);
        left.states.insert(start);
        left.states.insert(end);

        self.push(left);
        Ok(())
    }

    /// Applies the given operator to the operand stack.
    pub fn apply(&mut self, operator: Operator) -> Result<(), MissingOperands> {
        self.require(operator)?;

        match operator {
            Operator::Union => self.union(),
            Operator::Star => self.star(),
            Operator::Concatenate => self.concatenate(),
        }
    }

    /// Consumes the builder and returns the single remaining fragment as an
    /// NFA. Returns the number of remaining fragments when it is not one.
    pub fn finish(mut self) -> Result<Nfa, usize> {
        let remaining = self.stack.len();
        match (self.stack.pop(), remaining) {
            (Some(fragment), 1) => Ok(Nfa::from_states(fragment.start, fragment.states, self.alphabet)),
            _ => {
                debug!("Operand stack holds {remaining} fragments at the end");
                Err(remaining)
            }
        }
    }

    /// Fails when the operand stack holds fewer fragments than the operator consumes.
    fn require(&self, operator: Operator) -> Result<(), MissingOperands> {
        let required = operator.arity();
        let available = self.stack.len();
        if available < required {
            return Err(MissingOperands { required, available });
        }

        Ok(())
    }

    /// Pops `B` and then `A`, returning `(A, B)`.
    fn pop_two(&mut self, operator: Operator) -> Result<(Fragment, Fragment), MissingOperands> {
        self.require(operator)?;

        let right = self.stack.pop().expect("Checked that two fragments are present");
        let left = self.stack.pop().expect("Checked that two fragments are present");
        Ok((left, right))
    }

    /// Only the new last state is checked. The previous last states stop being
    /// accepting in `leave_last`.
    fn push(&mut self, fragment: Fragment) {
        debug_assert!(
            fragment.states.get(fragment.last).is_some_and(|state| state.is_accepting()),
            "The last state of a fragment is accepting"
        );
        self.stack.push(fragment);
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::Automaton;
    use crate::Transition;

    use super::*;

    #[test]
    fn test_atom() {
        let mut allocator = StateAllocator::new();
        let mut builder = FragmentBuilder::new(&mut allocator);

        builder.atom('a');
        builder.atom('a');

        assert_eq!(builder.len(), 2);
        assert_eq!(builder.alphabet().as_slice(), &['a']);

        let fragment = builder.top().unwrap();
        assert_eq!(fragment.states().len(), 2);
        assert_eq!(fragment.start(), StateId::new(2));
        assert_eq!(fragment.last(), StateId::new(3));

        let first = fragment.states().get(fragment.start()).unwrap();
        assert_eq!(first.transitions(), &[Transition::new(Symbol::Char('a'), StateId::new(3))]);
        assert!(!first.is_accepting());

        let second = fragment.states().get(fragment.last()).unwrap();
        assert!(second.transitions().is_empty());
        assert!(second.is_accepting());
    }

    #[test]
    fn test_concatenate_moves_accepting_state() {
        let mut allocator = StateAllocator::new();
        let mut builder = FragmentBuilder::new(&mut allocator);

        builder.atom('a');
        builder.atom('b');
        builder.concatenate().unwrap();

        let fragment = builder.top().unwrap();
        assert_eq!(fragment.states().len(), 4);
        assert_eq!(fragment.num_of_accepting(), 1);

        let first_last = fragment.states().get(StateId::new(1)).unwrap();
        assert!(!first_last.is_accepting());
        assert_eq!(first_last.next_state(Symbol::Epsilon), Some(StateId::new(2)));
        assert_eq!(fragment.last(), StateId::new(3));
    }

    #[test]
    fn test_star_wiring() {
        let mut allocator = StateAllocator::new();
        let mut builder = FragmentBuilder::new(&mut allocator);

        builder.atom('a');
        builder.star().unwrap();

        let nfa = builder.finish().unwrap();
        let start = nfa.state(nfa.start_state()).unwrap();
        let epsilon_targets: Vec<StateId> = start.targets(Symbol::Epsilon).collect();

        // New start skips to the new end, or enters the inner fragment.
        assert_eq!(epsilon_targets, vec![StateId::new(3), StateId::new(0)]);

        let inner_last = nfa.state(StateId::new(1)).unwrap();
        let loop_targets: Vec<StateId> = inner_last.targets(Symbol::Epsilon).collect();
        assert_eq!(loop_targets, vec![StateId::new(3), StateId::new(0)]);
        assert!(!inner_last.is_accepting());

        let accepting: Vec<StateId> = nfa.accepting_states().map(|state| state.id()).collect();
        assert_eq!(accepting, vec![StateId::new(3)]);
    }

    #[test]
    fn test_union_wiring() {
        let mut allocator = StateAllocator::new();
        let mut builder = FragmentBuilder::new(&mut allocator);

        builder.atom('a');
        builder.atom('b');
        builder.union().unwrap();

        let nfa = builder.finish().unwrap();
        assert_eq!(nfa.num_of_states(), 6);
        assert_eq!(nfa.start_state(), StateId::new(4));

        for last in [StateId::new(1), StateId::new(3)] {
            let state = nfa.state(last).unwrap();
            assert!(!state.is_accepting());
            assert_eq!(state.next_state(Symbol::Epsilon), Some(StateId::new(5)));
        }
    }

    #[test]
    fn test_missing_operands() {
        let mut allocator = StateAllocator::new();
        let mut builder = FragmentBuilder::new(&mut allocator);

        assert_eq!(
            builder.star(),
            Err(MissingOperands {
                required: 1,
                available: 0
            })
        );

        builder.atom('a');
        assert_eq!(
            builder.union(),
            Err(MissingOperands {
                required: 2,
                available: 1
            })
        );
        assert_eq!(
            builder.concatenate(),
            Err(MissingOperands {
                required: 2,
                available: 1
            })
        );

        // A failed operation leaves the stack as it was.
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_apply_requires_arity() {
        let mut allocator = StateAllocator::new();
        let mut builder = FragmentBuilder::new(&mut allocator);

        for operator in [Operator::Union, Operator::Star, Operator::Concatenate] {
            assert_eq!(
                builder.apply(operator),
                Err(MissingOperands {
                    required: operator.arity(),
                    available: 0
                })
            );
        }

        builder.atom('a');
        assert_eq!(
            builder.apply(Operator::Union).unwrap_err().required,
            Operator::Union.arity()
        );
        builder.apply(Operator::Star).unwrap();
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_long_concatenation_chain() {
        let mut allocator = StateAllocator::new();
        let mut builder = FragmentBuilder::new(&mut allocator);

        builder.atom('a');
        for _ in 0..20_000 {
            builder.atom('b');
            builder.concatenate().unwrap();
        }
        builder.star().unwrap();

        let nfa = builder.finish().unwrap();
        assert_eq!(nfa.num_of_states(), 40_004);
        assert_eq!(nfa.accepting_states().count(), 1);
    }

    #[test]
    fn test_finish_requires_single_fragment() {
        let mut allocator = StateAllocator::new();
        let builder = FragmentBuilder::new(&mut allocator);
        assert_eq!(builder.finish().unwrap_err(), 0);

        let mut builder = FragmentBuilder::new(&mut allocator);
        builder.atom('a');
        builder.atom('b');
        assert_eq!(builder.finish().unwrap_err(), 2);
    }
}
