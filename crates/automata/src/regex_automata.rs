#![forbid(unsafe_code)]

use regaut_utilities::Timing;

use crate::CompileError;
use crate::Dfa;
use crate::Nfa;
use crate::StateAllocator;
use crate::compile_nfa;
use crate::determinize;
use crate::dfa_accepts;

/// The NFA of a postfix expression together with its determinization. Both
/// automata draw their states from the same allocator, so their identifiers
/// are disjoint.
#[derive(Clone, Debug)]
pub struct RegexAutomata {
    nfa: Nfa,
    dfa: Dfa,
}

impl RegexAutomata {
    /// Compiles and determinizes the given postfix expression, recording the
    /// duration of both stages in `timing`.
    pub fn from_postfix(postfix: &str, timing: &mut Timing) -> Result<Self, CompileError> {
        let mut allocator = StateAllocator::new();

        let mut compile_time = timing.start("compile");
        let nfa = compile_nfa(postfix, &mut allocator);
        compile_time.finish();
        let nfa = nfa?;

        let mut determinize_time = timing.start("determinize");
        let dfa = determinize(&nfa, &mut allocator).expect("A compiled NFA has at least two states");
        determinize_time.finish();

        Ok(Self { nfa, dfa })
    }

    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Returns true iff the expression matches the whole input.
    pub fn is_match(&self, input: &str) -> bool {
        dfa_accepts(&self.dfa, input)
    }
}
