#![forbid(unsafe_code)]

use log::debug;
use log::info;
use regaut_utilities::debug_trace;
use thiserror::Error;

use crate::Automaton;
use crate::FragmentBuilder;
use crate::Nfa;
use crate::Operator;
use crate::StateAllocator;
use crate::Token;
use crate::tokenize;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(
        "Operator '{operator}' at position {position} requires {required} operand(s), but only {available} available"
    )]
    InsufficientOperands {
        operator: Operator,
        position: usize,
        required: usize,
        available: usize,
    },

    #[error("Postfix expression reduces to {fragments} fragments instead of exactly one")]
    Malformed { fragments: usize },
}

/// Compiles a regular expression in postfix notation into an NFA using
/// Thompson's construction.
///
/// Every character other than `|`, `*` and `&` is a literal. Compilation
/// stops at the first operator that lacks operands. The empty expression is
/// rejected with [CompileError::Malformed], since it leaves no fragment.
pub fn compile_nfa(postfix: &str, allocator: &mut StateAllocator) -> Result<Nfa, CompileError> {
    info!("Compiling postfix expression {postfix:?}...");

    let mut builder = FragmentBuilder::new(allocator);
    for (position, token) in tokenize(postfix).enumerate() {
        debug_trace!("Token {position}: {token:?}");

        match token {
            Token::Literal(symbol) => builder.atom(symbol),
            Token::Operator(operator) => {
                builder
                    .apply(operator)
                    .map_err(|missing| CompileError::InsufficientOperands {
                        operator,
                        position,
                        required: missing.required,
                        available: missing.available,
                    })?;
            }
        }
    }

    debug!("Collected alphabet {}", builder.alphabet());

    let nfa = builder
        .finish()
        .map_err(|fragments| CompileError::Malformed { fragments })?;

    info!(
        "Compiled NFA with {} states and {} transitions",
        nfa.num_of_states(),
        nfa.num_of_transitions()
    );
    Ok(nfa)
}
