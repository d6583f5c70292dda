#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod alphabet;
mod automaton;
mod closure;
mod compile;
mod determinize;
mod fragment;
mod matcher;
mod random_postfix;
mod regex_automata;
mod state;
mod state_set;
mod symbol;

pub use alphabet::*;
pub use automaton::*;
pub use closure::*;
pub use compile::*;
pub use determinize::*;
pub use fragment::*;
pub use matcher::*;
pub use random_postfix::*;
pub use regex_automata::*;
pub use state::*;
pub use state_set::*;
pub use symbol::*;
