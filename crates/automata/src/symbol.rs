#![forbid(unsafe_code)]

//! The symbols on transitions and the tokens of postfix expressions.

use std::fmt;

/// The label of a transition.
///
/// The epsilon move is a separate variant, so it can never be confused with a
/// literal of the expression, including the character `'0'`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A non-consuming move.
    Epsilon,
    /// Consumes exactly the given character.
    Char(char),
}

impl Symbol {
    /// Returns true iff this is the epsilon symbol.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Symbol::Char(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

/// The reserved operators of a postfix expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Union,
    Star,
    Concatenate,
}

impl Operator {
    pub const UNION: char = '|';
    pub const STAR: char = '*';
    pub const CONCATENATE: char = '&';

    /// Returns the operator denoted by the given character, if it is reserved.
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            Self::UNION => Some(Operator::Union),
            Self::STAR => Some(Operator::Star),
            Self::CONCATENATE => Some(Operator::Concatenate),
            _ => None,
        }
    }

    /// Returns the reserved character of this operator.
    pub fn as_char(&self) -> char {
        match self {
            Operator::Union => Self::UNION,
            Operator::Star => Self::STAR,
            Operator::Concatenate => Self::CONCATENATE,
        }
    }

    /// Returns the number of fragments this operator consumes.
    pub fn arity(&self) -> usize {
        match self {
            Operator::Star => 1,
            Operator::Union | Operator::Concatenate => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single token of a postfix expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Literal(char),
    Operator(Operator),
}

impl Token {
    /// Every character that is not a reserved operator is a literal.
    pub fn from_char(c: char) -> Token {
        match Operator::from_char(c) {
            Some(operator) => Token::Operator(operator),
            None => Token::Literal(c),
        }
    }
}

/// Splits a postfix expression into its tokens, one per character.
pub fn tokenize(postfix: &str) -> impl Iterator<Item = Token> + '_ {
    postfix.chars().map(Token::from_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens: Vec<Token> = tokenize("a0&*|").collect();

        assert_eq!(
            tokens,
            vec![
                Token::Literal('a'),
                Token::Literal('0'),
                Token::Operator(Operator::Concatenate),
                Token::Operator(Operator::Star),
                Token::Operator(Operator::Union),
            ]
        );
    }

    #[test]
    fn test_epsilon_is_not_a_literal() {
        assert_ne!(Symbol::Epsilon, Symbol::from('0'));
        assert!(Symbol::Epsilon.is_epsilon());
        assert!(!Symbol::from('ε').is_epsilon());
    }
}
