#![forbid(unsafe_code)]

use std::fmt;

use itertools::Itertools;

/// The distinct literals of an expression in order of first occurrence.
/// Epsilon is never part of an alphabet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the given symbol unless it is already present. Returns true iff
    /// it was added.
    pub fn insert(&mut self, symbol: char) -> bool {
        if self.contains(symbol) {
            return false;
        }

        self.symbols.push(symbol);
        true
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut alphabet = Alphabet::new();
        for symbol in iter {
            alphabet.insert(symbol);
        }
        alphabet
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.symbols.iter().format(", "))
    }
}
