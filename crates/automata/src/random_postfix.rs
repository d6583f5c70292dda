#![forbid(unsafe_code)]

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::Operator;

/// Generates a random well-formed postfix expression with the given number
/// of literals, which are drawn from `symbols`. Every literal may be
/// followed by a star, and binary operators are chosen uniformly.
pub fn random_postfix(rng: &mut impl Rng, num_of_literals: usize, symbols: &[char]) -> String {
    assert!(num_of_literals > 0, "A postfix expression needs at least one literal");
    assert!(
        symbols.iter().all(|c| Operator::from_char(*c).is_none()),
        "Literals cannot be reserved operators"
    );

    let mut result = String::new();
    let mut remaining = num_of_literals;

    // The number of fragments on the operand stack after the emitted prefix.
    let mut depth = 0usize;

    while remaining > 0 || depth > 1 {
        if remaining > 0 && (depth < 2 || rng.random_bool(0.5)) {
            result.push(*symbols.choose(rng).expect("At least one symbol must be given"));
            remaining -= 1;
            depth += 1;

            if rng.random_bool(0.2) {
                result.push(Operator::STAR);
            }
        } else {
            let operator = if rng.random_bool(0.5) {
                Operator::UNION
            } else {
                Operator::CONCATENATE
            };
            result.push(operator);
            depth -= 1;

            if rng.random_bool(0.1) {
                result.push(Operator::STAR);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use regaut_utilities::random_test;

    use crate::StateAllocator;
    use crate::compile_nfa;

    use super::*;

    #[test]
    fn test_random_postfix_is_well_formed() {
        random_test(100, |rng| {
            let postfix = random_postfix(rng, 7, &['x', 'y']);

            let literals = postfix.chars().filter(|c| *c == 'x' || *c == 'y').count();
            assert_eq!(literals, 7, "{postfix}");

            let mut allocator = StateAllocator::new();
            assert!(compile_nfa(&postfix, &mut allocator).is_ok(), "{postfix}");
        });
    }
}
