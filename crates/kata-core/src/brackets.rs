//! # Balanced Brackets — Single-Pass Stack Matching
//!
//! Decides whether every opening bracket in a string is closed by the
//! matching closer in correctly nested order.
//!
//! ## Algorithm
//!
//! One left-to-right pass over the characters with a working stack that is
//! local to the call:
//!
//! 1. If the top of the stack is an opening bracket whose closer equals the
//!    current character, pop it.
//! 2. Otherwise push the current character.
//!
//! The input is balanced iff the stack is empty after the last character.
//!
//! ## Push-on-Mismatch
//!
//! A closer that does not match the top of the stack is pushed rather than
//! rejected, and so is every non-bracket character. Neither can ever be
//! popped again (only an opener on top can be popped), so the result is
//! still `false` for `"(]"`, `"([)]"` or `"a"`. The mismatch is reported
//! through the final stack, not at the point where it occurs.

/// The fixed opener/closer pairs, in lookup order.
pub const BRACKET_PAIRS: &[(char, char)] = &[('(', ')'), ('{', '}'), ('[', ']')];

/// Returns the closing bracket for `open`, or `None` if `open` is not an
/// opening bracket.
pub fn closing_for(open: char) -> Option<char> {
    BRACKET_PAIRS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|(_, c)| *c)
}

/// Returns true if `c` is one of the opening brackets in [`BRACKET_PAIRS`].
pub fn is_opening(c: char) -> bool {
    closing_for(c).is_some()
}

/// Returns true if `c` closes the bracket `top`.
fn closes(top: char, c: char) -> bool {
    closing_for(top) == Some(c)
}

/// One scan step: pop if `c` closes the top of the stack, push otherwise.
fn step(stack: &mut Vec<char>, c: char) {
    match stack.last() {
        Some(&top) if closes(top, c) => {
            stack.pop();
        }
        _ => stack.push(c),
    }
}

/// Check whether `input` is balanced.
///
/// Total over all strings: never fails and never panics. The empty string
/// is balanced.
///
/// Stops scanning as soon as the stack is deeper than the number of bytes
/// left: each remaining character pops at most one entry, and every
/// character is at least one byte, so the stack can no longer drain.
pub fn is_balanced(input: &str) -> bool {
    let mut stack: Vec<char> = Vec::new();

    for (idx, c) in input.char_indices() {
        step(&mut stack, c);

        let remaining = input.len() - idx - c.len_utf8();
        if stack.len() > remaining {
            return false;
        }
    }

    stack.is_empty()
}

/// Run the full pass and return what is left on the working stack,
/// bottom first.
///
/// Unlike [`is_balanced`] this never exits early, so the residue always
/// reflects the whole input. `is_balanced(s) == residue(s).is_empty()`.
pub fn residue(input: &str) -> Vec<char> {
    let mut stack: Vec<char> = Vec::new();

    for c in input.chars() {
        step(&mut stack, c);
    }

    stack
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strings built only from properly nested pairs.
    fn balanced_string() -> impl Strategy<Value = String> {
        Just(String::new()).prop_recursive(
            8,  // depth
            64, // desired size
            4,  // items per collection
            |inner| {
                prop_oneof![
                    (0..BRACKET_PAIRS.len(), inner.clone()).prop_map(|(i, s)| {
                        let (o, c) = BRACKET_PAIRS[i];
                        format!("{o}{s}{c}")
                    }),
                    (inner.clone(), inner).prop_map(|(a, b)| a + &b),
                ]
            },
        )
    }

    proptest! {
        #[test]
        fn nested_pairs_are_balanced(s in balanced_string()) {
            prop_assert!(is_balanced(&s));
        }

        #[test]
        fn concatenation_stays_balanced(a in balanced_string(), b in balanced_string()) {
            prop_assert!(is_balanced(&(a + &b)));
        }

        #[test]
        fn is_balanced_matches_residue(s in "[(){}\\[\\]a-c]{0,24}") {
            prop_assert_eq!(is_balanced(&s), residue(&s).is_empty());
        }

        #[test]
        fn any_non_bracket_char_unbalances(
            s in balanced_string(),
            pos in any::<prop::sample::Index>(),
            ch in "[a-zA-Z0-9 ]",
        ) {
            let mut chars: Vec<char> = s.chars().collect();
            let at = pos.index(chars.len() + 1);
            chars.extend(ch.chars());
            chars[at..].rotate_right(1);
            let mixed: String = chars.into_iter().collect();
            prop_assert!(!is_balanced(&mixed));
        }

        #[test]
        fn never_panics(s in any::<String>()) {
            let _ = is_balanced(&s);
            let _ = residue(&s);
        }
    }
}
