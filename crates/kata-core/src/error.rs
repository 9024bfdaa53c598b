//! # Error Types
//!
//! Errors for the fallible kata operations. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! Bracket validation has no error type: it is total and reports an
//! unbalanced input as `false`, which is a normal outcome.

use thiserror::Error;

/// Top-level error type for the Kata Stack.
#[derive(Error, Debug)]
pub enum KataError {
    /// Nested sequence parsing or summation failed.
    #[error("nested sum error: {0}")]
    Nested(#[from] NestedError),

    /// Category sort rejected its input.
    #[error("category sort error: {0}")]
    Sort(#[from] SortError),
}

/// Error while parsing or summing a nested numeric sequence.
#[derive(Error, Debug)]
pub enum NestedError {
    /// The input was not a number or a (nested) array of numbers.
    #[error("invalid nested input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// The integer-only sum does not fit in an `i64`.
    #[error("integer overflow: sum {total} does not fit in i64")]
    Overflow {
        /// Exact total of the integer leaves.
        total: i128,
    },
}

/// Error raised by the category sort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// A character outside the four sort categories was found under the
    /// reject policy.
    #[error("character {ch:?} at index {index} is not a lowercase letter, uppercase letter, or digit")]
    Unclassified {
        /// The offending character.
        ch: char,
        /// Character (not byte) index into the input.
        index: usize,
    },

    /// Unrecognized unclassified-character policy name.
    #[error("unknown unclassified policy {0:?}; expected \"reject\" or \"pass-through\"")]
    UnknownPolicy(String),
}
