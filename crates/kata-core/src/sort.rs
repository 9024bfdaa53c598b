//! # Category Sort
//!
//! Reorders a string's characters into four contiguous groups, each sorted
//! ascending:
//!
//! | # | Category | Characters |
//! |---|----------|------------|
//! | 1 | Lowercase | `a`–`z` |
//! | 2 | Uppercase | `A`–`Z` |
//! | 3 | EvenDigit | `0 2 4 6 8` |
//! | 4 | OddDigit | `1 3 5 7 9` |
//!
//! Classification is ASCII-only. Anything else (whitespace, punctuation,
//! non-ASCII letters) is handled by the [`UnclassifiedPolicy`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SortError;

/// Sort category of a character. Variants are declared in output order,
/// so the derived `Ord` is the group order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// ASCII lowercase letter.
    Lowercase,
    /// ASCII uppercase letter.
    Uppercase,
    /// ASCII digit with an even value.
    EvenDigit,
    /// ASCII digit with an odd value.
    OddDigit,
}

/// Number of sort categories.
pub const CATEGORY_COUNT: usize = 4;

impl Category {
    /// All categories in output order.
    pub fn all() -> &'static [Category] {
        &[
            Self::Lowercase,
            Self::Uppercase,
            Self::EvenDigit,
            Self::OddDigit,
        ]
    }

    /// Classify `c`, or `None` if it belongs to no category.
    pub fn of(c: char) -> Option<Self> {
        if c.is_ascii_lowercase() {
            Some(Self::Lowercase)
        } else if c.is_ascii_uppercase() {
            Some(Self::Uppercase)
        } else if c.is_ascii_digit() {
            if (c as u8 - b'0') % 2 == 0 {
                Some(Self::EvenDigit)
            } else {
                Some(Self::OddDigit)
            }
        } else {
            None
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Lowercase => 0,
            Self::Uppercase => 1,
            Self::EvenDigit => 2,
            Self::OddDigit => 3,
        }
    }
}

/// What to do with characters outside the four categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnclassifiedPolicy {
    /// Fail on the first unclassified character.
    #[default]
    Reject,
    /// Keep unclassified characters, in input order, after the odd digits.
    #[serde(alias = "pass-through")]
    PassThrough,
}

impl UnclassifiedPolicy {
    /// The snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::PassThrough => "pass_through",
        }
    }
}

impl std::fmt::Display for UnclassifiedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnclassifiedPolicy {
    type Err = SortError;

    /// Accepts the serde identifiers and the kebab-case `pass-through`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(Self::Reject),
            "pass_through" | "pass-through" => Ok(Self::PassThrough),
            other => Err(SortError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Sort `input` into category order.
///
/// Within a category characters are ordered by code point. On success the
/// output is a permutation of the input.
///
/// # Errors
///
/// Under [`UnclassifiedPolicy::Reject`], returns `SortError::Unclassified`
/// for the first character that fits no category, with its char index.
pub fn category_sort(input: &str, policy: UnclassifiedPolicy) -> Result<String, SortError> {
    let mut buckets: [Vec<char>; CATEGORY_COUNT] = Default::default();
    let mut passthrough = Vec::new();

    for (index, ch) in input.chars().enumerate() {
        match (Category::of(ch), policy) {
            (Some(category), _) => buckets[category.index()].push(ch),
            (None, UnclassifiedPolicy::PassThrough) => passthrough.push(ch),
            (None, UnclassifiedPolicy::Reject) => {
                return Err(SortError::Unclassified { ch, index });
            }
        }
    }

    let mut out = String::with_capacity(input.len());
    for bucket in &mut buckets {
        bucket.sort_unstable();
        out.extend(bucket.iter());
    }
    out.extend(passthrough);
    Ok(out)
}

/// [`category_sort`] with the [`UnclassifiedPolicy::Reject`] policy.
pub fn category_sort_strict(input: &str) -> Result<String, SortError> {
    category_sort(input, UnclassifiedPolicy::Reject)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Output is a permutation of the input.
        #[test]
        fn output_is_permutation(s in "[a-zA-Z0-9]{0,40}") {
            let out = category_sort_strict(&s).unwrap();
            let mut a: Vec<char> = s.chars().collect();
            let mut b: Vec<char> = out.chars().collect();
            a.sort_unstable();
            b.sort_unstable();
            prop_assert_eq!(a, b);
        }

        /// Output is non-decreasing by (category, char).
        #[test]
        fn output_is_group_ordered(s in "[a-zA-Z0-9]{0,40}") {
            let out = category_sort_strict(&s).unwrap();
            let keys: Vec<(Category, char)> = out
                .chars()
                .map(|c| (Category::of(c).unwrap(), c))
                .collect();
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        }

        /// Sorting is idempotent.
        #[test]
        fn sort_is_idempotent(s in "[a-zA-Z0-9]{0,40}") {
            let once = category_sort_strict(&s).unwrap();
            let twice = category_sort_strict(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Pass-through never fails and preserves length.
        #[test]
        fn pass_through_total(s in any::<String>()) {
            let out = category_sort(&s, UnclassifiedPolicy::PassThrough).unwrap();
            prop_assert_eq!(out.chars().count(), s.chars().count());
        }
    }
}
