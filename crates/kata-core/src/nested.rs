//! # Nested Sum — Summation over Arbitrarily Nested Sequences
//!
//! A [`Nested`] value is either a numeric leaf or a list of further
//! `Nested` values, to any depth. [`nested_sum`] adds every numeric leaf.
//!
//! ## Numeric Types
//!
//! Leaves are integers (`i64`) or floats (`f64`). Integer leaves are summed
//! exactly in `i128`, so the result does not depend on leaf order; an
//! integer-only total outside the `i64` range is an error, never a wrap.
//! As soon as any float leaf is present the result is a float.
//!
//! Parsing rejects integer literals above `i64::MAX` instead of reading them
//! as floats. Literals beyond the `u64` range are already floats by the time
//! `serde_json` hands them over and are accepted as such.
//!
//! ## Depth
//!
//! Traversal uses an explicit work stack on the heap. Summation,
//! flattening, depth measurement, `Clone`, `PartialEq`, `Debug` and `Drop`
//! do not recurse on the call stack, so values built programmatically may
//! be nested as deep as memory allows. Parsing goes through serde and is
//! bounded by `serde_json`'s nesting limit of 128; serialization recurses
//! once per level.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::NestedError;

/// An arbitrarily nested sequence of numbers.
#[derive(Serialize)]
#[serde(untagged)]
pub enum Nested {
    /// Integer leaf.
    Int(i64),
    /// Floating-point leaf.
    Float(f64),
    /// A sequence of leaves and sub-sequences.
    List(Vec<Nested>),
}

/// A numeric leaf or sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Exact integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
}

impl Number {
    /// The value as an `f64`. Large integers may lose precision.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Int(n) => n as f64,
            Self::Float(f) => f,
        }
    }

    /// Returns true if this is an exact integer.
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl Nested {
    /// Parse a nested sequence from JSON text.
    ///
    /// Accepts a bare number or an array whose elements are numbers or
    /// arrays of the same shape. Strings, booleans, `null` and objects are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns `NestedError::InvalidInput` if `json` is not valid JSON or
    /// contains a non-numeric leaf.
    pub fn parse(json: &str) -> Result<Self, NestedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Iterate over the numeric leaves in left-to-right order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// Nesting depth: 0 for a leaf, 1 for a flat list (including `[]`).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, level)) = stack.pop() {
            if let Self::List(items) = node {
                max = max.max(level + 1);
                stack.extend(items.iter().map(|item| (item, level + 1)));
            }
        }
        max
    }

    /// Flatten `depth` levels of nesting into the top-level list.
    ///
    /// `flatten(0)` returns an unchanged copy; `flatten(usize::MAX)` yields
    /// a list of leaves only. A bare leaf is returned as-is.
    pub fn flatten(&self, depth: usize) -> Nested {
        let items = match self {
            Self::List(items) => items,
            leaf => return leaf.clone(),
        };

        let mut out = Vec::with_capacity(items.len());
        let mut stack = vec![(items.iter(), depth)];
        loop {
            let Some((iter, budget)) = stack.last_mut() else {
                break;
            };
            let budget = *budget;
            match iter.next() {
                None => {
                    stack.pop();
                }
                Some(Self::List(inner)) if budget > 0 => stack.push((inner.iter(), budget - 1)),
                Some(item) => out.push(item.clone()),
            }
        }
        Self::List(out)
    }
}

impl From<i64> for Nested {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Nested {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Vec<Nested>> for Nested {
    fn from(items: Vec<Nested>) -> Self {
        Self::List(items)
    }
}

impl Drop for Nested {
    fn drop(&mut self) {
        let Self::List(items) = self else {
            return;
        };
        // Detach every descendant list before it is dropped, so each node
        // is dropped with an empty `Vec`.
        let mut pending = std::mem::take(items);
        while let Some(mut node) = pending.pop() {
            if let Self::List(children) = &mut node {
                pending.append(children);
            }
        }
    }
}

impl Clone for Nested {
    fn clone(&self) -> Self {
        let items = match self {
            Self::Int(n) => return Self::Int(*n),
            Self::Float(f) => return Self::Float(*f),
            Self::List(items) => items,
        };

        // `parents` holds the suspended source iterator and partially built
        // copy of every list above the one being copied.
        let mut parents = Vec::new();
        let mut iter = items.iter();
        let mut out = Vec::with_capacity(items.len());
        loop {
            match iter.next() {
                Some(Self::Int(n)) => out.push(Self::Int(*n)),
                Some(Self::Float(f)) => out.push(Self::Float(*f)),
                Some(Self::List(inner)) => {
                    let outer = std::mem::replace(&mut iter, inner.iter());
                    let copied = std::mem::replace(&mut out, Vec::with_capacity(inner.len()));
                    parents.push((outer, copied));
                }
                None => {
                    let done = Self::List(out);
                    match parents.pop() {
                        Some((outer, mut copied)) => {
                            copied.push(done);
                            iter = outer;
                            out = copied;
                        }
                        None => return done,
                    }
                }
            }
        }
    }
}

impl PartialEq for Nested {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some(pair) = stack.pop() {
            match pair {
                (Self::Int(a), Self::Int(b)) if a == b => {}
                (Self::Float(a), Self::Float(b)) if a == b => {}
                (Self::List(a), Self::List(b)) if a.len() == b.len() => {
                    stack.extend(a.iter().zip(b.iter()));
                }
                _ => return false,
            }
        }
        true
    }
}

/// Debug output uses JSON-like brackets, with floats always showing a
/// fractional part: `[1, [2.5], []]`.
impl fmt::Debug for Nested {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Token<'a> {
            Node(&'a Nested),
            Separator,
            Close,
        }

        let mut stack = vec![Token::Node(self)];
        while let Some(token) = stack.pop() {
            match token {
                Token::Node(Nested::Int(n)) => write!(f, "{n}")?,
                Token::Node(Nested::Float(x)) => write!(f, "{x:?}")?,
                Token::Node(Nested::List(items)) => {
                    f.write_str("[")?;
                    stack.push(Token::Close);
                    for (i, item) in items.iter().enumerate().rev() {
                        stack.push(Token::Node(item));
                        if i > 0 {
                            stack.push(Token::Separator);
                        }
                    }
                }
                Token::Separator => f.write_str(", ")?,
                Token::Close => f.write_str("]")?,
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Nested {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NestedVisitor)
    }
}

struct NestedVisitor;

impl<'de> Visitor<'de> for NestedVisitor {
    type Value = Nested;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or an array of nested numbers")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Nested, E> {
        Ok(Nested::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Nested, E> {
        i64::try_from(v)
            .map(Nested::Int)
            .map_err(|_| E::custom(format!("integer {v} is out of range for i64")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Nested, E> {
        Ok(Nested::Float(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Nested, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Nested::List(items))
    }
}

/// Left-to-right iterator over the numeric leaves of a [`Nested`] value.
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<&'a Nested>,
}

impl Iterator for Leaves<'_> {
    type Item = Number;

    fn next(&mut self) -> Option<Number> {
        while let Some(node) = self.stack.pop() {
            match node {
                Nested::Int(n) => return Some(Number::Int(*n)),
                Nested::Float(f) => return Some(Number::Float(*f)),
                Nested::List(items) => self.stack.extend(items.iter().rev()),
            }
        }
        None
    }
}

/// Sum every numeric leaf of `value`.
///
/// An empty list sums to `Int(0)`. Integer leaves are added exactly in
/// `i128`; float leaves are accumulated separately and the result is
/// `Float` if there was at least one.
///
/// # Errors
///
/// Returns `NestedError::Overflow` if there are no float leaves and the
/// integer total does not fit in an `i64`.
pub fn nested_sum(value: &Nested) -> Result<Number, NestedError> {
    // Each leaf is within 2^63 of zero, so only more than 2^64 leaves could
    // saturate the accumulator.
    let mut int_sum: i128 = 0;
    let mut float_sum: f64 = 0.0;
    let mut saw_float = false;

    for leaf in value.leaves() {
        match leaf {
            Number::Int(n) => int_sum = int_sum.saturating_add(i128::from(n)),
            Number::Float(f) => {
                float_sum += f;
                saw_float = true;
            }
        }
    }

    if saw_float {
        return Ok(Number::Float(int_sum as f64 + float_sum));
    }
    i64::try_from(int_sum)
        .map(Number::Int)
        .map_err(|_| NestedError::Overflow { total: int_sum })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: Vec<Nested>) -> Nested {
        Nested::List(items)
    }

    #[test]
    fn test_empty_list_sums_to_zero() {
        assert_eq!(nested_sum(&list(vec![])).unwrap(), Number::Int(0));
    }

    #[test]
    fn test_bare_leaf_sums_to_itself() {
        assert_eq!(nested_sum(&Nested::Int(7)).unwrap(), Number::Int(7));
        assert_eq!(nested_sum(&Nested::Float(0.5)).unwrap(), Number::Float(0.5));
    }

    #[test]
    fn test_recursive_example() {
        let v = Nested::parse("[1, 2, [3, 4, [5, 6]], 7, [8, [9]]]").unwrap();
        assert_eq!(nested_sum(&v).unwrap(), Number::Int(45));
    }

    #[test]
    fn test_mixed_types_promote_to_float() {
        let v = Nested::parse("[1, [2.5, [3]]]").unwrap();
        assert_eq!(nested_sum(&v).unwrap(), Number::Float(6.5));
    }

    #[test]
    fn test_negative_values() {
        let v = Nested::parse("[-1, [-2, [3]]]").unwrap();
        assert_eq!(nested_sum(&v).unwrap(), Number::Int(0));
    }

    #[test]
    fn test_overflow_is_error() {
        let v = list(vec![Nested::Int(i64::MAX), list(vec![Nested::Int(1)])]);
        match nested_sum(&v) {
            Err(NestedError::Overflow { total }) => {
                assert_eq!(total, i128::from(i64::MAX) + 1);
            }
            other => panic!("expected Overflow, got {other:?}"),
        }

        let v = Nested::parse(&format!("[{}, [-1]]", i64::MIN)).unwrap();
        assert!(matches!(nested_sum(&v), Err(NestedError::Overflow { .. })));
    }

    #[test]
    fn test_sum_independent_of_leaf_order() {
        let max = i64::MAX;
        for json in [
            format!("[{max}, 1, -1]"),
            format!("[-1, {max}, 1]"),
            format!("[1, [{max}], [[-1]]]"),
        ] {
            let v = Nested::parse(&json).unwrap();
            assert_eq!(nested_sum(&v).unwrap(), Number::Int(max), "{json}");
        }
    }

    #[test]
    fn test_float_leaf_avoids_integer_overflow() {
        let v = Nested::parse(&format!("[{}, 1, 0.5]", i64::MAX)).unwrap();
        match nested_sum(&v).unwrap() {
            Number::Float(f) => assert_eq!(f, i64::MAX as f64 + 1.5),
            other => panic!("expected Float, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_integers() {
        let err = Nested::parse("[18446744073709551615, 1]").unwrap_err();
        assert!(err.to_string().contains("out of range for i64"), "{err}");
        assert!(Nested::parse(&format!("[{}]", i64::MAX as u64 + 1)).is_err());
        assert_eq!(
            Nested::parse(&format!("[{}]", i64::MAX)).unwrap(),
            list(vec![Nested::Int(i64::MAX)])
        );
        assert_eq!(
            Nested::parse(&format!("[{}]", i64::MIN)).unwrap(),
            list(vec![Nested::Int(i64::MIN)])
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_leaves() {
        assert!(Nested::parse(r#"[1, "2"]"#).is_err());
        assert!(Nested::parse("[true]").is_err());
        assert!(Nested::parse("[null]").is_err());
        assert!(Nested::parse(r#"{"a": 1}"#).is_err());
        assert!(Nested::parse("[1,").is_err());
    }

    #[test]
    fn test_leaves_order() {
        let v = Nested::parse("[1, [2, [3]], 4]").unwrap();
        let leaves: Vec<Number> = v.leaves().collect();
        assert_eq!(
            leaves,
            vec![Number::Int(1), Number::Int(2), Number::Int(3), Number::Int(4)]
        );
    }

    #[test]
    fn test_depth() {
        assert_eq!(Nested::Int(1).depth(), 0);
        assert_eq!(Nested::parse("[]").unwrap().depth(), 1);
        assert_eq!(Nested::parse("[1, 2]").unwrap().depth(), 1);
        assert_eq!(Nested::parse("[1, [2, [3, [4]]]]").unwrap().depth(), 4);
        assert_eq!(Nested::parse("[[[]], [1]]").unwrap().depth(), 3);
    }

    #[test]
    fn test_flatten_one_level() {
        let v = Nested::parse("[1, 2, [3, 4, [5, [6, 8]]]]").unwrap();
        let flat = v.flatten(1);
        assert_eq!(flat, Nested::parse("[1, 2, 3, 4, [5, [6, 8]]]").unwrap());
    }

    #[test]
    fn test_flatten_fully() {
        let v = Nested::parse("[1, 2, [3, 4, [5, [6, 8]]]]").unwrap();
        assert_eq!(v.flatten(3), Nested::parse("[1, 2, 3, 4, 5, 6, 8]").unwrap());
        assert_eq!(v.flatten(usize::MAX), v.flatten(3));
    }

    #[test]
    fn test_flatten_zero_is_identity() {
        let v = Nested::parse("[1, [2, [3]]]").unwrap();
        assert_eq!(v.flatten(0), v);
    }

    #[test]
    fn test_flatten_drops_empty_lists() {
        let v = Nested::parse("[[], [1, []], 2]").unwrap();
        assert_eq!(v.flatten(usize::MAX), Nested::parse("[1, 2]").unwrap());
    }

    #[test]
    fn test_flatten_leaf_is_leaf() {
        assert_eq!(Nested::Int(3).flatten(2), Nested::Int(3));
    }

    fn deep(levels: usize) -> Nested {
        let mut v = Nested::Int(1);
        for _ in 0..levels {
            v = list(vec![v]);
        }
        v
    }

    #[test]
    fn test_deep_nesting_without_recursion() {
        let v = deep(100_000);
        assert_eq!(nested_sum(&v).unwrap(), Number::Int(1));
        assert_eq!(v.depth(), 100_000);
        assert_eq!(v.flatten(usize::MAX), list(vec![Nested::Int(1)]));
        drop(v);
    }

    #[test]
    fn test_deep_value_clone_compare_and_flatten_zero() {
        let v = deep(100_000);
        let copy = v.clone();
        assert_eq!(copy, v);
        assert_eq!(v.flatten(0), v);
        assert_ne!(deep(99_999), v);
        let partial = v.flatten(10);
        assert_eq!(partial.depth(), 100_000 - 10);
    }

    #[test]
    fn test_deep_value_debug() {
        let rendered = format!("{:?}", deep(100_000));
        assert_eq!(rendered.len(), 2 * 100_000 + 1);
        assert!(rendered.starts_with("[[[") && rendered.ends_with("1]]]"));
    }

    #[test]
    fn test_debug_format() {
        let v = Nested::parse("[1, [2.5, 3.0], []]").unwrap();
        assert_eq!(format!("{v:?}"), "[1, [2.5, 3.0], []]");
    }

    #[test]
    fn test_eq_distinguishes_int_and_float() {
        assert_ne!(Nested::Int(1), Nested::Float(1.0));
        assert_ne!(
            Nested::parse("[1, [2]]").unwrap(),
            Nested::parse("[1, [2, 3]]").unwrap()
        );
        assert_ne!(Nested::Float(f64::NAN), Nested::Float(f64::NAN));
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Number::Int(15).to_string(), "15");
        assert_eq!(Number::Float(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_serialize_roundtrip_shape() {
        let v = Nested::parse("[1, [2.5], []]").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1,[2.5],[]]");
    }
}
