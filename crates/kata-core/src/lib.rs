//! # kata-core — Algorithmic Core for the Kata Stack
//!
//! Pure functions over in-memory data. Nothing here performs I/O, logs,
//! or holds state between calls; every operation is safe to invoke from
//! any number of threads without synchronization.
//!
//! ## Modules
//!
//! - `brackets` — balanced-bracket validation with a single-pass working
//!   stack over the fixed `(`/`{`/`[` pair table.
//! - `nested` — summation over arbitrarily nested numeric sequences, plus
//!   depth-limited flattening.
//! - `sort` — category-ordered character sort (lowercase, uppercase, even
//!   digits, odd digits).
//! - `error` — typed error hierarchy for the fallible operations.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `kata-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Classification is ASCII-only; no locale-aware character handling.

pub mod brackets;
pub mod error;
pub mod nested;
pub mod sort;

// Re-export primary types for ergonomic imports.
pub use brackets::{is_balanced, residue, BRACKET_PAIRS};
pub use error::{KataError, NestedError, SortError};
pub use nested::{nested_sum, Nested, Number};
pub use sort::{category_sort, category_sort_strict, Category, UnclassifiedPolicy};
