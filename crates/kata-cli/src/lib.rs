//! # kata-cli — CLI Tool for the Kata Stack
//!
//! Provides the `kata` command-line interface over the pure functions in
//! `kata-core`. All I/O, logging and configuration live here.
//!
//! ## Subcommands
//!
//! - `kata brackets` — Balanced-bracket check with residue reporting.
//! - `kata sum` — Sum (or flatten) a nested JSON array.
//! - `kata sort` — Category-ordered character sort.
//! - `kata check` — Run a YAML suite of cases against all three.
//!
//! ```bash
//! kata brackets '{([][[[][]({})]])}'
//! kata sum '[1, 2, [3, 4, [5]]]'
//! kata sort foobar1237348421
//! kata check suites/reference.yaml
//! ```
//!
//! ## Exit Codes
//!
//! Handlers return `Ok(EXIT_OK)` or `Ok(EXIT_NEGATIVE)` for normal
//! outcomes and `Err` for operational failures, which `main` maps to
//! `EXIT_ERROR`.

pub mod brackets;
pub mod check;
pub mod config;
pub mod logging;
pub mod sort;
pub mod sum;

/// Success: balanced input, computed result, or every suite case passed.
pub const EXIT_OK: u8 = 0;

/// Negative outcome: unbalanced input or at least one failing suite case.
pub const EXIT_NEGATIVE: u8 = 1;

/// Operational error: unreadable file, malformed input, rejected character.
pub const EXIT_ERROR: u8 = 2;
