//! # Check Subcommand
//!
//! Runs a YAML suite of cases against the three exercises and reports each
//! case as `OK` or `FAIL`.
//!
//! ## Suite Format
//!
//! ```yaml
//! cases:
//!   - name: reference example
//!     kind: brackets
//!     input: "{([][[[][]({})]])}"
//!     expect: true
//!   - kind: sum
//!     input: [1, 2, [3, 4, [5]]]
//!     expect: 15
//!   - kind: sort
//!     input: foobar1237348421
//!     expect: abfoor2244811337
//!   - kind: sort
//!     input: "a b"
//!     expect: ~          # null expects the input to be rejected
//!   - kind: sort
//!     input: "b a"
//!     unclassified: pass_through
//!     expect: "ab "
//! ```
//!
//! Every case must state `expect`; a sort case that leaves it out is a
//! parse error rather than an expected rejection. Sort cases without
//! `unclassified` use the policy from the config file.
//! Float sums match within a relative tolerance of `1e-9`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use kata_core::{
    category_sort, is_balanced, nested_sum, KataError, Nested, Number, UnclassifiedPolicy,
};

use crate::config::KataConfig;
use crate::{EXIT_NEGATIVE, EXIT_OK};

/// Arguments for the `kata check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the suite YAML file.
    #[arg(value_name = "SUITE_YAML")]
    pub suite: PathBuf,

    /// Emit a JSON report instead of plain text.
    #[arg(long)]
    pub json: bool,
}

/// A suite file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Suite {
    /// Cases in execution order.
    pub cases: Vec<Case>,
}

/// One case, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Case {
    /// Balanced-bracket check.
    Brackets {
        /// Optional label for reports.
        #[serde(default)]
        name: Option<String>,
        /// String to check.
        input: String,
        /// Expected balance.
        expect: bool,
    },
    /// Nested sum.
    Sum {
        /// Optional label for reports.
        #[serde(default)]
        name: Option<String>,
        /// Nested numeric sequence.
        input: Nested,
        /// Expected sum.
        expect: Number,
    },
    /// Category sort.
    Sort {
        /// Optional label for reports.
        #[serde(default)]
        name: Option<String>,
        /// String to sort.
        input: String,
        /// Expected output, or null when the input must be rejected.
        expect: SortExpect,
        /// Policy override for this case.
        #[serde(default)]
        unclassified: Option<UnclassifiedPolicy>,
    },
}

impl Case {
    /// The `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Brackets { .. } => "brackets",
            Self::Sum { .. } => "sum",
            Self::Sort { .. } => "sort",
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            Self::Brackets { name, .. } | Self::Sum { name, .. } | Self::Sort { name, .. } => {
                name.as_deref()
            }
        }
    }

    fn expected(&self) -> String {
        match self {
            Self::Brackets { expect, .. } => expect.to_string(),
            Self::Sum { expect, .. } => expect.to_string(),
            Self::Sort {
                expect: SortExpect::Output(s),
                ..
            } => format!("{s:?}"),
            Self::Sort {
                expect: SortExpect::Rejection,
                ..
            } => "rejection".to_string(),
        }
    }
}

/// Expected outcome of a sort case.
///
/// Deserialized from a string, or from an explicit null for a rejection.
/// There is no default: a missing `expect` is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortExpect {
    /// The sorted output.
    Output(String),
    /// The input must be rejected under the case's policy.
    Rejection,
}

impl<'de> Deserialize<'de> for SortExpect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SortExpectVisitor)
    }
}

struct SortExpectVisitor;

impl<'de> Visitor<'de> for SortExpectVisitor {
    type Value = SortExpect;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("the sorted string, or null to expect a rejection")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SortExpect, E> {
        Ok(SortExpect::Output(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<SortExpect, E> {
        Ok(SortExpect::Output(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<SortExpect, E> {
        Ok(SortExpect::Rejection)
    }

    fn visit_none<E: de::Error>(self) -> Result<SortExpect, E> {
        Ok(SortExpect::Rejection)
    }
}

/// Outcome of running one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    /// Case label: its `name`, or `#<index> <kind>`.
    pub label: String,
    /// The `kind` tag.
    pub kind: &'static str,
    /// Whether the actual result matched the expectation.
    pub passed: bool,
    /// Expected result, rendered for display.
    pub expected: String,
    /// Actual result, rendered for display.
    pub actual: String,
}

/// Run a single case. `index` is used for the label when the case is
/// unnamed.
pub fn run_case(case: &Case, index: usize, default_policy: UnclassifiedPolicy) -> CaseReport {
    let label = case
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{index} {}", case.kind()));

    let (passed, actual) = match evaluate(case, default_policy) {
        Ok(actual) => (outcome_matches(case, &actual), actual.to_string()),
        Err(KataError::Sort(e))
            if matches!(
                case,
                Case::Sort {
                    expect: SortExpect::Rejection,
                    ..
                }
            ) =>
        {
            (true, format!("rejected: {e}"))
        }
        Err(e) => (false, format!("error: {e}")),
    };

    CaseReport {
        label,
        kind: case.kind(),
        passed,
        expected: case.expected(),
        actual,
    }
}

/// The raw result of evaluating a case.
enum Actual {
    Balanced(bool),
    Sum(Number),
    Sorted(String),
}

impl std::fmt::Display for Actual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balanced(b) => write!(f, "{b}"),
            Self::Sum(n) => write!(f, "{n}"),
            Self::Sorted(s) => write!(f, "{s:?}"),
        }
    }
}

fn evaluate(case: &Case, default_policy: UnclassifiedPolicy) -> Result<Actual, KataError> {
    match case {
        Case::Brackets { input, .. } => Ok(Actual::Balanced(is_balanced(input))),
        Case::Sum { input, .. } => Ok(Actual::Sum(nested_sum(input)?)),
        Case::Sort {
            input,
            unclassified,
            ..
        } => {
            let policy = unclassified.unwrap_or(default_policy);
            Ok(Actual::Sorted(category_sort(input, policy)?))
        }
    }
}

fn outcome_matches(case: &Case, actual: &Actual) -> bool {
    match (case, actual) {
        (Case::Brackets { expect, .. }, Actual::Balanced(b)) => expect == b,
        (Case::Sum { expect, .. }, Actual::Sum(n)) => numbers_match(*expect, *n),
        (
            Case::Sort {
                expect: SortExpect::Output(expect),
                ..
            },
            Actual::Sorted(s),
        ) => expect == s,
        _ => false,
    }
}

/// Integers compare exactly; anything involving a float compares within a
/// relative tolerance of `1e-9`.
fn numbers_match(expected: Number, actual: Number) -> bool {
    match (expected, actual) {
        (Number::Int(a), Number::Int(b)) => a == b,
        (a, b) => {
            let (a, b) = (a.as_f64(), b.as_f64());
            (a - b).abs() <= 1e-9 * a.abs().max(1.0)
        }
    }
}

/// Load and parse a suite file.
pub fn load_suite(path: &std::path::Path) -> Result<Suite> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read suite file: {}", path.display()))?;
    let suite: Suite = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse suite YAML: {}", path.display()))?;
    if suite.cases.is_empty() {
        bail!("suite has no cases: {}", path.display());
    }
    Ok(suite)
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 if every case passed, 1 if any failed.
pub fn run_check(args: &CheckArgs, config: &KataConfig, out: &mut dyn Write) -> Result<u8> {
    let suite = load_suite(&args.suite)?;
    tracing::info!(
        suite = %args.suite.display(),
        cases = suite.cases.len(),
        "running suite"
    );

    let reports: Vec<CaseReport> = suite
        .cases
        .iter()
        .enumerate()
        .map(|(i, case)| run_case(case, i, config.sort.unclassified))
        .collect();

    let passed = reports.iter().filter(|r| r.passed).count();
    let total = reports.len();

    for r in reports.iter().filter(|r| !r.passed) {
        tracing::warn!(case = %r.label, expected = %r.expected, actual = %r.actual, "case failed");
    }

    if args.json {
        let report = serde_json::json!({
            "suite": args.suite.display().to_string(),
            "passed": passed,
            "total": total,
            "cases": reports,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        for r in &reports {
            if r.passed {
                writeln!(out, "OK: {}", r.label)?;
            } else {
                writeln!(
                    out,
                    "FAIL: {} (expected {}, got {})",
                    r.label, r.expected, r.actual
                )?;
            }
        }
        writeln!(out, "{passed}/{total} cases passed")?;
    }

    Ok(if passed == total { EXIT_OK } else { EXIT_NEGATIVE })
}
