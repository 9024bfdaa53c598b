//! # Sum Subcommand
//!
//! Parses a nested JSON array of numbers, from the command line or a file,
//! and prints the sum of its leaves. With `--flatten-depth N` it prints the
//! array flattened `N` levels instead.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kata_core::{nested_sum, Nested};

use crate::EXIT_OK;

/// Arguments for the `kata sum` subcommand.
#[derive(Args, Debug)]
pub struct SumArgs {
    /// Nested JSON array, e.g. '[1, [2, [3]]]'.
    #[arg(value_name = "JSON", required_unless_present = "file", conflicts_with = "file")]
    pub input: Option<String>,

    /// Read the JSON array from a file instead.
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Print the array flattened this many levels instead of its sum.
    #[arg(long)]
    pub flatten_depth: Option<usize>,

    /// Emit a JSON object instead of plain text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the sum subcommand.
///
/// Returns exit code 0; malformed input and integer overflow are errors.
pub fn run_sum(args: &SumArgs, out: &mut dyn Write) -> Result<u8> {
    let text = match (&args.input, &args.file) {
        (Some(input), _) => input.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file: {}", path.display()))?,
        (None, None) => anyhow::bail!("no input given; pass a JSON array or --file"),
    };

    let value = Nested::parse(&text).context("input is not a nested array of numbers")?;
    tracing::debug!(depth = value.depth(), "parsed nested input");

    if let Some(depth) = args.flatten_depth {
        let flat = value.flatten(depth);
        if args.json {
            let report = serde_json::json!({ "flattened": flat, "depth": flat.depth() });
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        } else {
            writeln!(out, "{}", serde_json::to_string(&flat)?)?;
        }
        return Ok(EXIT_OK);
    }

    let sum = nested_sum(&value)?;
    tracing::info!(%sum, "nested sum computed");

    if args.json {
        let report = serde_json::json!({
            "sum": sum,
            "leaves": value.leaves().count(),
            "depth": value.depth(),
        });
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else {
        writeln!(out, "{sum}")?;
    }

    Ok(EXIT_OK)
}
