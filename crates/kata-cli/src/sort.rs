//! # Sort Subcommand
//!
//! Category-ordered sort of a string. The unclassified-character policy
//! comes from `--unclassified`, then the config file, then the default
//! (`reject`).

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use kata_core::{category_sort, UnclassifiedPolicy};

use crate::config::KataConfig;
use crate::EXIT_OK;

/// Arguments for the `kata sort` subcommand.
#[derive(Args, Debug)]
pub struct SortArgs {
    /// String to sort.
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Handling of characters that are not ASCII letters or digits
    /// (reject or pass-through).
    #[arg(long)]
    pub unclassified: Option<UnclassifiedPolicy>,

    /// Emit a JSON object instead of plain text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the sort subcommand.
///
/// Returns exit code 0; a rejected character is an error.
pub fn run_sort(args: &SortArgs, config: &KataConfig, out: &mut dyn Write) -> Result<u8> {
    let policy = args.unclassified.unwrap_or(config.sort.unclassified);
    tracing::debug!(%policy, input_len = args.input.chars().count(), "sorting input");

    let sorted = category_sort(&args.input, policy)
        .with_context(|| format!("cannot sort {:?} under policy {policy}", args.input))?;

    if args.json {
        let report = serde_json::json!({
            "input": args.input,
            "sorted": sorted,
            "unclassified": policy,
        });
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else {
        writeln!(out, "{sorted}")?;
    }

    Ok(EXIT_OK)
}
