//! # Brackets Subcommand
//!
//! Reports whether the input string is balanced. When it is not, the
//! unmatched residue is printed so the caller can see what was left open
//! or which closer failed to match.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use kata_core::{is_balanced, residue};

use crate::{EXIT_NEGATIVE, EXIT_OK};

/// Arguments for the `kata brackets` subcommand.
#[derive(Args, Debug)]
pub struct BracketsArgs {
    /// String to check.
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Emit a JSON object instead of plain text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the brackets subcommand.
///
/// Returns exit code: 0 if balanced, 1 if not.
pub fn run_brackets(args: &BracketsArgs, out: &mut dyn Write) -> Result<u8> {
    let balanced = is_balanced(&args.input);
    let leftover: String = if balanced {
        String::new()
    } else {
        residue(&args.input).into_iter().collect()
    };

    tracing::debug!(
        input_len = args.input.chars().count(),
        balanced,
        residue = %leftover,
        "bracket check complete"
    );

    if args.json {
        let report = serde_json::json!({
            "input": args.input,
            "balanced": balanced,
            "residue": leftover,
        });
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else if balanced {
        writeln!(out, "balanced")?;
    } else {
        writeln!(out, "unbalanced: unmatched {leftover:?}")?;
    }

    Ok(if balanced { EXIT_OK } else { EXIT_NEGATIVE })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, json: bool) -> (u8, String) {
        let args = BracketsArgs {
            input: input.to_string(),
            json,
        };
        let mut out = Vec::new();
        let code = run_brackets(&args, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn balanced_plain() {
        let (code, out) = run("{([][[[][]({})]])}", false);
        assert_eq!(code, EXIT_OK);
        assert_eq!(out, "balanced\n");
    }

    #[test]
    fn unbalanced_plain_shows_residue() {
        let (code, out) = run("([)]", false);
        assert_eq!(code, EXIT_NEGATIVE);
        assert_eq!(out, "unbalanced: unmatched \"([)]\"\n");
    }

    #[test]
    fn json_report() {
        let (code, out) = run("(()", true);
        assert_eq!(code, EXIT_NEGATIVE);
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["balanced"], false);
        assert_eq!(v["residue"], "(");
        assert_eq!(v["input"], "(()");
    }

    #[test]
    fn empty_input_is_balanced() {
        let (code, _) = run("", false);
        assert_eq!(code, EXIT_OK);
    }
}
