//! # kata CLI entry point
//!
//! Parses command-line arguments, installs logging, loads the optional
//! config file, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use kata_cli::brackets::{run_brackets, BracketsArgs};
use kata_cli::check::{run_check, CheckArgs};
use kata_cli::config::KataConfig;
use kata_cli::logging::{self, LogFormat};
use kata_cli::sort::{run_sort, SortArgs};
use kata_cli::sum::{run_sum, SumArgs};
use kata_cli::EXIT_ERROR;

/// Kata Stack CLI — bracket balance, nested sums, and category sort.
#[derive(Parser, Debug)]
#[command(name = "kata", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether a string's brackets are balanced.
    Brackets(BracketsArgs),

    /// Sum the numeric leaves of a nested JSON array.
    Sum(SumArgs),

    /// Sort characters into lowercase, uppercase, even-digit, odd-digit order.
    Sort(SortArgs),

    /// Run a YAML suite of cases.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format);
    tracing::debug!("kata CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match KataConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Brackets(args) => run_brackets(&args, &mut stdout),
        Commands::Sum(args) => run_sum(&args, &mut stdout),
        Commands::Sort(args) => run_sort(&args, &config, &mut stdout),
        Commands::Check(args) => run_check(&args, &config, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
