//! # satsolver
//!
//! Command-line front end for the three satisfiability procedures in
//! `sat_procedures`: resolution, Davis-Putnam (DP) and DPLL with a choice of
//! six branching heuristics.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a file (or every .cnf/.txt file in a directory) with DPLL
//! satsolver problem.cnf
//!
//! # Pick the procedure and heuristic, print every step
//! satsolver file --path problem.cnf --solver dpll --heuristic moms --verbose
//!
//! # Inline formula, one clause per line
//! satsolver text --input "1 -2 0\n2 3 0" --solver resolution
//!
//! # Run every procedure and append timings to test_results.txt
//! satsolver compare --path problem.cnf
//! ```
//!
//! Logging goes to stderr through `tracing`; `RUST_LOG` refines the filter
//! and `--debug` lowers it to debug level.

mod command_line;

use clap::{CommandFactory, Parser};
use command_line::cli::{Cli, Commands, compare, solve_dir, solve_file, solve_text};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// `env` holds `RUST_LOG`-style directives. They are kept as given, with
/// `info` when there are none; `debug` adds a global debug directive.
fn log_filter(debug: bool, env: &str) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(env);
    if debug {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}

fn init_logging(debug: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(debug, &env))
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug_enabled());

    let result = match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Compare { path, common }) => compare(&path, &common),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "satsolver", &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) if path.is_dir() => solve_dir(&path, &cli.common),
            Some(path) => solve_file(&path, &cli.common),
            None => {
                eprintln!("No command provided. Use --help for more information.");
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
