#![allow(clippy::cast_precision_loss)]

use crate::command_line::results_log::{DEFAULT_LOG_FILE, log_results};
use clap::{Args, Parser, Subcommand};
use sat_procedures::sat::cnf::Cnf;
use sat_procedures::sat::dimacs::{formula_files, parse_file, parse_str};
use sat_procedures::sat::error::Result;
use sat_procedures::sat::literal_selection::Heuristic;
use sat_procedures::sat::solver::{SolutionStats, SolverImpls, SolverType, Verdict};
use sat_procedures::sat::trace::TracerImpls;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Command-line interface of the satisfiability procedures.
#[derive(Parser, Debug)]
#[command(
    name = "satsolver",
    version,
    about = "Resolution, DP and DPLL satisfiability procedures",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// A formula file, or a directory whose `.cnf` and `.txt` files are all solved.
    pub path: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub common: CommonOptions,
}

impl Cli {
    /// Whether debug logging was asked for, wherever the flag was given.
    pub(crate) fn debug_enabled(&self) -> bool {
        let sub = match &self.command {
            Some(
                Commands::File { common, .. }
                | Commands::Text { common, .. }
                | Commands::Compare { common, .. },
            ) => common.debug,
            Some(Commands::Completions { .. }) | None => false,
        };
        sub || self.common.debug
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a formula file: one clause per line, DIMACS accepted.
    File {
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a formula given inline (e.g. "1 -2 0\n2 3 0").
    ///
    /// A literal `\n` in the argument separates clauses like a newline.
    Text {
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Run Resolution, DP and DPLL with every heuristic on one formula and
    /// log the timings.
    Compare {
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Log every rule application at debug level.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Print the clause set after every rule application.
    #[arg(short, long, default_value_t = false)]
    pub(crate) verbose: bool,

    /// Print problem, search and memory statistics after solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    #[arg(long, value_enum, default_value_t = SolverType::Dpll)]
    pub(crate) solver: SolverType,

    /// Branching heuristic used by DPLL.
    #[arg(long, value_enum, default_value_t = Heuristic::FirstLiteral)]
    pub(crate) heuristic: Heuristic,

    /// Seed for `random_literal`.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Append run timings to this file.
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,
}

/// Label used for a procedure in output and in the results log.
pub(crate) fn algorithm_label(solver: SolverType, heuristic: Heuristic) -> String {
    match solver {
        SolverType::Dpll => format!("DPLL {heuristic}"),
        other => other.to_string(),
    }
}

/// What one solver run produced.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RunReport {
    pub verdict: Verdict,
    pub elapsed: Duration,
    pub stats: SolutionStats,
}

pub(crate) fn run_solver(
    cnf: &Cnf,
    solver: SolverType,
    heuristic: Heuristic,
    common: &CommonOptions,
) -> RunReport {
    let tracer = TracerImpls::from_flags(common.verbose, common.debug);
    let mut solver = SolverImpls::from_parts(solver, cnf.clone(), heuristic, common.seed, tracer);

    let time = Instant::now();
    let verdict = solver.solve();
    let elapsed = time.elapsed();

    RunReport {
        verdict,
        elapsed,
        stats: solver.stats(),
    }
}

/// Allocated and resident memory in MiB, if jemalloc can report them.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

fn display_label(label: Option<&Path>) -> String {
    label.map_or_else(|| "<text>".to_owned(), |p| p.display().to_string())
}

/// Solves `cnf` with the configured procedure and reports the verdict.
pub(crate) fn solve_and_report(
    cnf: &Cnf,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }
    tracing::debug!(
        variables = cnf.num_vars(),
        clauses = cnf.len(),
        solver = %common.solver,
        heuristic = %common.heuristic,
        "starting"
    );

    let report = run_solver(cnf, common.solver, common.heuristic, common);
    let algorithm = algorithm_label(common.solver, common.heuristic);

    if let Some(log) = &common.log_file {
        log_results(log, &algorithm, &display_label(label), report.elapsed);
    }

    if common.stats {
        print_stats(parse_time, cnf, &report, memory_usage());
    }

    println!("{}", report.verdict);
}

pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<()> {
    let time = Instant::now();
    let cnf = parse_file(path)?;
    let parse_time = time.elapsed();

    solve_and_report(&cnf, common, Some(path), parse_time);
    Ok(())
}

pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<()> {
    let time = Instant::now();
    let cnf = parse_str(&input.replace("\\n", "\n"))?;
    let parse_time = time.elapsed();

    solve_and_report(&cnf, common, None, parse_time);
    Ok(())
}

/// Solves every formula file below `path`.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<()> {
    for file in formula_files(path)? {
        solve_file(&file, common)?;
    }
    Ok(())
}

/// Runs every procedure on the formula at `path`, printing one line each and
/// appending the timings to the results log.
pub(crate) fn compare(path: &Path, common: &CommonOptions) -> Result<()> {
    let cnf = parse_file(path)?;
    let log = common
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let file = path.display().to_string();

    println!("Comparing procedures on {file}");

    let runs = [(SolverType::Resolution, Heuristic::default()), (SolverType::Dp, Heuristic::default())]
        .into_iter()
        .chain(Heuristic::ALL.map(|h| (SolverType::Dpll, h)));

    for (solver, heuristic) in runs {
        let algorithm = algorithm_label(solver, heuristic);
        let report = run_solver(&cnf, solver, heuristic, common);

        if solver == SolverType::Dpll {
            println!(
                "{algorithm:<28} {:<14} {:>6} splits  {:.6} s",
                report.verdict.to_string(),
                report.stats.splits,
                report.elapsed.as_secs_f64()
            );
        } else {
            println!(
                "{algorithm:<28} {:<14} {:>13}  {:.6} s",
                report.verdict.to_string(),
                "",
                report.elapsed.as_secs_f64()
            );
        }

        log_results(&log, &algorithm, &file, report.elapsed);
    }

    Ok(())
}

pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    cnf: &Cnf,
    report: &RunReport,
    memory: Option<(f64, f64)>,
) {
    let elapsed_secs = report.elapsed.as_secs_f64();
    let s = &report.stats;
    let literals: usize = cnf.iter().map(|c| c.len()).sum();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars());
    stat_line("Clauses", cnf.len());
    stat_line("Literals", literals);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Splits", s.splits, elapsed_secs);
    stat_line_with_rate("Unit rules", s.unit_propagations, elapsed_secs);
    stat_line_with_rate("Pure rules", s.pure_eliminations, elapsed_secs);
    stat_line_with_rate("Resolvents", s.resolvents, elapsed_secs);
    stat_line("Resolution rounds", s.resolution_rounds);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_algorithm_labels() {
        assert_eq!(algorithm_label(SolverType::Resolution, Heuristic::Moms), "Resolution");
        assert_eq!(algorithm_label(SolverType::Dp, Heuristic::Dlis), "DP");
        assert_eq!(
            algorithm_label(SolverType::Dpll, Heuristic::JeroslowWang),
            "DPLL jeroslow_wang"
        );
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["satsolver", "formula.cnf"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("formula.cnf")));
        assert_eq!(cli.common.solver, SolverType::Dpll);
        assert_eq!(cli.common.heuristic, Heuristic::FirstLiteral);
        assert!(cli.common.log_file.is_none());
        assert!(!cli.debug_enabled());
    }

    #[test]
    fn test_file_subcommand_options() {
        let cli = Cli::try_parse_from([
            "satsolver",
            "file",
            "--path",
            "f.cnf",
            "--solver",
            "dp",
            "--heuristic",
            "most_frequent_literal",
            "--seed",
            "3",
            "-d",
        ])
        .unwrap();
        assert!(cli.debug_enabled());
        match cli.command {
            Some(Commands::File { path, common }) => {
                assert_eq!(path, PathBuf::from("f.cnf"));
                assert_eq!(common.solver, SolverType::Dp);
                assert_eq!(common.heuristic, Heuristic::MostFrequentLiteral);
                assert_eq!(common.seed, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_heuristic_is_rejected() {
        let result = Cli::try_parse_from(["satsolver", "text", "-i", "1 0", "--heuristic", "vsids"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_solver_reports_splits() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]]);
        let report = run_solver(
            &cnf,
            SolverType::Dpll,
            Heuristic::Moms,
            &CommonOptions::default(),
        );
        assert_eq!(report.verdict, Verdict::Unsatisfiable);
        assert!(report.stats.splits >= 1);
    }

    #[test]
    fn test_solve_text_accepts_escaped_newlines() {
        assert!(solve_text("1 -2 0\\n2 0", &CommonOptions::default()).is_ok());
        assert!(solve_text("1 x 0", &CommonOptions::default()).is_err());
    }

    #[test]
    fn test_compare_logs_every_procedure() {
        let dir = std::env::temp_dir().join(format!("sat-procedures-compare-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let formula = dir.join("small.cnf");
        let log = dir.join("results.txt");
        std::fs::write(&formula, "1 -2 0\n2 3 0\n-1 -3 0\n").unwrap();

        let common = CommonOptions {
            log_file: Some(log.clone()),
            ..CommonOptions::default()
        };
        compare(&formula, &common).unwrap();
        let content = std::fs::read_to_string(&log).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 16);
        assert!(lines.iter().skip(1).step_by(2).all(|l| *l == "------------"));

        let file = formula.display().to_string();
        let labels: Vec<&str> = lines
            .iter()
            .step_by(2)
            .map(|entry| {
                assert!(entry.ends_with(" seconds"), "{entry}");
                let (label, rest) = entry.trim_start().split_once(",  ").unwrap();
                assert!(rest.starts_with(&format!("{file}, ")), "{entry}");
                label
            })
            .collect();
        assert_eq!(
            labels,
            [
                "Resolution",
                "DP",
                "DPLL first_literal",
                "DPLL random_literal",
                "DPLL most_frequent_literal",
                "DPLL dlis",
                "DPLL jeroslow_wang",
                "DPLL moms",
            ]
        );
    }
}
