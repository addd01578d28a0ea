//! Error types for loading formulas and configuring solvers.
//!
//! A contradiction is never an error: it is the UNSAT verdict.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    /// A heuristic tag outside the six known strategies.
    #[error("unknown heuristic `{0}`")]
    UnknownHeuristic(String),

    /// A solver name other than resolution, dp or dpll.
    #[error("unknown solver `{0}`")]
    UnknownSolver(String),

    /// A token in a clause line that is not an integer.
    #[error("line {line}: cannot parse literal `{token}`")]
    Parse { line: usize, token: String },

    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
